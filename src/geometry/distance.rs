//! Euclidean distance primitives.

use crate::error::{PairError, Result};

/// Squared Euclidean distance between two points.
///
/// Fails with [`PairError::DimensionMismatch`] when the coordinate counts differ.
pub fn squared_distance(p1: &[f64], p2: &[f64]) -> Result<f64> {
    if p1.len() != p2.len() {
        return Err(PairError::DimensionMismatch {
            expected: p1.len(),
            found: p2.len(),
        });
    }
    Ok(p1
        .iter()
        .zip(p2)
        .map(|(a, b)| {
            let d = a - b;
            d * d
        })
        .sum())
}

/// Euclidean norm of the coordinate-wise difference `p1 - p2`.
///
/// # Examples
///
/// ```
/// use u_pairing::geometry::distance;
///
/// let d = distance(&[0.0, 0.0], &[3.0, 4.0]).unwrap();
/// assert!((d - 5.0).abs() < 1e-12);
/// ```
pub fn distance(p1: &[f64], p2: &[f64]) -> Result<f64> {
    squared_distance(p1, p2).map(f64::sqrt)
}

/// Mean position of the points selected by `indices`.
///
/// Returns an empty vector when `indices` is empty.
pub fn centroid<P: AsRef<[f64]>>(points: &[P], indices: &[usize]) -> Vec<f64> {
    let Some(&first) = indices.first() else {
        return Vec::new();
    };
    let mut sum = vec![0.0; points[first].as_ref().len()];
    for &i in indices {
        for (acc, &x) in sum.iter_mut().zip(points[i].as_ref()) {
            *acc += x;
        }
    }
    let count = indices.len() as f64;
    sum.iter_mut().for_each(|x| *x /= count);
    sum
}

/// Checks that every point has the same non-zero dimension and finite
/// coordinates, returning that dimension (0 for an empty set).
pub fn check_points<P: AsRef<[f64]>>(points: &[P]) -> Result<usize> {
    let Some(first) = points.first() else {
        return Ok(0);
    };
    let dimension = first.as_ref().len();
    if dimension == 0 {
        return Err(PairError::invalid_input("points must have at least one coordinate"));
    }
    for (i, p) in points.iter().enumerate() {
        let p = p.as_ref();
        if p.len() != dimension {
            return Err(PairError::DimensionMismatch {
                expected: dimension,
                found: p.len(),
            });
        }
        if p.iter().any(|x| !x.is_finite()) {
            return Err(PairError::invalid_input(format!(
                "point {i} has a non-finite coordinate"
            )));
        }
    }
    Ok(dimension)
}
