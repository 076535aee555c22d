//! Dense pairwise distance matrix and its masked live view.

use super::distance::distance;
use crate::error::{PairError, Result};

/// Symmetric `n × n` table of pairwise Euclidean distances.
///
/// Stored row-major in a flat buffer. The diagonal is exactly `0.0` unless
/// [`DistanceMatrix::with_masked_diagonal`] has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    /// Builds the matrix for `points`, failing on any dimension mismatch.
    pub fn from_points<P: AsRef<[f64]>>(points: &[P]) -> Result<Self> {
        let n = points.len();
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = distance(points[i].as_ref(), points[j].as_ref())?;
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Ok(Self { n, data })
    }

    /// Wraps explicit rows. Every row must have exactly `rows.len()` entries.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(PairError::invalid_input(format!(
                    "matrix row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend(row);
        }
        Ok(Self { n, data })
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.n + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    /// Copy with every diagonal entry set to `+inf`, forbidding self-pairs.
    pub fn with_masked_diagonal(&self) -> Self {
        let mut masked = self.clone();
        for i in 0..self.n {
            masked.data[i * self.n + i] = f64::INFINITY;
        }
        masked
    }
}

/// Builds the pairwise distance matrix of `points`.
pub fn distance_matrix<P: AsRef<[f64]>>(points: &[P]) -> Result<DistanceMatrix> {
    DistanceMatrix::from_points(points)
}

/// A distance matrix with points progressively removed.
///
/// Rows and columns are never physically deleted; an alive mask hides the
/// consumed points so indices stay stable across removals.
#[derive(Debug, Clone)]
pub struct LiveMatrix {
    matrix: DistanceMatrix,
    alive: Vec<bool>,
    remaining: usize,
}

impl LiveMatrix {
    pub fn new(matrix: &DistanceMatrix) -> Self {
        Self {
            matrix: matrix.with_masked_diagonal(),
            alive: vec![true; matrix.len()],
            remaining: matrix.len(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Indices of the points still alive, ascending.
    pub fn alive_indices(&self) -> Vec<usize> {
        (0..self.alive.len()).filter(|&i| self.alive[i]).collect()
    }

    /// Marks `i` as consumed.
    pub fn remove(&mut self, i: usize) {
        if self.alive[i] {
            self.alive[i] = false;
            self.remaining -= 1;
        }
    }

    /// Globally smallest live entry as `(row, column)`.
    ///
    /// Row-major scan; the first minimum wins. Returns `None` with fewer than
    /// two live points.
    pub fn closest_pair(&self) -> Option<(usize, usize)> {
        if self.remaining < 2 {
            return None;
        }
        let alive = self.alive_indices();
        let mut best: Option<(usize, usize)> = None;
        let mut best_value = f64::INFINITY;
        for &i in &alive {
            let row = self.matrix.row(i);
            for &j in &alive {
                if row[j] < best_value {
                    best_value = row[j];
                    best = Some((i, j));
                }
            }
        }
        // all live entries infinite: fall back to index order
        best.or(Some((alive[0], alive[1])))
    }

    /// Nearest live neighbour of `i` (first row minimum).
    pub fn nearest(&self, i: usize) -> Option<usize> {
        let row = self.matrix.row(i);
        let mut best = None;
        let mut best_value = f64::INFINITY;
        for j in 0..self.alive.len() {
            if j == i || !self.alive[j] {
                continue;
            }
            if best.is_none() || row[j] < best_value {
                best_value = row[j];
                best = Some(j);
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_one_dimension() {
        let m = distance_matrix(&[[2.0], [3.0], [4.0], [6.0]]).unwrap();
        assert_eq!(m.len(), 4);
        assert_eq!(m.get(0, 0), 0.0);
        assert!((m.get(0, 3) - 4.0).abs() < 1e-12);
        assert_eq!(m.get(1, 2), m.get(2, 1));
    }

    #[test]
    fn test_matrix_two_dimensions() {
        let m = distance_matrix(&[[2.0, 3.0], [3.0, 6.0], [4.0, 5.0], [2.0, 3.0]]).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert!((m.get(1, 0) - 10.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(m.get(0, 3), 0.0);
    }

    #[test]
    fn test_matrix_dimension_mismatch() {
        let points = vec![vec![0.0, 0.0], vec![1.0]];
        assert!(matches!(
            distance_matrix(&points),
            Err(PairError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]]).is_err());
    }

    #[test]
    fn test_masked_diagonal() {
        let m = distance_matrix(&[[0.0], [1.0]]).unwrap().with_masked_diagonal();
        assert!(m.get(0, 0).is_infinite());
        assert!(m.get(1, 1).is_infinite());
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn test_live_matrix_closest_and_remove() {
        let m = distance_matrix(&[[0.0], [10.0], [11.0], [30.0]]).unwrap();
        let mut live = LiveMatrix::new(&m);
        assert_eq!(live.closest_pair(), Some((1, 2)));
        live.remove(1);
        live.remove(2);
        assert_eq!(live.remaining(), 2);
        assert_eq!(live.closest_pair(), Some((0, 3)));
        live.remove(0);
        assert_eq!(live.closest_pair(), None);
        assert_eq!(live.alive_indices(), vec![3]);
    }

    #[test]
    fn test_live_matrix_nearest_skips_dead() {
        let m = distance_matrix(&[[0.0], [1.0], [5.0]]).unwrap();
        let mut live = LiveMatrix::new(&m);
        assert_eq!(live.nearest(0), Some(1));
        live.remove(1);
        assert_eq!(live.nearest(0), Some(2));
        live.remove(2);
        assert_eq!(live.nearest(0), None);
    }
}
