//! JavaScript binding for [`find_best_pairs`](crate::find_best_pairs).
//!
//! Enabled with the `wasm` feature.

use crate::error::PairError;
use crate::finder::{find_best_pairs, FinderConfig, Method, PointPair};
use serde::{Deserialize, Deserializer, Serialize};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsPairing {
    method: Method,
    /// Each pair as a list of one or two points.
    pairs: Vec<Vec<Vec<f64>>>,
    total_distance: f64,
}

/// Pairs up `points` (an array of coordinate arrays, or of numbers for 1-D).
///
/// `options` is an optional `FinderConfig` object with the Rust field
/// names, e.g. `{ anneal: { steps_per_stage: 200, seed: 7 } }`. A `points`
/// value that is not an array fails with [`PairError::NotIterable`].
#[wasm_bindgen(js_name = findBestPairs)]
pub fn find_best_pairs_js(points: JsValue, method: &str, options: JsValue) -> Result<JsValue, JsError> {
    let points = read_points(points)?;
    let method: Method = method.parse()?;
    let config = if options.is_undefined() || options.is_null() {
        FinderConfig::default()
    } else {
        serde_wasm_bindgen::from_value::<FinderConfig>(options)
            .map_err(|e| PairError::invalid_config(e.to_string()))?
    };

    let pairing = find_best_pairs(&points, method, &config)?;
    let output = JsPairing {
        method: pairing.method,
        pairs: pairing
            .pairs
            .into_iter()
            .map(|pair| match pair {
                PointPair::Couple(a, b) => vec![a, b],
                PointPair::Single(a) => vec![a],
            })
            .collect(),
        total_distance: pairing.total_distance,
    };
    Ok(serde_wasm_bindgen::to_value(&output)?)
}

fn read_points(value: JsValue) -> Result<Vec<Vec<f64>>, PairError> {
    decode_points(serde_wasm_bindgen::Deserializer::from(value))
}

/// Accepted shapes of the `points` argument.
#[derive(Deserialize)]
#[serde(untagged)]
enum PointsInput {
    Nested(Vec<Vec<f64>>),
    /// Bare numbers, one 1-D point each.
    Flat(Vec<f64>),
}

fn decode_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Vec<f64>>, PairError> {
    match PointsInput::deserialize(deserializer) {
        Ok(PointsInput::Nested(points)) => Ok(points),
        Ok(PointsInput::Flat(values)) => Ok(values.into_iter().map(|x| vec![x]).collect()),
        Err(e) => Err(PairError::NotIterable(e.to_string())),
    }
}
