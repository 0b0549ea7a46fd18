use crate::error::{PredictError, Result};
use crate::geodesy::Coordinate;
use serde::Deserialize;

/// The base point as supplied by the caller. Callers usually hand over a whole
/// report record, so unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct BaseInput {
    lat: f64,
    lng: f64,
}

/// Parses `{"lat": <number>, "lng": <number>}` (or a bare `[lat, lng]` pair)
/// into a validated coordinate.
pub fn parse_base(json: &str) -> Result<Coordinate> {
    let input: BaseInput = serde_json::from_str(json)
        .map_err(|e| PredictError::InvalidInput(format!("malformed base coordinate: {e}")))?;
    Coordinate::new(input.lat, input.lng)
}
