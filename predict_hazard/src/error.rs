use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("geodesic computation produced a point off the globe (lat = {lat}, lng = {lng})")]
    Degenerate { lat: f64, lng: f64 },
}

pub type Result<T> = std::result::Result<T, PredictError>;
