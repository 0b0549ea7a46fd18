//! Mock hazard forecasting: derives a "predicted" hazard location from a base
//! coordinate by walking a randomly sampled geodesic (or, for one legacy
//! policy, jittering in degree space).

pub mod error;
pub mod geodesy;
pub mod input;
pub mod policy;
pub mod predict;

pub use error::{PredictError, Result};
pub use geodesy::Coordinate;
pub use policy::{Hazard, PredictionPolicy};
pub use predict::{predict, PredictionResult};
