//! The named hazard policies and how each one samples a displacement.
//!
//! Every hazard maps to one compiled-in [`PredictionPolicy`]. A policy either
//! walks a sampled geodesic (bearing + distance) or, for the legacy offset
//! variant of deforestation, jitters the base point directly in degree space.

use crate::error::{PredictError, Result};
use itertools::Itertools;
use rand::Rng;
use serde::Serialize;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hazard {
    CoralBleaching,
    Deforestation,
    DeforestationOffset,
    PlasticWaste,
}

impl Hazard {
    pub const ALL: [Hazard; 4] = [
        Hazard::CoralBleaching,
        Hazard::Deforestation,
        Hazard::DeforestationOffset,
        Hazard::PlasticWaste,
    ];

    /// The name used on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Hazard::CoralBleaching => "coral",
            Hazard::Deforestation => "deforestation",
            Hazard::DeforestationOffset => "deforestation-offset",
            Hazard::PlasticWaste => "plastic",
        }
    }

    pub fn policy(&self) -> &'static PredictionPolicy {
        match self {
            Hazard::CoralBleaching => &CORAL_BLEACHING,
            Hazard::Deforestation => &DEFORESTATION,
            Hazard::DeforestationOffset => &DEFORESTATION_OFFSET,
            Hazard::PlasticWaste => &PLASTIC_WASTE,
        }
    }
}

impl FromStr for Hazard {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        match name.as_str() {
            "coral" | "coral-bleaching" => Ok(Hazard::CoralBleaching),
            "deforestation" | "deforestation-directional" => Ok(Hazard::Deforestation),
            "deforestation-offset" => Ok(Hazard::DeforestationOffset),
            "plastic" | "plastic-waste" => Ok(Hazard::PlasticWaste),
            _ => Err(PredictError::InvalidInput(format!(
                "unknown hazard type '{s}' (expected one of: {})",
                Hazard::ALL.iter().map(Hazard::name).join(", ")
            ))),
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The `type` tag of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PredictionType {
    #[serde(rename = "predicted_coral")]
    Coral,
    #[serde(rename = "predicted_deforestation")]
    Deforestation,
    #[serde(rename = "predicted_plastic")]
    Plastic,
}

impl fmt::Display for PredictionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            PredictionType::Coral => "predicted_coral",
            PredictionType::Deforestation => "predicted_deforestation",
            PredictionType::Plastic => "predicted_plastic",
        };
        f.pad(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    High,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Severity::High => "High",
            Severity::Critical => "Critical",
        };
        f.pad(tag)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 8] = [
        CompassPoint::N,
        CompassPoint::NE,
        CompassPoint::E,
        CompassPoint::SE,
        CompassPoint::S,
        CompassPoint::SW,
        CompassPoint::W,
        CompassPoint::NW,
    ];

    pub fn bearing(&self) -> f64 {
        match self {
            CompassPoint::N => 0.0,
            CompassPoint::NE => 45.0,
            CompassPoint::E => 90.0,
            CompassPoint::SE => 135.0,
            CompassPoint::S => 180.0,
            CompassPoint::SW => 225.0,
            CompassPoint::W => 270.0,
            CompassPoint::NW => 315.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CompassPoint::N => "north",
            CompassPoint::NE => "north-east",
            CompassPoint::E => "east",
            CompassPoint::SE => "south-east",
            CompassPoint::S => "south",
            CompassPoint::SW => "south-west",
            CompassPoint::W => "west",
            CompassPoint::NW => "north-west",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub enum BearingRule {
    /// Uniform over `[start, end)` degrees.
    Uniform(Range<f64>),
    /// Uniform choice among a fixed ordered set of compass points.
    Compass(&'static [CompassPoint]),
}

#[derive(Debug, Clone)]
pub enum Displacement {
    Geodesic {
        bearing: BearingRule,
        distance_km: Range<f64>,
    },
    /// Independent lat/lng offsets in `[-max_offset_deg, max_offset_deg]`.
    /// Not distance-uniform and distorted near the poles.
    DegreeJitter { max_offset_deg: f64 },
}

/// One sampled displacement. Applying the same step to the same base always
/// yields the same point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Geodesic {
        bearing_deg: f64,
        distance_km: f64,
        direction: Option<CompassPoint>,
    },
    Jitter {
        dlat: f64,
        dlng: f64,
    },
}

#[derive(Debug, Clone)]
pub struct PredictionPolicy {
    pub hazard: Hazard,
    pub displacement: Displacement,
    pub title: &'static str,
    /// May contain `{direction}`, replaced by the sampled compass point.
    pub description: &'static str,
    pub kind: PredictionType,
    pub severity: Severity,
}

pub const DIRECTION_PLACEHOLDER: &str = "{direction}";

pub static CORAL_BLEACHING: PredictionPolicy = PredictionPolicy {
    hazard: Hazard::CoralBleaching,
    displacement: Displacement::Geodesic {
        bearing: BearingRule::Uniform(0.0..360.0),
        distance_km: 0.5..2.0,
    },
    title: "Predicted Coral Bleaching Spread",
    description: "High sea surface temperatures and a nearby validated bleaching report indicate a critical risk of bleaching spreading to this adjacent reef area.",
    kind: PredictionType::Coral,
    severity: Severity::Critical,
};

pub static DEFORESTATION: PredictionPolicy = PredictionPolicy {
    hazard: Hazard::Deforestation,
    displacement: Displacement::Geodesic {
        bearing: BearingRule::Compass(&CompassPoint::ALL),
        distance_km: 2.0..5.0,
    },
    title: "Predicted Deforestation Hotspot",
    description: "AI predicts a high risk of deforestation spreading {direction} of recent clearing activity within 6 months.",
    kind: PredictionType::Deforestation,
    severity: Severity::High,
};

pub static DEFORESTATION_OFFSET: PredictionPolicy = PredictionPolicy {
    hazard: Hazard::DeforestationOffset,
    displacement: Displacement::DegreeJitter {
        max_offset_deg: 0.05,
    },
    title: "Predicted Deforestation Hotspot",
    description: "AI predicts a 73% risk of deforestation in this area within 6 months based on nearby activity.",
    kind: PredictionType::Deforestation,
    severity: Severity::High,
};

pub static PLASTIC_WASTE: PredictionPolicy = PredictionPolicy {
    hazard: Hazard::PlasticWaste,
    displacement: Displacement::Geodesic {
        bearing: BearingRule::Uniform(110.0..160.0),
        distance_km: 10.0..25.0,
    },
    title: "Predicted Plastic Accumulation Zone",
    description: "Based on a recent report, our model predicts a high probability of plastic waste accumulating in this area within 24-48 hours due to river flow.",
    kind: PredictionType::Plastic,
    severity: Severity::Critical,
};

impl PredictionPolicy {
    pub fn sample_step<R: Rng>(&self, rng: &mut R) -> Step {
        let step = match &self.displacement {
            Displacement::Geodesic {
                bearing,
                distance_km,
            } => {
                let (bearing_deg, direction) = match bearing {
                    BearingRule::Uniform(range) => (rng.random_range(range.clone()), None),
                    BearingRule::Compass(points) => {
                        let point = points[rng.random_range(0..points.len())];
                        (point.bearing(), Some(point))
                    }
                };
                Step::Geodesic {
                    bearing_deg,
                    distance_km: rng.random_range(distance_km.clone()),
                    direction,
                }
            }
            Displacement::DegreeJitter { max_offset_deg } => Step::Jitter {
                dlat: rng.random_range(-max_offset_deg..=*max_offset_deg),
                dlng: rng.random_range(-max_offset_deg..=*max_offset_deg),
            },
        };
        trace!("{}: sampled {:?}", self.hazard, step);
        step
    }

    pub fn render_description(&self, direction: Option<CompassPoint>) -> String {
        match direction {
            Some(direction) => self
                .description
                .replace(DIRECTION_PLACEHOLDER, direction.name()),
            None => self.description.to_string(),
        }
    }
}
