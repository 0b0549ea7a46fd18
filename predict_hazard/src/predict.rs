use crate::error::Result;
use crate::geodesy::{self, Coordinate};
use crate::policy::{PredictionPolicy, PredictionType, Severity, Step};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// A predicted hazard location, serialized as the flat JSON record consumed
/// downstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: PredictionType,
    pub severity: Severity,
}

/// Samples a step from `policy` and applies it to `base`.
pub fn predict<R: Rng>(
    base: Coordinate,
    policy: &PredictionPolicy,
    rng: &mut R,
) -> Result<PredictionResult> {
    let step = policy.sample_step(rng);
    apply_step(base, policy, step)
}

/// Applies an already chosen step. Deterministic.
pub fn apply_step(
    base: Coordinate,
    policy: &PredictionPolicy,
    step: Step,
) -> Result<PredictionResult> {
    let (dest, direction) = match step {
        Step::Geodesic {
            bearing_deg,
            distance_km,
            direction,
        } => (
            geodesy::destination(base, bearing_deg, distance_km)?,
            direction,
        ),
        // Degree-space offset can step past a pole; pin it there.
        Step::Jitter { dlat, dlng } => (
            Coordinate::from_computed(
                (base.lat() + dlat).clamp(-90.0, 90.0),
                base.lng() + dlng,
            )?,
            None,
        ),
    };
    debug!("{}: {base} -> {dest}", policy.hazard);

    Ok(PredictionResult {
        lat: dest.lat(),
        lng: dest.lng(),
        title: policy.title.to_string(),
        description: policy.render_description(direction),
        kind: policy.kind,
        severity: policy.severity,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::{CORAL_BLEACHING, DEFORESTATION_OFFSET};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chennai() -> Coordinate {
        Coordinate::new(13.0827, 80.2707).unwrap()
    }

    #[test]
    fn coral_east_one_km() {
        let step = Step::Geodesic {
            bearing_deg: 90.0,
            distance_km: 1.0,
            direction: None,
        };
        let result = apply_step(chennai(), &CORAL_BLEACHING, step).unwrap();
        assert!((result.lat - 13.0827).abs() < 1e-4);
        assert!((result.lng - 80.2799).abs() < 1e-4);
        assert_eq!(result.kind, PredictionType::Coral);
        assert_eq!(result.severity, Severity::Critical);
        assert_eq!(result.title, "Predicted Coral Bleaching Spread");
    }

    #[test]
    fn serializes_flat_record() {
        let step = Step::Geodesic {
            bearing_deg: 0.0,
            distance_km: 1.0,
            direction: None,
        };
        let result = apply_step(chennai(), &CORAL_BLEACHING, step).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        let obj = value.as_object().unwrap();
        let mut keys = obj.keys().map(String::as_str).collect::<Vec<_>>();
        keys.sort();
        assert_eq!(
            keys,
            ["description", "lat", "lng", "severity", "title", "type"]
        );
        assert_eq!(obj["type"], "predicted_coral");
        assert_eq!(obj["severity"], "Critical");
    }

    #[test]
    fn jitter_near_pole_is_clamped() {
        let base = Coordinate::new(89.98, 179.98).unwrap();
        let step = Step::Jitter {
            dlat: 0.05,
            dlng: 0.05,
        };
        let result = apply_step(base, &DEFORESTATION_OFFSET, step).unwrap();
        assert_eq!(result.lat, 90.0);
        assert!((result.lng - -179.97).abs() < 1e-9);
    }

    #[test]
    fn seeded_predictions_repeat() {
        let mut a = StdRng::seed_from_u64(2024);
        let mut b = StdRng::seed_from_u64(2024);
        for _ in 0..10 {
            let x = predict(chennai(), &CORAL_BLEACHING, &mut a).unwrap();
            let y = predict(chennai(), &CORAL_BLEACHING, &mut b).unwrap();
            assert_eq!(x.lat.to_bits(), y.lat.to_bits());
            assert_eq!(x.lng.to_bits(), y.lng.to_bits());
            assert_eq!(x, y);
        }
    }
}
