//! Coordinates and the geodesic helpers used to walk from a base point.
//!
//! All geodesic work is done on the WGS84 ellipsoid through `geo`. Distances
//! at this module's boundary are kilometres; `geo` works in metres.

use crate::error::{PredictError, Result};
use geo::algorithm::geodesic_bearing::GeodesicBearing;
use geo::algorithm::geodesic_destination::GeodesicDestination;
use geo::Point;
use std::fmt;
use tracing::trace;

const METERS_PER_KM: f64 = 1000.0;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(PredictError::InvalidInput(format!(
                "coordinate ({lat}, {lng}) is not finite"
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(PredictError::InvalidInput(format!(
                "latitude {lat} is outside [-90, 90]"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(PredictError::InvalidInput(format!(
                "longitude {lng} is outside [-180, 180]"
            )));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }

    /// Builds a coordinate from a computed point, wrapping the longitude.
    /// A non-finite value or a latitude off the globe is a solver fault.
    pub(crate) fn from_computed(lat: f64, lng: f64) -> Result<Self> {
        if !lat.is_finite() || !lng.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(PredictError::Degenerate { lat, lng });
        }
        Ok(Self {
            lat,
            lng: wrap_longitude(lng),
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

/// Wraps a longitude into [-180, 180]. Values already in range are returned
/// untouched so that +180 stays +180.
pub fn wrap_longitude(lng: f64) -> f64 {
    if (-180.0..=180.0).contains(&lng) {
        return lng;
    }
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Solves the direct geodesic problem: walks `distance_km` from `base` along
/// the initial bearing `bearing_deg` (clockwise from true north).
pub fn destination(base: Coordinate, bearing_deg: f64, distance_km: f64) -> Result<Coordinate> {
    let dest = base
        .to_point()
        .geodesic_destination(bearing_deg, distance_km * METERS_PER_KM);
    trace!(
        "{base} + {distance_km} km @ {bearing_deg}° -> lat = {}, lon = {}",
        dest.y(),
        dest.x()
    );
    Coordinate::from_computed(dest.y(), dest.x())
}

/// Solves the inverse geodesic problem. Returns the initial bearing in
/// [0, 360) and the distance in kilometres.
pub fn bearing_and_distance(from: Coordinate, to: Coordinate) -> (f64, f64) {
    let (bearing, dist_m) = from.to_point().geodesic_bearing_distance(to.to_point());
    (bearing.rem_euclid(360.0), dist_m / METERS_PER_KM)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(Coordinate::new(999.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
        assert!(Coordinate::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn wraps_longitude() {
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert!((wrap_longitude(181.0) - -179.0).abs() < 1e-9);
        assert!((wrap_longitude(-181.0) - 179.0).abs() < 1e-9);
        assert!((wrap_longitude(540.0) - -180.0).abs() < 1e-9);
    }

    #[test]
    fn chennai_one_km_east() {
        let base = Coordinate::new(13.0827, 80.2707).unwrap();
        let dest = destination(base, 90.0, 1.0).unwrap();
        assert!((dest.lat() - 13.0827).abs() < 1e-4, "lat = {}", dest.lat());
        assert!((dest.lng() - 80.2799).abs() < 1e-4, "lng = {}", dest.lng());

        let (bearing, dist) = bearing_and_distance(base, dest);
        assert!((bearing - 90.0).abs() < 1e-6, "bearing = {bearing}");
        assert!((dist - 1.0).abs() < 1e-9, "dist = {dist}");
    }

    #[test]
    fn crosses_antimeridian() {
        let base = Coordinate::new(0.0, 179.99).unwrap();
        let dest = destination(base, 90.0, 25.0).unwrap();
        assert!(dest.lng() < 0.0 && dest.lng() >= -180.0, "lng = {}", dest.lng());
    }

    #[test]
    fn degenerate_point_is_an_error() {
        let err = Coordinate::from_computed(f64::NAN, 0.0).unwrap_err();
        assert!(matches!(err, PredictError::Degenerate { .. }));
        let err = Coordinate::from_computed(90.5, 10.0).unwrap_err();
        assert!(matches!(err, PredictError::Degenerate { .. }));
    }
}
