//! Great-circle distance between coordinates

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine distance in kilometers
///
/// Inputs are not validated: NaN or out-of-range degrees propagate into the
/// result.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(haversine_km(55.7558, 37.6173, 55.7558, 37.6173), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree along a meridian is R * pi / 180
        let d = haversine_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.19).abs() < 0.01, "got {}", d);
    }

    #[test]
    fn test_moscow_to_saint_petersburg() {
        let moscow = GeoPoint::new(55.7558, 37.6173);
        let spb = GeoPoint::new(59.9343, 30.3351);

        let d = moscow.distance_km(&spb);
        assert!(d > 630.0 && d < 640.0, "got {}", d);
        assert!((d - spb.distance_km(&moscow)).abs() < 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(haversine_km(f64::NAN, 0.0, 0.0, 0.0).is_nan());
    }
}
