use serde::{Deserialize, Serialize};

/// Mean earth radius in meters, the metric used for marker distances
pub const MEAN_EARTH_RADIUS: f64 = 6_371_008.8;

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a coordinate from a `[lng, lat]` pair, the order map engines use
    pub fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat >= -90.0 && self.lat <= 90.0 && self.lng >= -180.0 && self.lng <= 180.0
    }

    /// Calculates the distance in meters to another LatLng using the Haversine formula
    pub fn distance_to(&self, other: &LatLng) -> f64 {
        let lat1_rad = self.lat.to_radians();
        let lat2_rad = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lng = (other.lng - self.lng).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        MEAN_EARTH_RADIUS * c
    }

    /// Absolute longitude difference measured around the globe, in [0, 180]
    pub fn lng_separation(&self, other: &LatLng) -> f64 {
        Self::wrap_lng(other.lng - self.lng).abs()
    }

    /// Returns the same point with its longitude wrapped to [-180, 180]
    pub fn wrapped(&self) -> Self {
        Self::new(self.lat, Self::wrap_lng(self.lng))
    }

    /// Wraps longitude to [-180, 180] range
    pub fn wrap_lng(lng: f64) -> f64 {
        let wrapped = lng % 360.0;
        if wrapped > 180.0 {
            wrapped - 360.0
        } else if wrapped < -180.0 {
            wrapped + 360.0
        } else {
            wrapped
        }
    }

    /// Clamps latitude to valid range
    pub fn clamp_lat(lat: f64) -> f64 {
        lat.clamp(-90.0, 90.0)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_meridian_is_about_ten_thousand_km() {
        let equator = LatLng::new(0.0, 0.0);
        let pole = LatLng::new(90.0, 0.0);
        let km = equator.distance_to(&pole) / 1000.0;
        assert!((km - 10_007.5).abs() < 1.0, "got {km}");
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = LatLng::new(56.43, -96.4);
        let b = LatLng::new(-33.9, 151.2);
        assert_eq!(a.distance_to(&a), 0.0);
        assert!((a.distance_to(&b) - b.distance_to(&a)).abs() < 1e-6);
    }

    #[test]
    fn wraps_longitude() {
        assert_eq!(LatLng::wrap_lng(190.0), -170.0);
        assert_eq!(LatLng::wrap_lng(-190.0), 170.0);
        assert_eq!(LatLng::wrap_lng(540.0), 180.0);
        assert_eq!(LatLng::wrap_lng(45.0), 45.0);
    }

    #[test]
    fn longitude_separation_goes_the_short_way() {
        let a = LatLng::new(0.0, 170.0);
        let b = LatLng::new(0.0, -170.0);
        assert!((a.lng_separation(&b) - 20.0).abs() < 1e-9);
        assert!((LatLng::new(0.0, 0.0).lng_separation(&LatLng::new(0.0, 61.0)) - 61.0).abs() < 1e-9);
    }

    #[test]
    fn validates_ranges() {
        assert!(LatLng::new(90.0, -180.0).is_valid());
        assert!(!LatLng::new(90.5, 0.0).is_valid());
        assert!(!LatLng::new(0.0, 181.0).is_valid());
    }
}
