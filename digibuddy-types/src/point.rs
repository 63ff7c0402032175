use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

/// Point on the surface of the Earth in WGS84 degrees.
///
/// Serialized as `{"lat": .., "lng": ..}`, which is the shape the routing backend expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Creates a new point from latitude and longitude in degrees.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Creates a point from a GeoJSON-ordered `[lng, lat]` pair.
    pub const fn from_lng_lat(lng: f64, lat: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Returns true if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl AbsDiffEq for LatLng {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.lat.abs_diff_eq(&other.lat, epsilon) && self.lng.abs_diff_eq(&other.lng, epsilon)
    }
}

impl RelativeEq for LatLng {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(
        &self,
        other: &Self,
        epsilon: Self::Epsilon,
        max_relative: Self::Epsilon,
    ) -> bool {
        self.lat.relative_eq(&other.lat, epsilon, max_relative)
            && self.lng.relative_eq(&other.lng, epsilon, max_relative)
    }
}

/// Creates a new [`LatLng`] from latitude and longitude values (in degrees).
///
/// ```
/// use digibuddy_types::latlng;
///
/// let point = latlng!(51.9607, 7.6257);
/// assert_eq!(point.lat(), 51.9607);
/// assert_eq!(point.lng(), 7.6257);
/// ```
#[macro_export]
macro_rules! latlng {
    ($lat:expr, $lng:expr) => {
        $crate::LatLng::new($lat, $lng)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_lat_lng_object() {
        let value = serde_json::to_value(latlng!(51.96, 7.62)).unwrap();
        assert_eq!(value, serde_json::json!({"lat": 51.96, "lng": 7.62}));
    }

    #[test]
    fn lng_lat_constructor_swaps_order() {
        assert_eq!(LatLng::from_lng_lat(7.62, 51.96), latlng!(51.96, 7.62));
    }
}
