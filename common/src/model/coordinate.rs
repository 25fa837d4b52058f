use serde::{Deserialize, Serialize};

/// A point on the Earth's surface, in decimal degrees.
///
/// Serialized as `{ "lat": .., "lng": .. }`, which is the shape the backend
/// stores for zone centers and check-in coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, valid range [-90, 90].
    #[serde(rename = "lat")]
    pub latitude: f64,
    /// Longitude in degrees, valid range [-180, 180].
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate only when both components are finite and inside
    /// their valid ranges. Used wherever values come from outside the process
    /// (device position, geocoder rows).
    pub fn checked(latitude: f64, longitude: f64) -> Option<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.is_valid().then_some(coordinate)
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}
