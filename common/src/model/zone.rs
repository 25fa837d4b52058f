use serde::{Deserialize, Serialize};

use crate::model::coordinate::Coordinate;

/// The circular attendance zone configured by an administrator.
///
/// The backend owns this record; clients cache the last copy they loaded.
/// `radius_meters` is not range-checked here: the configuration view keeps it
/// within its slider bounds, and membership evaluation copes with any value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub center: Coordinate,
    #[serde(rename = "radius")]
    pub radius_meters: f64,
}

impl Zone {
    pub const fn new(center: Coordinate, radius_meters: f64) -> Self {
        Self {
            center,
            radius_meters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_payload() {
        let zone: Zone =
            serde_json::from_str(r#"{"center":{"lat":48.85,"lng":2.35},"radius":250}"#).unwrap();
        assert_eq!(zone, Zone::new(Coordinate::new(48.85, 2.35), 250.0));
    }

    #[test]
    fn null_payload_means_no_zone() {
        let zone: Option<Zone> = serde_json::from_str("null").unwrap();
        assert!(zone.is_none());
    }
}
