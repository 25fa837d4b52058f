use serde::{Deserialize, Serialize};

/// Zone membership recorded with a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInStatus {
    InZone,
    OutOfZone,
}

impl CheckInStatus {
    pub fn from_in_zone(in_zone: bool) -> Self {
        if in_zone {
            CheckInStatus::InZone
        } else {
            CheckInStatus::OutOfZone
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInStatus::InZone => "in_zone",
            CheckInStatus::OutOfZone => "out_of_zone",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_values() {
        assert_eq!(
            serde_json::to_string(&CheckInStatus::InZone).unwrap(),
            "\"in_zone\""
        );
        assert_eq!(
            serde_json::to_string(&CheckInStatus::OutOfZone).unwrap(),
            "\"out_of_zone\""
        );
        assert_eq!(CheckInStatus::from_in_zone(false).as_str(), "out_of_zone");
    }
}
