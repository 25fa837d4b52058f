use serde::{Deserialize, Serialize};

use crate::model::checkin::CheckInStatus;
use crate::model::coordinate::Coordinate;

/// Body of `POST /checkin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub coords: Coordinate,
    /// `data:image/jpeg;base64,...` when a photo was captured.
    pub photo: Option<String>,
    pub status: CheckInStatus,
}

/// Error payload returned by the backend on a rejected request.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkin_body_shape() {
        let request = CheckInRequest {
            user_id: "u-1".to_string(),
            coords: Coordinate::new(1.5, -2.25),
            photo: None,
            status: CheckInStatus::OutOfZone,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "userId": "u-1",
                "coords": { "lat": 1.5, "lng": -2.25 },
                "photo": null,
                "status": "out_of_zone"
            })
        );
    }
}
