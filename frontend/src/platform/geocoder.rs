use async_trait::async_trait;
use common::model::place::GeocodedPlace;
use engine::error::SearchError;
use engine::search::Geocoder;
use gloo_net::http::Request;

use crate::config::GEOCODING_ENDPOINT;

/// Free-text place search against a Nominatim-style `/search` endpoint.
pub struct NominatimGeocoder {
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new(GEOCODING_ENDPOINT)
    }
}

#[async_trait(?Send)]
impl Geocoder for NominatimGeocoder {
    async fn search(&self, text: &str, limit: usize) -> Result<Vec<GeocodedPlace>, SearchError> {
        let response = Request::get(&self.endpoint)
            .query([
                ("format", "json".to_string()),
                ("q", text.to_string()),
                ("limit", limit.to_string()),
            ])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|error| SearchError::Transport(error.to_string()))?;

        if !response.ok() {
            return Err(SearchError::Transport(format!(
                "geocoder answered {}",
                response.status()
            )));
        }
        response
            .json::<Vec<GeocodedPlace>>()
            .await
            .map_err(|error| SearchError::Decode(error.to_string()))
    }
}
