use serde::{Deserialize, Serialize};

/// One row of a geocoding search response.
///
/// The geocoding service returns latitude and longitude as decimal strings;
/// they are kept verbatim here and parsed by the search resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}
