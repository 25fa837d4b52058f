//! Client-side constants and the engine configuration used by the views.

use engine::config::EngineConfig;
use log::Level;

/// Prefix of every backend route.
pub const API_PATH: &str = "/api";

/// Nominatim-compatible search endpoint used to position the zone.
pub const GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// `localStorage` key holding the signed-in user as JSON.
pub const SESSION_USER_KEY: &str = "user";

pub const LOG_LEVEL: Level = Level::Info;

pub fn engine_config() -> EngineConfig {
    EngineConfig::default()
}
