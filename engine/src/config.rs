//! Engine tuning knobs.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a working configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Coordinate;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub capture: CaptureConfig,
    pub location: LocationConfig,
    pub zone: ZoneConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period after the last keystroke before the geocoder is called.
    pub debounce_ms: u64,
    /// Trimmed input shorter than this clears the candidates instead of searching.
    pub min_query_chars: usize,
    pub max_results: usize,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_query_chars: 2,
            max_results: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Fixed rasterization size of a captured frame.
    pub frame_width: u32,
    pub frame_height: u32,
    /// JPEG quality (1-100) of the frozen frame.
    pub frame_quality: u8,
    /// Longest edge, in pixels, of the photo that is uploaded.
    pub max_edge: u32,
    /// JPEG quality (1-100) of the uploaded photo.
    pub upload_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            frame_width: 320,
            frame_height: 240,
            frame_quality: 80,
            max_edge: 480,
            upload_quality: 50,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    /// Position to assume when location permission is denied. Disabled unless
    /// set explicitly.
    pub fallback: Option<Coordinate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub min_radius: f64,
    pub max_radius: f64,
    pub default_radius: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            min_radius: 10.0,
            max_radius: 1000.0,
            default_radius: 100.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = EngineConfig::default();
        assert_eq!(config.search.debounce(), Duration::from_millis(500));
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.search.max_results, 5);
        assert_eq!((config.capture.frame_width, config.capture.frame_height), (320, 240));
        assert_eq!(config.capture.max_edge, 480);
        assert!(config.location.fallback.is_none());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "search": { "debounce_ms": 250 }, "location": { "fallback": { "lat": 33.5731, "lng": -7.5898 } } }"#,
        )
        .unwrap();
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.capture, CaptureConfig::default());
        assert_eq!(
            config.location.fallback,
            Some(Coordinate::new(33.5731, -7.5898))
        );
    }
}
