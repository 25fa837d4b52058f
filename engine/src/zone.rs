//! Zone editing for the administrator view.

use log::{debug, warn};

use crate::config::ZoneConfig;
use crate::error::ZoneError;
use crate::search::SearchCandidate;
use crate::{Coordinate, Zone};

/// Unsaved zone being edited. The radius always stays within the configured
/// bounds; the center is unknown until it is loaded, picked or located.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDraft {
    center: Option<Coordinate>,
    radius: f64,
    bounds: ZoneConfig,
}

impl ZoneDraft {
    pub fn new(bounds: ZoneConfig) -> Self {
        let bounds = normalize_bounds(bounds);
        Self {
            center: None,
            radius: bounds.default_radius.clamp(bounds.min_radius, bounds.max_radius),
            bounds,
        }
    }

    pub fn center(&self) -> Option<Coordinate> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn bounds(&self) -> &ZoneConfig {
        &self.bounds
    }

    /// Replaces the draft with the zone stored on the backend. The radius is
    /// brought into the editor's range.
    pub fn load(&mut self, zone: Zone) {
        self.center = Some(zone.center);
        self.set_radius(zone.radius_meters);
    }

    /// Sets the radius, clamped to the configured bounds. Non-finite input is
    /// ignored. Returns the radius in effect.
    pub fn set_radius(&mut self, radius: f64) -> f64 {
        if radius.is_finite() {
            self.radius = radius.clamp(self.bounds.min_radius, self.bounds.max_radius);
        }
        self.radius
    }

    pub fn set_center(&mut self, center: Coordinate) {
        debug!("zone center set to {:.6}, {:.6}", center.latitude, center.longitude);
        self.center = Some(center);
    }

    pub fn apply_candidate(&mut self, candidate: &SearchCandidate) {
        self.set_center(candidate.coordinate);
    }

    /// Uses the device position as the center, unless one is already set.
    pub fn adopt_position(&mut self, position: Coordinate) -> bool {
        if self.center.is_some() {
            return false;
        }
        self.set_center(position);
        true
    }

    pub fn to_zone(&self) -> Result<Zone, ZoneError> {
        let center = self.center.ok_or(ZoneError::MissingCenter)?;
        Ok(Zone::new(center, self.radius))
    }
}

/// Makes the radius bounds usable for clamping: non-finite bounds fall back
/// to the defaults and inverted bounds are swapped.
fn normalize_bounds(bounds: ZoneConfig) -> ZoneConfig {
    if !bounds.min_radius.is_finite() || !bounds.max_radius.is_finite() {
        warn!(
            "radius bounds {} - {} are not usable, falling back to defaults",
            bounds.min_radius, bounds.max_radius
        );
        return ZoneConfig::default();
    }

    let mut bounds = bounds;
    if bounds.min_radius > bounds.max_radius {
        warn!(
            "radius bounds inverted ({} > {}), swapping them",
            bounds.min_radius, bounds.max_radius
        );
        std::mem::swap(&mut bounds.min_radius, &mut bounds.max_radius);
    }
    if !bounds.default_radius.is_finite() {
        bounds.default_radius = ZoneConfig::default().default_radius;
    }
    bounds
}

impl Default for ZoneDraft {
    fn default() -> Self {
        Self::new(ZoneConfig::default())
    }
}
