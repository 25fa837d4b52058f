//! Attendance verification engine.
//!
//! Everything a check-in needs besides the UI: great-circle distance,
//! zone membership, the device location stream, debounced place search for
//! zone configuration, the camera capture and compression pipeline, and the
//! submission of the final check-in to the backend.
//!
//! Platform capabilities (position watch, camera, geocoding, timers, the
//! backend) are traits, so the browser client plugs in its own adapters and
//! tests plug in fakes. The engine is single-threaded: shared state lives in
//! `Rc`/`Cell` and every async trait is `?Send`.

pub mod backend;
pub mod checkin;
pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod membership;
pub mod photo;
pub mod search;
pub mod session;
pub mod zone;

pub use common::model::checkin::CheckInStatus;
pub use common::model::coordinate::Coordinate;
pub use common::model::identity::Identity;
pub use common::model::zone::Zone;

#[cfg(test)]
pub(crate) mod testing;
