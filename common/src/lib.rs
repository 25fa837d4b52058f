//! Wire models shared by the attendance engine and the browser client.
//!
//! Field names follow the JSON the attendance backend already speaks
//! (`lat`/`lng`, `radius`, `userId`), so every type here can be posted or
//! parsed as-is.

pub mod model;
pub mod requests;
