use engine::error::{BackendError, LocationError};
use engine::search::SearchOutcome;
use engine::{Coordinate, Zone};

pub enum Msg {
    ZoneLoaded(Result<Option<Zone>, BackendError>),
    /// Answer to a position lookup. Centers the zone when the user asked
    /// for it, otherwise only fills in a missing center.
    PositionFound(Result<Coordinate, LocationError>),
    /// Explicit request to center the zone on the device.
    UseMyPosition,
    SetRadius(String),
    SetLatitude(String),
    SetLongitude(String),
    /// Keystroke in the search box; debounced.
    SearchInput(String),
    /// Enter in the search box; searches right away.
    SearchSubmit,
    SearchDone(SearchOutcome),
    SelectCandidate(usize),
    Save,
    Saved(Result<(), BackendError>),
}
