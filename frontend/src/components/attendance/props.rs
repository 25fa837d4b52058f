use engine::Identity;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct AttendanceProps {
    /// Signed-in user. Without one the view still tracks and captures, but
    /// submission is refused before any request is made.
    #[prop_or_default]
    pub identity: Option<Identity>,
}
