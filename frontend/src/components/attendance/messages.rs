use engine::checkin::CheckInReceipt;
use engine::error::{BackendError, CaptureError, CheckInError};
use engine::location::LocationEvent;
use engine::Zone;

use crate::platform::camera::BrowserVideo;

pub enum Msg {
    ZoneLoaded(Result<Option<Zone>, BackendError>),
    Location(LocationEvent),
    OpenCamera,
    CameraOpened(Result<BrowserVideo, CaptureError>),
    Capture,
    Retake,
    Submit,
    Submitted(Result<CheckInReceipt, CheckInError>),
}
