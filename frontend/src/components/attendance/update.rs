//! Message handling for the check-in view.
//!
//! Async work (camera permission prompt, check-in POST) runs in
//! `spawn_local` and reports back through a message; the state changes
//! themselves all happen here.

use engine::checkin::CheckInSubmitter;
use engine::error::CaptureError;
use engine::photo::Camera;
use log::{error, warn};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::components::toast::show_toast;
use crate::platform::camera::BrowserCamera;

use super::messages::Msg;
use super::state::AttendanceComponent;

pub fn update(
    component: &mut AttendanceComponent,
    ctx: &Context<AttendanceComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::ZoneLoaded(Ok(zone)) => {
            if zone.is_none() {
                warn!("no attendance zone configured yet");
            }
            component.session.set_zone(zone);
            true
        }
        Msg::ZoneLoaded(Err(err)) => {
            error!("Error loading zone: {err}");
            false
        }
        Msg::Location(event) => {
            component.session.on_location(event);
            true
        }
        Msg::OpenCamera => {
            if let Err(err) = component.session.camera_mut().begin_open() {
                warn!("{err}");
                return false;
            }
            let camera = BrowserCamera::new(component.video_ref.clone());
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::CameraOpened(camera.open().await));
            });
            true
        }
        Msg::CameraOpened(result) => {
            match component.session.camera_mut().finish_open(result) {
                Ok(()) => {}
                Err(CaptureError::InvalidState { .. }) => {}
                Err(err) => {
                    error!("Camera error: {err}");
                    show_toast("Camera access denied");
                }
            }
            true
        }
        Msg::Capture => {
            if let Err(err) = component.session.camera_mut().capture() {
                error!("Capture failed: {err}");
                show_toast("Could not capture the photo. Please try again.");
            }
            true
        }
        Msg::Retake => {
            if let Err(err) = component.session.camera_mut().retake() {
                warn!("{err}");
            }
            true
        }
        Msg::Submit => {
            if component.submitting {
                return false;
            }
            component.submitting = true;
            let draft = component.session.draft();
            let submitter = CheckInSubmitter::new(component.backend.clone());
            let link = ctx.link().clone();
            spawn_local(async move {
                link.send_message(Msg::Submitted(submitter.submit(draft).await));
            });
            true
        }
        Msg::Submitted(result) => {
            component.submitting = false;
            match result {
                Ok(receipt) => {
                    show_toast(receipt.message());
                    component.session.on_submitted(&receipt);
                }
                Err(err) => show_toast(&err.to_string()),
            }
            true
        }
    }
}
