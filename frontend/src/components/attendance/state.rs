//! Runtime state of the check-in view.

use engine::location::{LocationTracker, Subscription};
use engine::session::AttendanceSession;
use engine::Identity;
use yew::prelude::*;

use crate::config::engine_config;
use crate::platform::api::HttpBackend;
use crate::platform::camera::BrowserVideo;
use crate::platform::geolocation::BrowserLocationSource;

pub struct AttendanceComponent {
    /// Zone, position, verdict and photo pipeline.
    pub session: AttendanceSession<BrowserVideo>,

    pub tracker: LocationTracker<BrowserLocationSource>,

    /// Live position watch. Dropping it clears the browser watch.
    pub subscription: Option<Subscription<BrowserLocationSource>>,

    pub backend: HttpBackend,

    /// The `<video>` the camera stream plays into. Always mounted so the
    /// stream has somewhere to go before the view re-renders.
    pub video_ref: NodeRef,

    /// A submission is in flight; the submit button is disabled meanwhile.
    pub submitting: bool,
}

impl AttendanceComponent {
    pub fn new(identity: Option<Identity>) -> Self {
        Self {
            session: AttendanceSession::new(identity, &engine_config()),
            tracker: LocationTracker::new(BrowserLocationSource::default()),
            subscription: None,
            backend: HttpBackend::default(),
            video_ref: NodeRef::default(),
            submitting: false,
        }
    }

    /// Stops the position watch and releases the camera.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.tracker.stop(subscription);
        }
        self.session.teardown();
    }
}
