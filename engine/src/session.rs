//! The employee attendance view as one state machine.
//!
//! The session caches the zone and the latest position, keeps the verdict in
//! sync with both, owns the photo pipeline, and assembles the check-in draft.
//! It does no I/O itself: the caller feeds it location events and backend
//! answers, and runs the async parts (camera, submission) on the side.

use log::{info, warn};

use crate::checkin::{CheckInDraft, CheckInReceipt};
use crate::config::EngineConfig;
use crate::error::LocationError;
use crate::location::LocationEvent;
use crate::membership::{evaluate, MembershipVerdict};
use crate::photo::{CapturedPhoto, PhotoCapture, VideoSource};
use crate::{Coordinate, Identity, Zone};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationStatus {
    /// No fix yet.
    Pending,
    Tracking,
    /// The last watch event was an error.
    Unavailable(LocationError),
}

pub struct AttendanceSession<V: VideoSource> {
    identity: Option<Identity>,
    zone: Option<Zone>,
    position: Option<Coordinate>,
    verdict: Option<MembershipVerdict>,
    location: LocationStatus,
    fallback: Option<Coordinate>,
    camera: PhotoCapture<V>,
}

impl<V: VideoSource> AttendanceSession<V> {
    pub fn new(identity: Option<Identity>, config: &EngineConfig) -> Self {
        Self {
            identity,
            zone: None,
            position: None,
            verdict: None,
            location: LocationStatus::Pending,
            fallback: config.location.fallback,
            camera: PhotoCapture::new(config.capture.clone()),
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn zone(&self) -> Option<&Zone> {
        self.zone.as_ref()
    }

    pub fn position(&self) -> Option<Coordinate> {
        self.position
    }

    pub fn verdict(&self) -> Option<MembershipVerdict> {
        self.verdict
    }

    pub fn location_status(&self) -> &LocationStatus {
        &self.location
    }

    pub fn camera(&self) -> &PhotoCapture<V> {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut PhotoCapture<V> {
        &mut self.camera
    }

    pub fn set_zone(&mut self, zone: Option<Zone>) {
        self.zone = zone;
        self.reevaluate();
    }

    pub fn on_location(&mut self, event: LocationEvent) {
        match event {
            Ok(sample) => self.on_sample(sample),
            Err(error) => self.on_location_error(error),
        }
    }

    pub fn on_sample(&mut self, sample: Coordinate) {
        self.position = Some(sample);
        self.location = LocationStatus::Tracking;
        self.reevaluate();
    }

    /// Records a watch failure. On permission denial with a configured
    /// fallback and no fix so far, the fallback is used as the position.
    /// A previous fix is kept either way.
    pub fn on_location_error(&mut self, error: LocationError) {
        if error == LocationError::PermissionDenied && self.position.is_none() {
            if let Some(fallback) = self.fallback {
                warn!(
                    "location denied, using configured fallback {:.4}, {:.4}",
                    fallback.latitude, fallback.longitude
                );
                self.on_sample(fallback);
                return;
            }
        }
        self.location = LocationStatus::Unavailable(error);
    }

    /// Headline shown above the camera controls.
    pub fn status_line(&self) -> String {
        match (&self.verdict, &self.location) {
            (Some(verdict), _) if verdict.in_zone => "You are in the zone".to_string(),
            (Some(verdict), _) => {
                format!("Out of zone (Dist: {}m)", verdict.distance_meters.round())
            }
            (None, LocationStatus::Unavailable(_)) if self.position.is_none() => {
                "Location unavailable".to_string()
            }
            _ => "Checking location...".to_string(),
        }
    }

    pub fn draft(&self) -> CheckInDraft {
        CheckInDraft {
            identity: self.identity.clone(),
            coordinate: self.position,
            verdict: self.verdict,
            photo: self.camera.photo().cloned(),
        }
    }

    /// Clears the photo once the backend accepted the check-in.
    pub fn on_submitted(&mut self, receipt: &CheckInReceipt) -> Option<CapturedPhoto> {
        info!("check-in completed: {}", receipt.status.as_str());
        self.camera.take_photo()
    }

    /// Releases the camera. Call when the view goes away.
    pub fn teardown(&mut self) {
        self.camera.close();
    }

    fn reevaluate(&mut self) {
        self.verdict = evaluate(self.position, self.zone.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AttendanceBackend;
    use crate::checkin::CheckInSubmitter;
    use crate::error::CheckInError;
    use crate::location::LocationTracker;
    use crate::photo::Phase;
    use crate::testing::{init_logging, FakeBackend, FakeCamera, FakeLocationSource, FakeVideo};
    use crate::CheckInStatus;
    use futures::StreamExt;

    const CENTER: Coordinate = Coordinate::new(33.5731, -7.5898);

    fn session(identity: Option<Identity>) -> AttendanceSession<FakeVideo> {
        init_logging();
        AttendanceSession::new(identity, &EngineConfig::default())
    }

    fn north_of(center: Coordinate, meters: f64) -> Coordinate {
        Coordinate::new(center.latitude + meters / 111_195.0, center.longitude)
    }

    #[test]
    fn status_follows_samples_and_zone() {
        let mut session = session(Some(Identity::new("emp-1")));
        assert_eq!(session.status_line(), "Checking location...");

        session.on_sample(CENTER);
        assert_eq!(session.status_line(), "Checking location...");
        assert!(session.verdict().is_none());

        session.set_zone(Some(Zone::new(CENTER, 100.0)));
        assert_eq!(session.status_line(), "You are in the zone");
        assert_eq!(session.verdict().unwrap().distance_meters, 0.0);

        session.on_sample(north_of(CENTER, 150.0));
        let verdict = session.verdict().unwrap();
        assert!(!verdict.in_zone);
        assert!((verdict.distance_meters - 150.0).abs() <= 5.0);
        assert_eq!(session.status_line(), "Out of zone (Dist: 150m)");
    }

    #[test]
    fn denial_without_fallback_is_unavailable() {
        let mut session = session(None);
        session.on_location(Err(LocationError::PermissionDenied));
        assert_eq!(
            session.location_status(),
            &LocationStatus::Unavailable(LocationError::PermissionDenied)
        );
        assert_eq!(session.status_line(), "Location unavailable");
        assert!(session.position().is_none());
    }

    #[test]
    fn configured_fallback_is_used_on_denial() {
        let mut config = EngineConfig::default();
        config.location.fallback = Some(CENTER);
        let mut session: AttendanceSession<FakeVideo> = AttendanceSession::new(None, &config);
        session.set_zone(Some(Zone::new(CENTER, 100.0)));

        session.on_location(Err(LocationError::PermissionDenied));
        assert_eq!(session.position(), Some(CENTER));
        assert_eq!(session.location_status(), &LocationStatus::Tracking);
        assert_eq!(session.status_line(), "You are in the zone");
    }

    #[test]
    fn later_error_keeps_the_last_fix() {
        let mut session = session(None);
        session.set_zone(Some(Zone::new(CENTER, 100.0)));
        session.on_sample(CENTER);
        session.on_location(Err(LocationError::Unavailable("timeout".to_string())));

        assert_eq!(session.position(), Some(CENTER));
        assert_eq!(session.status_line(), "You are in the zone");
    }

    #[tokio::test]
    async fn tracked_position_photo_and_submission_end_to_end() {
        let backend = FakeBackend::with_zone(Zone::new(CENTER, 100.0));
        let tracker = LocationTracker::new(FakeLocationSource::default());
        let camera = FakeCamera::new(640, 480);
        let mut session = session(Some(Identity::new("emp-7")));

        session.set_zone(backend.load_zone().await.unwrap());

        let (subscription, mut samples) = tracker.start().unwrap();
        tracker.source().emit(CENTER.latitude, CENTER.longitude);
        session.on_location(samples.next().await.unwrap());
        assert_eq!(session.status_line(), "You are in the zone");

        session.camera_mut().open(&camera).await.unwrap();
        session.camera_mut().capture().unwrap();
        assert_eq!(camera.stops(), 1);

        let submitter = CheckInSubmitter::new(backend);
        let receipt = submitter.submit(session.draft()).await.unwrap();
        assert_eq!(receipt.status, CheckInStatus::InZone);
        assert!(receipt.with_photo);
        assert!(session.on_submitted(&receipt).is_some());
        assert_eq!(session.camera().phase(), Phase::Closed);

        let sent = submitter.backend().submitted.borrow();
        assert!(sent[0]
            .photo
            .as_deref()
            .unwrap()
            .starts_with("data:image/jpeg;base64,"));

        tracker.stop(subscription);
        assert!(!tracker.is_tracking());
    }

    #[tokio::test]
    async fn failed_submission_keeps_the_photo_for_a_manual_retry() {
        let backend = FakeBackend::rejecting(crate::error::BackendError::Transport(
            "network down".to_string(),
        ));
        let camera = FakeCamera::new(320, 240);
        let mut session = session(Some(Identity::new("emp-7")));
        session.on_sample(CENTER);
        session.camera_mut().open(&camera).await.unwrap();
        session.camera_mut().capture().unwrap();

        let submitter = CheckInSubmitter::new(backend);
        let err = submitter.submit(session.draft()).await.unwrap_err();
        assert!(matches!(err, CheckInError::Submission(_)));
        assert_eq!(session.camera().phase(), Phase::Captured);
    }

    #[tokio::test]
    async fn anonymous_submission_never_reaches_the_network() {
        let session = session(None);
        let submitter = CheckInSubmitter::new(FakeBackend::default());

        let err = submitter.submit(session.draft()).await.unwrap_err();
        assert_eq!(err, CheckInError::NotAuthenticated);
        assert_eq!(submitter.backend().calls(), 0);
    }

    #[tokio::test]
    async fn teardown_releases_an_open_camera() {
        let camera = FakeCamera::new(320, 240);
        let mut session = session(None);
        session.camera_mut().open(&camera).await.unwrap();

        session.teardown();
        assert_eq!(camera.stops(), 1);
        assert_eq!(session.camera().phase(), Phase::Closed);
    }
}
