//! In-memory stand-ins for the platform traits, shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use common::model::place::GeocodedPlace;
use common::requests::CheckInRequest;
use image::{DynamicImage, Rgb, RgbImage};

use crate::backend::AttendanceBackend;
use crate::error::{BackendError, CaptureError, LocationError, SearchError};
use crate::location::{LocationSink, LocationSource, WatchId};
use crate::photo::{Camera, VideoSource};
use crate::search::{Geocoder, Timer};
use crate::Zone;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Gradient with deterministic noise, so JPEG has real work to do.
pub fn noisy_frame(width: u32, height: u32) -> DynamicImage {
    let mut seed: u32 = 0x2545_f491;
    let img = RgbImage::from_fn(width, height, |x, y| {
        seed ^= seed << 13;
        seed ^= seed >> 17;
        seed ^= seed << 5;
        let noise = (seed % 48) as u8;
        let r = ((x * 255) / width.max(1)) as u8;
        let g = ((y * 255) / height.max(1)) as u8;
        Rgb([r.saturating_add(noise), g.saturating_add(noise / 2), 128u8.saturating_sub(noise)])
    });
    DynamicImage::ImageRgb8(img)
}

pub fn place(name: &str, lat: f64, lon: f64) -> GeocodedPlace {
    GeocodedPlace {
        display_name: name.to_string(),
        lat: lat.to_string(),
        lon: lon.to_string(),
    }
}

pub struct TokioTimer;

#[async_trait(?Send)]
impl Timer for TokioTimer {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Default)]
pub struct FakeLocationSource {
    sink: RefCell<Option<LocationSink>>,
    queued: RefCell<Vec<(f64, f64)>>,
    next_id: Cell<WatchId>,
    cleared: RefCell<Vec<WatchId>>,
    unsupported: bool,
}

impl FakeLocationSource {
    pub fn unsupported() -> Self {
        Self {
            unsupported: true,
            ..Self::default()
        }
    }

    /// Fix delivered as soon as the next watch starts.
    pub fn queue(&self, latitude: f64, longitude: f64) {
        self.queued.borrow_mut().push((latitude, longitude));
    }

    pub fn emit(&self, latitude: f64, longitude: f64) {
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink.sample(latitude, longitude);
        }
    }

    pub fn fail(&self, error: LocationError) {
        if let Some(sink) = self.sink.borrow().as_ref() {
            sink.fail(error);
        }
    }

    /// Drops the sink, which ends the stream.
    pub fn end(&self) {
        self.sink.borrow_mut().take();
    }

    pub fn cleared(&self) -> Vec<WatchId> {
        self.cleared.borrow().clone()
    }
}

impl LocationSource for FakeLocationSource {
    fn watch(&self, sink: LocationSink) -> Result<WatchId, LocationError> {
        if self.unsupported {
            return Err(LocationError::Unavailable(
                "geolocation not supported".to_string(),
            ));
        }
        for (latitude, longitude) in self.queued.borrow_mut().drain(..) {
            sink.sample(latitude, longitude);
        }
        *self.sink.borrow_mut() = Some(sink);
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(id)
    }

    fn clear_watch(&self, id: WatchId) {
        self.sink.borrow_mut().take();
        self.cleared.borrow_mut().push(id);
    }
}

pub struct FakeVideo {
    frame: Option<DynamicImage>,
    stops: Rc<Cell<u32>>,
}

impl VideoSource for FakeVideo {
    fn frame(&self) -> Result<DynamicImage, CaptureError> {
        self.frame
            .clone()
            .ok_or_else(|| CaptureError::Frame("video has no data yet".to_string()))
    }

    fn stop(&mut self) {
        self.stops.set(self.stops.get() + 1);
    }
}

pub struct FakeCamera {
    frame: Option<DynamicImage>,
    denied: bool,
    opens: Cell<u32>,
    stops: Rc<Cell<u32>>,
}

impl FakeCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: Some(noisy_frame(width, height)),
            denied: false,
            opens: Cell::new(0),
            stops: Rc::new(Cell::new(0)),
        }
    }

    pub fn denied() -> Self {
        Self {
            denied: true,
            ..Self::without_frames()
        }
    }

    pub fn without_frames() -> Self {
        Self {
            frame: None,
            denied: false,
            opens: Cell::new(0),
            stops: Rc::new(Cell::new(0)),
        }
    }

    pub fn opens(&self) -> u32 {
        self.opens.get()
    }

    pub fn stops(&self) -> u32 {
        self.stops.get()
    }
}

#[async_trait(?Send)]
impl Camera for FakeCamera {
    type Source = FakeVideo;

    async fn open(&self) -> Result<FakeVideo, CaptureError> {
        if self.denied {
            return Err(CaptureError::PermissionDenied);
        }
        self.opens.set(self.opens.get() + 1);
        Ok(FakeVideo {
            frame: self.frame.clone(),
            stops: Rc::clone(&self.stops),
        })
    }
}

pub struct FakeGeocoder {
    start: tokio::time::Instant,
    delays: RefCell<HashMap<String, Duration>>,
    responses: RefCell<HashMap<String, Vec<GeocodedPlace>>>,
    failing: RefCell<Vec<String>>,
    calls: RefCell<Vec<(Duration, String)>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self {
            start: tokio::time::Instant::now(),
            delays: RefCell::default(),
            responses: RefCell::default(),
            failing: RefCell::default(),
            calls: RefCell::default(),
        }
    }

    pub fn respond_after(&self, text: &str, delay: Duration) {
        self.delays.borrow_mut().insert(text.to_string(), delay);
    }

    pub fn respond_with(&self, text: &str, places: Vec<GeocodedPlace>) {
        self.responses.borrow_mut().insert(text.to_string(), places);
    }

    pub fn fail_on(&self, text: &str) {
        self.failing.borrow_mut().push(text.to_string());
    }

    /// Every request, with its time since the fake was created.
    pub fn calls(&self) -> Vec<(Duration, String)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Geocoder for FakeGeocoder {
    async fn search(&self, text: &str, _limit: usize) -> Result<Vec<GeocodedPlace>, SearchError> {
        self.calls
            .borrow_mut()
            .push((self.start.elapsed(), text.to_string()));

        let delay = self.delays.borrow().get(text).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.borrow().iter().any(|failing| failing == text) {
            return Err(SearchError::Transport("connection reset".to_string()));
        }
        let canned = self.responses.borrow().get(text).cloned();
        Ok(canned.unwrap_or_else(|| vec![place(text, 10.0, 10.0)]))
    }
}

#[derive(Default)]
pub struct FakeBackend {
    pub zone: RefCell<Option<Zone>>,
    pub saved: RefCell<Vec<Zone>>,
    pub submitted: RefCell<Vec<CheckInRequest>>,
    pub reject_with: RefCell<Option<BackendError>>,
}

impl FakeBackend {
    pub fn with_zone(zone: Zone) -> Self {
        let backend = Self::default();
        *backend.zone.borrow_mut() = Some(zone);
        backend
    }

    pub fn rejecting(error: BackendError) -> Self {
        let backend = Self::default();
        *backend.reject_with.borrow_mut() = Some(error);
        backend
    }

    pub fn calls(&self) -> usize {
        self.submitted.borrow().len()
    }
}

#[async_trait(?Send)]
impl AttendanceBackend for FakeBackend {
    async fn load_zone(&self) -> Result<Option<Zone>, BackendError> {
        Ok(*self.zone.borrow())
    }

    async fn save_zone(&self, zone: &Zone) -> Result<(), BackendError> {
        self.saved.borrow_mut().push(*zone);
        *self.zone.borrow_mut() = Some(*zone);
        Ok(())
    }

    async fn submit_checkin(&self, request: &CheckInRequest) -> Result<(), BackendError> {
        self.submitted.borrow_mut().push(request.clone());
        match self.reject_with.borrow().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
