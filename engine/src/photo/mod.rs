//! Camera capture pipeline.
//!
//! `Closed -> Opening -> Streaming -> Captured -> Closed`. While streaming
//! the live source sits inside a [`StreamGuard`], which stops every media
//! track when it is dropped; the pipeline drops it on capture, on close and
//! when the pipeline itself goes away, so no exit path leaves the camera on.

pub mod compress;

use std::fmt;
use std::mem;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::DynamicImage;
use log::{info, warn};

use crate::config::CaptureConfig;
use crate::error::CaptureError;

pub const JPEG_MIME: &str = "image/jpeg";

/// The compressed photo attached to a check-in.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedPhoto {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl CapturedPhoto {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mime_type(&self) -> &'static str {
        JPEG_MIME
    }

    /// `data:image/jpeg;base64,...`, the form the backend stores and an
    /// `<img src>` can display directly.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", JPEG_MIME, BASE64.encode(&self.bytes))
    }
}

impl fmt::Debug for CapturedPhoto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedPhoto")
            .field("bytes", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// A live camera feed.
pub trait VideoSource {
    /// The frame currently shown by the feed.
    fn frame(&self) -> Result<DynamicImage, CaptureError>;

    /// Stops every underlying media track. Called exactly once, by the guard.
    fn stop(&mut self);
}

/// Platform camera access.
#[async_trait(?Send)]
pub trait Camera {
    type Source: VideoSource;

    async fn open(&self) -> Result<Self::Source, CaptureError>;
}

/// Owns a live source and stops it when dropped.
pub struct StreamGuard<V: VideoSource> {
    source: Option<V>,
}

impl<V: VideoSource> StreamGuard<V> {
    pub fn new(source: V) -> Self {
        Self {
            source: Some(source),
        }
    }

    pub fn source(&self) -> Option<&V> {
        self.source.as_ref()
    }

    pub fn release(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.stop();
            info!("camera stream stopped");
        }
    }
}

impl<V: VideoSource> Drop for StreamGuard<V> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Observable pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Opening,
    Streaming,
    Captured,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Closed => "closed",
            Phase::Opening => "opening",
            Phase::Streaming => "streaming",
            Phase::Captured => "captured",
        }
    }
}

enum State<V: VideoSource> {
    Closed,
    Opening,
    Streaming(StreamGuard<V>),
    Captured(CapturedPhoto),
}

pub struct PhotoCapture<V: VideoSource> {
    state: State<V>,
    config: CaptureConfig,
}

impl<V: VideoSource> PhotoCapture<V> {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            state: State::Closed,
            config,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            State::Closed => Phase::Closed,
            State::Opening => Phase::Opening,
            State::Streaming(_) => Phase::Streaming,
            State::Captured(_) => Phase::Captured,
        }
    }

    pub fn photo(&self) -> Option<&CapturedPhoto> {
        match &self.state {
            State::Captured(photo) => Some(photo),
            _ => None,
        }
    }

    /// Requests the camera and waits for the platform's answer.
    pub async fn open<C>(&mut self, camera: &C) -> Result<(), CaptureError>
    where
        C: Camera<Source = V> + ?Sized,
    {
        self.begin_open()?;
        let result = camera.open().await;
        self.finish_open(result)
    }

    /// First half of [`open`](Self::open), for callers that cannot hold the
    /// pipeline across the await (UI message loops).
    pub fn begin_open(&mut self) -> Result<(), CaptureError> {
        self.require(Phase::Closed, "open the camera")?;
        self.state = State::Opening;
        info!("requesting camera");
        Ok(())
    }

    /// Second half of [`open`](Self::open). A source that arrives after the
    /// pipeline was closed in the meantime is stopped immediately.
    pub fn finish_open(&mut self, result: Result<V, CaptureError>) -> Result<(), CaptureError> {
        if self.phase() != Phase::Opening {
            if let Ok(source) = result {
                StreamGuard::new(source).release();
            }
            return Err(self.invalid("finish opening the camera"));
        }

        match result {
            Ok(source) => {
                self.state = State::Streaming(StreamGuard::new(source));
                info!("camera streaming");
                Ok(())
            }
            Err(err) => {
                self.state = State::Closed;
                warn!("camera unavailable: {err}");
                Err(err)
            }
        }
    }

    /// Freezes the current frame, releases the camera and keeps only the
    /// compressed photo. The camera is released even when capture fails.
    pub fn capture(&mut self) -> Result<&CapturedPhoto, CaptureError> {
        self.require(Phase::Streaming, "capture")?;
        let State::Streaming(guard) = mem::replace(&mut self.state, State::Closed) else {
            return Err(self.invalid("capture"));
        };

        let frame = guard
            .source()
            .ok_or_else(|| CaptureError::Frame("stream already stopped".to_string()))
            .and_then(|source| source.frame());
        guard.release();

        let frozen = compress::rasterize(&frame?, &self.config)?;
        let photo = compress::compress(&frozen, &self.config)?;
        info!(
            "photo captured: {}x{}, {} bytes",
            photo.width(),
            photo.height(),
            photo.len()
        );

        self.state = State::Captured(photo);
        match &self.state {
            State::Captured(photo) => Ok(photo),
            _ => Err(self.invalid("capture")),
        }
    }

    /// Discards the captured photo; the camera has to be opened again.
    pub fn retake(&mut self) -> Result<(), CaptureError> {
        self.require(Phase::Captured, "retake")?;
        self.state = State::Closed;
        info!("photo discarded for retake");
        Ok(())
    }

    /// Hands the captured photo over (after a successful check-in).
    pub fn take_photo(&mut self) -> Option<CapturedPhoto> {
        match mem::replace(&mut self.state, State::Closed) {
            State::Captured(photo) => Some(photo),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Returns to `Closed` from any state, stopping the camera if it is on.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    fn require(&self, phase: Phase, action: &'static str) -> Result<(), CaptureError> {
        if self.phase() == phase {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn invalid(&self, action: &'static str) -> CaptureError {
        CaptureError::InvalidState {
            action,
            state: self.phase().as_str(),
        }
    }
}
