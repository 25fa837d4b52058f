//! Error types, one enum per concern.
//!
//! None of these is fatal to the process: each one ends the single operation
//! that raised it, and recovery is always a user action (press the button
//! again). Nothing in the engine retries on its own.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location unavailable: {0}")]
    Unavailable(String),

    #[error("A location subscription is already active")]
    AlreadyTracking,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Geocoding request failed: {0}")]
    Transport(String),

    #[error("Geocoding response could not be decoded: {0}")]
    Decode(String),
}

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Camera permission denied")]
    PermissionDenied,

    #[error("Camera unavailable: {0}")]
    CameraUnavailable(String),

    #[error("Cannot {action} while the camera is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("Could not read a video frame: {0}")]
    Frame(String),

    #[error("Image processing failed: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Text suitable for a one-line alert: the server's own message when it
    /// sent one, the transport error otherwise.
    pub fn user_message(&self) -> &str {
        match self {
            BackendError::Rejected { message, .. } => message,
            BackendError::Transport(message) | BackendError::Decode(message) => message,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckInError {
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Waiting for a location fix")]
    LocationPending,

    #[error("Check-in failed: {}", .0.user_message())]
    Submission(#[from] BackendError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZoneError {
    #[error("Zone has no center yet")]
    MissingCenter,
}
