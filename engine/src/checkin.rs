//! Check-in assembly and submission.

use common::requests::CheckInRequest;
use log::{info, warn};

use crate::backend::AttendanceBackend;
use crate::error::CheckInError;
use crate::membership::MembershipVerdict;
use crate::photo::CapturedPhoto;
use crate::{CheckInStatus, Coordinate, Identity};

/// Everything known at the moment the user presses "Submit".
#[derive(Debug, Clone, Default)]
pub struct CheckInDraft {
    pub identity: Option<Identity>,
    pub coordinate: Option<Coordinate>,
    pub verdict: Option<MembershipVerdict>,
    pub photo: Option<CapturedPhoto>,
}

/// Acknowledgement of an accepted check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInReceipt {
    pub status: CheckInStatus,
    pub with_photo: bool,
}

impl CheckInReceipt {
    pub fn message(&self) -> &'static str {
        match self.status {
            CheckInStatus::InZone => "Check-in successful!",
            CheckInStatus::OutOfZone => "Check-in recorded (Out of zone)",
        }
    }
}

/// Validates a draft and turns it into the request body.
///
/// Identity is checked first, then the coordinate. Without a verdict (zone not
/// loaded) the check-in is recorded as out of zone.
pub fn build_request(draft: CheckInDraft) -> Result<CheckInRequest, CheckInError> {
    let identity = draft.identity.ok_or(CheckInError::NotAuthenticated)?;
    let coordinate = draft.coordinate.ok_or(CheckInError::LocationPending)?;
    let status = draft
        .verdict
        .map(|verdict| verdict.status())
        .unwrap_or(CheckInStatus::OutOfZone);

    Ok(CheckInRequest {
        user_id: identity.id,
        coords: coordinate,
        photo: draft.photo.as_ref().map(CapturedPhoto::to_data_url),
        status,
    })
}

/// Sends check-ins, one attempt per call.
pub struct CheckInSubmitter<B> {
    backend: B,
}

impl<B: AttendanceBackend> CheckInSubmitter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn submit(&self, draft: CheckInDraft) -> Result<CheckInReceipt, CheckInError> {
        let request = build_request(draft)?;
        let receipt = CheckInReceipt {
            status: request.status,
            with_photo: request.photo.is_some(),
        };

        info!(
            "submitting check-in for {} ({}, photo: {})",
            request.user_id,
            request.status.as_str(),
            receipt.with_photo
        );
        if let Err(error) = self.backend.submit_checkin(&request).await {
            warn!("check-in rejected: {error}");
            return Err(error.into());
        }

        info!("check-in accepted for {}", request.user_id);
        Ok(receipt)
    }
}
