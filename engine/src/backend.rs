//! The attendance backend as seen from the client.
//!
//! Only the calls the engine makes are modelled; authentication, user
//! management and history listing belong to other parts of the product.

use async_trait::async_trait;
use common::requests::CheckInRequest;

use crate::error::BackendError;
use crate::Zone;

#[async_trait(?Send)]
pub trait AttendanceBackend {
    /// `GET /zone`. `None` when no zone has been configured yet.
    async fn load_zone(&self) -> Result<Option<Zone>, BackendError>;

    /// `POST /zone`.
    async fn save_zone(&self, zone: &Zone) -> Result<(), BackendError>;

    /// `POST /checkin`.
    async fn submit_checkin(&self, request: &CheckInRequest) -> Result<(), BackendError>;
}
