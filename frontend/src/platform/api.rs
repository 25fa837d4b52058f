//! REST client for the attendance backend.

use async_trait::async_trait;
use common::requests::{CheckInRequest, ErrorResponse};
use engine::backend::AttendanceBackend;
use engine::error::BackendError;
use engine::Zone;
use gloo_net::http::{Request, Response};

use crate::config::API_PATH;

#[derive(Clone)]
pub struct HttpBackend {
    base: String,
}

impl HttpBackend {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

impl Default for HttpBackend {
    fn default() -> Self {
        Self::new(API_PATH)
    }
}

fn transport(error: gloo_net::Error) -> BackendError {
    BackendError::Transport(error.to_string())
}

/// Passes 2xx responses through and turns anything else into
/// [`BackendError::Rejected`], using the server's `{ "error": ... }` body
/// when it sent one.
async fn accepted(response: Response) -> Result<Response, BackendError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) if !body.trim().is_empty() => body,
        Err(_) => response.status_text(),
    };
    Err(BackendError::Rejected { status, message })
}

#[async_trait(?Send)]
impl AttendanceBackend for HttpBackend {
    async fn load_zone(&self) -> Result<Option<Zone>, BackendError> {
        let response = Request::get(&self.url("/zone"))
            .send()
            .await
            .map_err(transport)?;
        accepted(response)
            .await?
            .json::<Option<Zone>>()
            .await
            .map_err(|error| BackendError::Decode(error.to_string()))
    }

    async fn save_zone(&self, zone: &Zone) -> Result<(), BackendError> {
        let response = Request::post(&self.url("/zone"))
            .json(zone)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        accepted(response).await.map(|_| ())
    }

    async fn submit_checkin(&self, request: &CheckInRequest) -> Result<(), BackendError> {
        let response = Request::post(&self.url("/checkin"))
            .json(request)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?;
        accepted(response).await.map(|_| ())
    }
}
