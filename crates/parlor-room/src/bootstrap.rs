use crate::error::RoomError;
use async_trait::async_trait;
use parlor_types::{ConnectionDescriptor, ErrorBody, JoinRequest};
use std::fmt;
use url::Url;

/// Path of the bootstrap endpoint relative to the page origin.
pub const DEFAULT_ENDPOINT_PATH: &str = "/api/connection-details";

/// Overrides the bootstrap endpoint. Absolute URLs are used as-is, relative
/// ones are resolved against the page origin.
pub const ENDPOINT_ENV: &str = "PARLOR_CONN_DETAILS_ENDPOINT";

/// Produces a connection descriptor for a join request.
#[async_trait]
pub trait ConnectionSource: Send + Sync + fmt::Debug {
    async fn fetch(&self, join: &JoinRequest) -> Result<ConnectionDescriptor, RoomError>;
}

/// HTTP client for `POST /api/connection-details`.
#[derive(Debug, Clone)]
pub struct BootstrapClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl BootstrapClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Builds a client for the page served from `origin`, honouring
    /// [`ENDPOINT_ENV`] when it is set.
    pub fn for_origin(origin: &Url) -> Result<Self, RoomError> {
        let configured = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());
        let endpoint = resolve_endpoint(origin, configured.as_deref())?;
        Ok(Self::new(endpoint))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Resolves the endpoint URL against `origin`, defaulting to
/// [`DEFAULT_ENDPOINT_PATH`].
pub fn resolve_endpoint(origin: &Url, configured: Option<&str>) -> Result<Url, RoomError> {
    Ok(origin.join(configured.unwrap_or(DEFAULT_ENDPOINT_PATH))?)
}

#[async_trait]
impl ConnectionSource for BootstrapClient {
    async fn fetch(&self, join: &JoinRequest) -> Result<ConnectionDescriptor, RoomError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(join)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<ConnectionDescriptor>().await?);
        }

        // Error bodies are best effort; fall back to the status text.
        let text = response.text().await.unwrap_or_default();
        let message = error_message(&text).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
        tracing::warn!(status = status.as_u16(), %message, "bootstrap request failed");
        Err(RoomError::Bootstrap {
            status: status.as_u16(),
            message,
        })
    }
}

fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .map(|body| body.error)
}
