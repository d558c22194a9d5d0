//! Forwards email dispatch requests to the webhook that sends the templated email.

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::EmailDispatchRequest;
use crate::errors::ServiceError;
use crate::upstream;

pub const WEBHOOK_FAILED: &str = "Cloudflare request failed";

#[derive(Debug, Clone)]
pub struct EmailDispatcher {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl EmailDispatcher {
    /// `endpoint` may be unset; dispatch then fails per request rather than at startup.
    pub fn new(client: reqwest::Client, endpoint: Option<String>) -> Self {
        Self { client, endpoint }
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// POST the payload once and classify the webhook's answer.
    ///
    /// Returns the parsed success body (`{}` if it is not JSON).
    pub async fn dispatch(&self, req: &EmailDispatchRequest) -> Result<Value, ServiceError> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| ServiceError::unexpected("SENDGRID_ENDPOINT is not configured"))?;

        let resp = self.client.post(endpoint).json(req).send().await?;
        let status = resp.status();
        debug!(status = status.as_u16(), "webhook responded");

        if !status.is_success() {
            let body = upstream::text_or_empty(resp).await;
            warn!(status = status.as_u16(), "webhook returned non-success status");
            return Err(ServiceError::Upstream {
                error: WEBHOOK_FAILED.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = upstream::text_or_empty(resp).await;
        Ok(upstream::json_or_empty_object(&text))
    }
}
