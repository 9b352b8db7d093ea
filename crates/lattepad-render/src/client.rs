use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};
use ureq::Agent;
use ureq::http;

use crate::error::RenderError;
use crate::request::RenderRequest;

/// Endpoint of the public playground instance of the rendering service.
pub const DEFAULT_ENDPOINT: &str = "http://35.235.126.220/generate";

/// Upper bound on how much of a response body gets buffered.
const MAX_DOCUMENT_BYTES: u64 = 64 * 1024 * 1024;

/// Error body the service sends alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
    #[serde(default)]
    data: Option<String>,
}

/// Client for the rendering service's generate endpoint.
///
/// Holds a reusable agent. `render` blocks until the service answers and is
/// expected to be driven from a worker thread by async callers.
#[derive(Clone)]
pub struct RenderClient {
    agent: Agent,
    endpoint: String,
}

impl RenderClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, None)
    }

    /// A client with a global per-request timeout. `None` waits indefinitely,
    /// matching the playground's historical behavior.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Option<Duration>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();
        Self {
            agent: config.new_agent(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one render request and return the document bytes.
    ///
    /// A 2xx body comes back as-is, with no content validation. Non-2xx
    /// responses are decoded from the service's JSON error body when
    /// possible.
    pub fn render(&self, request: &RenderRequest) -> Result<Vec<u8>, RenderError> {
        info!(
            endpoint = %self.endpoint,
            template_len = request.template.len(),
            "submitting render request"
        );

        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Access-Control-Allow-Origin", "*")
            .send_json(request)
            .map_err(|e| RenderError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(service_error(status.as_u16(), &mut response));
        }

        let bytes = response
            .body_mut()
            .with_config()
            .limit(MAX_DOCUMENT_BYTES)
            .read_to_vec()
            .map_err(|e| RenderError::Body(e.to_string()))?;

        debug!(bytes = bytes.len(), "render response received");
        Ok(bytes)
    }
}

fn service_error(status: u16, response: &mut http::Response<ureq::Body>) -> RenderError {
    let text = response.body_mut().read_to_string().unwrap_or_default();

    let message = match serde_json::from_str::<ServiceError>(&text) {
        Ok(ServiceError {
            error,
            data: Some(data),
        }) if !data.is_empty() => format!("{error} ({data})"),
        Ok(ServiceError { error, .. }) => error,
        Err(_) if !text.trim().is_empty() => text.trim().to_string(),
        Err(_) => "rendering service reported no detail".to_string(),
    };

    RenderError::Service { status, message }
}
