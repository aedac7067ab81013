//! Thin client for the Mailjet REST API

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::errors::MailjetError;
use crate::payload::SendPayload;

/// Production endpoint of the Mailjet v3 API
pub const API_BASE: &str = "https://api.mailjet.com/v3";

/// Resource path of the send endpoint
pub const SEND_RESOURCE: &str = "send";

/// Parsed response from a Mailjet API call
///
/// A non-2xx status is not an error at this level; the caller inspects
/// `success()` and `count()`.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code of the response
    pub status: u16,
    /// Raw response body; a JSON document when the API returned one
    pub body: Value,
}

impl ApiResponse {
    /// True when the API call returned a 2xx status
    pub fn success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Number of messages the provider reports as sent
    pub fn count(&self) -> usize {
        self.body
            .get("Sent")
            .and_then(Value::as_array)
            .map(|sent| sent.len())
            .unwrap_or(0)
    }
}

/// Authenticated HTTP client for the Mailjet API
pub struct MailjetClient {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl MailjetClient {
    /// Create a client for the production API
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, MailjetError> {
        Self::with_base_url(api_key, api_secret, API_BASE.to_string())
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
        base_url: String,
    ) -> Result<Self, MailjetError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MailjetError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            base_url,
        })
    }

    /// POST a payload to an API resource with basic auth.
    ///
    /// Network-level failures surface as [`MailjetError::Transport`]; an
    /// HTTP response of any status is returned as an [`ApiResponse`].
    pub async fn post(
        &self,
        resource: &str,
        payload: &SendPayload,
    ) -> Result<ApiResponse, MailjetError> {
        let url = format!("{}/{}", self.base_url, resource);
        debug!("Posting to Mailjet resource: {}", resource);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.api_key, Some(&self.api_secret))
            .json(payload)
            .send()
            .await
            .map_err(|e| MailjetError::Transport(format!("Failed to call Mailjet API: {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| MailjetError::Transport(format!("Failed to read API response: {}", e)))?;

        // Error responses are not always JSON; keep the raw text inspectable.
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(ApiResponse { status, body })
    }
}
