//! Mailjet transport: credentials, listeners and the send lifecycle

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::client::{ApiResponse, MailjetClient, API_BASE, SEND_RESOURCE};
use crate::errors::MailjetError;
use crate::events::{SendEvent, SendListener, SendOutcome};
use crate::message::Message;
use crate::payload::SendPayload;

/// Sends a structured message through an email provider
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one message and return the provider-reported accepted count
    async fn send(&mut self, message: &Message) -> Result<usize, MailjetError>;
}

/// Transport over the Mailjet v3 send API
///
/// Holds the configured credentials, the registered send listeners and the
/// raw result of the last API call. One `send` call performs exactly one
/// API request; there is no retry logic.
pub struct MailjetTransport {
    api_key: Option<String>,
    api_secret: Option<String>,
    base_url: String,
    listeners: Vec<Arc<dyn SendListener>>,
    last_result: Option<ApiResponse>,
}

impl Default for MailjetTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MailjetTransport {
    /// Create an unconfigured transport against the production API
    pub fn new() -> Self {
        Self::with_base_url(API_BASE.to_string())
    }

    /// Create a transport against a custom base URL (used by tests)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url,
            listeners: Vec::new(),
            last_result: None,
        }
    }

    /// Set the API key
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> &mut Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Set the API secret
    pub fn set_api_secret(&mut self, api_secret: impl Into<String>) -> &mut Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    /// Register a send listener. Listeners run in registration order.
    pub fn register_listener(&mut self, listener: Arc<dyn SendListener>) {
        self.listeners.push(listener);
    }

    /// Raw API response of the most recent send, for inspection.
    /// Cleared at the start of each send call.
    pub fn last_result(&self) -> Option<&ApiResponse> {
        self.last_result.as_ref()
    }

    /// Send one message through the Mailjet send API.
    ///
    /// Lifecycle: pre-send hooks (cancelable) -> credential check ->
    /// translation -> one API call -> post-send hooks. A cancelled send
    /// returns 0 without touching the network; a configuration or
    /// transport error propagates and skips the post-send hooks.
    pub async fn send(&mut self, message: &Message) -> Result<usize, MailjetError> {
        self.last_result = None;

        let mut event = SendEvent::new();
        for listener in &self.listeners {
            listener.before_send(&mut event);
        }
        if event.is_cancelled() {
            debug!("Send cancelled by listener");
            return Ok(0);
        }

        let (api_key, api_secret) = match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => (key.clone(), secret.clone()),
            _ => {
                return Err(MailjetError::Configuration(
                    "API key and API secret must be set before sending".to_string(),
                ))
            }
        };

        let payload = SendPayload::from_message(message);

        let client = MailjetClient::with_base_url(api_key, api_secret, self.base_url.clone())?;
        let result = client.post(SEND_RESOURCE, &payload).await?;

        let count = if result.success() {
            let count = result.count();
            debug!("Mailjet accepted {} message(s)", count);
            count
        } else {
            error!(
                "Mailjet send failed ({}): {}",
                result.status, result.body
            );
            0
        };
        self.last_result = Some(result);

        event.set_result(if count > 0 {
            SendOutcome::Success
        } else {
            SendOutcome::Failed
        });
        for listener in &self.listeners {
            listener.after_send(&event);
        }

        Ok(count)
    }
}

#[async_trait]
impl Transport for MailjetTransport {
    async fn send(&mut self, message: &Message) -> Result<usize, MailjetError> {
        MailjetTransport::send(self, message).await
    }
}
