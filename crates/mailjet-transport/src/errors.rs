//! Error types for the Mailjet transport

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailjetError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for MailjetError {
    fn from(err: serde_json::Error) -> Self {
        MailjetError::Serialization(err.to_string())
    }
}
