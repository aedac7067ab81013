//! Mailjet transport for structured email messages
//!
//! This crate adapts an in-memory message (sender, recipients, body parts,
//! attachments, custom headers) into the request document of the Mailjet v3
//! send API and performs the API call.
//!
//! Features:
//! - Message to payload translation with the exact wire field names
//! - Provider directive headers (templates, tracking, campaigns) mapped via
//!   a static lookup table
//! - Send lifecycle hooks: cancelable pre-send, result-carrying post-send
//!
//! ```no_run
//! use mailjet_transport::{Address, MailjetTransport, Message, TEXT_PLAIN};
//!
//! # async fn example() -> Result<(), mailjet_transport::MailjetError> {
//! let message = Message::new(Address::named("a@x.com", "A"), "Hi")
//!     .to(Address::named("b@x.com", "B"))
//!     .with_body("hello", TEXT_PLAIN);
//!
//! let mut transport = MailjetTransport::new();
//! transport.set_api_key("key").set_api_secret("secret");
//! let sent = transport.send(&message).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod events;
pub mod message;
pub mod payload;
pub mod transport;

// Re-export main types
pub use client::{ApiResponse, MailjetClient};
pub use errors::MailjetError;
pub use events::{SendEvent, SendListener, SendOutcome};
pub use message::{Address, Message, MessagePart, TEXT_HTML, TEXT_PLAIN};
pub use payload::SendPayload;
pub use transport::{MailjetTransport, Transport};
