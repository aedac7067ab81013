//! Structured email message model consumed by the transport

/// Content type of a plain text body
pub const TEXT_PLAIN: &str = "text/plain";

/// Content type of an HTML body
pub const TEXT_HTML: &str = "text/html";

/// Returns true for the content types the send API accepts as body parts
pub fn supports_content_type(content_type: &str) -> bool {
    content_type == TEXT_PLAIN || content_type == TEXT_HTML
}

/// An email address with an optional display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    pub email: String,
    pub name: Option<String>,
}

impl Address {
    /// Create an address without a display name
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }

    /// Create an address with a display name
    pub fn named(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: Some(name.into()),
        }
    }
}

/// A child part of a message, kept in attachment order
///
/// Alternative body parts and attachments live in one sequence so that a
/// later alternative part of the same content type overwrites an earlier
/// body assignment during translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessagePart {
    /// An alternate rendering of the body (e.g. a plain text fallback)
    Alternative { content_type: String, body: String },
    /// A file attachment with raw binary content
    Attachment {
        content_type: String,
        filename: String,
        content: Vec<u8>,
    },
}

/// A structured email message
///
/// The message carries exactly one sender. The primary content type is
/// stored as a first-class field at construction time and is never mutated
/// when parts are attached, so the translator always sees the caller's
/// declared intent.
///
/// The transport reads the message; it never modifies it.
#[derive(Debug, Clone)]
pub struct Message {
    pub from: Address,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
    pub reply_to: Option<Address>,
    pub subject: String,
    /// Primary body text, assigned to the HTML or text part per `content_type`
    pub body: Option<String>,
    /// User-declared content type of the primary body
    pub content_type: String,
    /// Alternate body parts and attachments, in attachment order
    pub children: Vec<MessagePart>,
    /// Header name/value pairs, in insertion order
    pub headers: Vec<(String, String)>,
}

impl Message {
    /// Create a message with the given sender and subject
    pub fn new(from: Address, subject: impl Into<String>) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            reply_to: None,
            subject: subject.into(),
            body: None,
            content_type: TEXT_PLAIN.to_string(),
            children: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Add a To recipient
    pub fn to(mut self, address: Address) -> Self {
        self.to.push(address);
        self
    }

    /// Add a Cc recipient
    pub fn cc(mut self, address: Address) -> Self {
        self.cc.push(address);
        self
    }

    /// Add a Bcc recipient
    pub fn bcc(mut self, address: Address) -> Self {
        self.bcc.push(address);
        self
    }

    /// Set the Reply-To address
    pub fn reply_to(mut self, address: Address) -> Self {
        self.reply_to = Some(address);
        self
    }

    /// Set the primary body and its content type
    pub fn with_body(mut self, body: impl Into<String>, content_type: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content_type = content_type.into();
        self
    }

    /// Append an alternate body part
    pub fn with_part(
        mut self,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        self.children.push(MessagePart::Alternative {
            content_type: content_type.into(),
            body: body.into(),
        });
        self
    }

    /// Append an attachment
    pub fn attach(
        mut self,
        content_type: impl Into<String>,
        filename: impl Into<String>,
        content: Vec<u8>,
    ) -> Self {
        self.children.push(MessagePart::Attachment {
            content_type: content_type.into(),
            filename: filename.into(),
            content,
        });
        self
    }

    /// Set a custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value by exact name
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}
