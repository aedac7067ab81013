//! Send API payload model and message translation
//!
//! Field names follow the Mailjet v3 send API exactly and are
//! case-sensitive. Optional provider directives are flattened into the
//! payload only when the matching header is set on the message; an unset
//! directive produces no key at all, not a null.
//!
//! See https://dev.mailjet.com/guides/#send-api-json-properties

use std::collections::BTreeMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::message::{supports_content_type, Message, MessagePart, TEXT_PLAIN};

/// Recognized directive headers and the payload field each maps to.
///
/// Adding a directive is a data change here, not a code change in the
/// translation below.
pub const DIRECTIVE_HEADERS: &[(&str, &str)] = &[
    ("X-MJ-TemplateID", "Mj-TemplateID"),
    ("X-MJ-TemplateLanguage", "Mj-TemplateLanguage"),
    ("X-MJ-TemplateErrorReporting", "MJ-TemplateErrorReporting"),
    ("X-MJ-TemplateErrorDeliver", "MJ-TemplateErrorDeliver"),
    ("X-Mailjet-Prio", "Mj-Prio"),
    ("X-Mailjet-Campaign", "Mj-campaign"),
    ("X-Mailjet-DeduplicateCampaign", "Mj-deduplicatecampaign"),
    ("X-Mailjet-TrackOpen", "Mj-trackopen"),
    ("X-Mailjet-TrackClick", "Mj-trackclick"),
    ("X-MJ-CustomID", "Mj-CustomID"),
    ("X-MJ-EventPayLoad", "Mj-EventPayLoad"),
    ("X-MJ-Vars", "Vars"),
];

/// One entry of the payload `Recipients` list
#[derive(Debug, Clone, Serialize)]
pub struct Recipient {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Name")]
    pub name: Option<String>,
}

/// One entry of the payload `Attachments` list
#[derive(Debug, Clone, Serialize)]
pub struct AttachmentPayload {
    #[serde(rename = "Content-type")]
    pub content_type: String,
    #[serde(rename = "Filename")]
    pub filename: String,
    /// Base64 of the original binary content
    #[serde(rename = "content")]
    pub content: String,
}

/// Request document for the Mailjet send endpoint, built fresh per send
#[derive(Debug, Clone, Serialize)]
pub struct SendPayload {
    #[serde(rename = "FromEmail")]
    pub from_email: String,
    #[serde(rename = "FromName")]
    pub from_name: Option<String>,
    #[serde(rename = "Html-part")]
    pub html_part: Option<String>,
    #[serde(rename = "Text-part")]
    pub text_part: Option<String>,
    #[serde(rename = "Subject")]
    pub subject: String,
    /// Ordered list of single-key header maps; currently only Reply-To
    #[serde(rename = "Headers")]
    pub headers: Vec<BTreeMap<String, String>>,
    /// To, Cc and Bcc concatenated in that order, duplicates kept
    #[serde(rename = "Recipients")]
    pub recipients: Vec<Recipient>,
    #[serde(rename = "Attachments", skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentPayload>,
    /// Provider directive fields, present only when requested via headers
    #[serde(flatten)]
    pub directives: Map<String, Value>,
}

impl SendPayload {
    /// Translate a message into the send API request document.
    ///
    /// Pure function of the message; performs no I/O and never fails.
    /// Structural problems (e.g. no recipients) surface as a provider
    /// rejection at dispatch time, not here.
    pub fn from_message(message: &Message) -> Self {
        // The declared content type is first-class on the message, so the
        // only fallback left is unsupported-type -> HTML.
        let mut html_part = None;
        let mut text_part = None;
        if let Some(body) = &message.body {
            if message.content_type == TEXT_PLAIN {
                text_part = Some(body.clone());
            } else {
                html_part = Some(body.clone());
            }
        }

        let mut attachments = Vec::new();
        for child in &message.children {
            match child {
                MessagePart::Attachment {
                    content_type,
                    filename,
                    content,
                } => attachments.push(AttachmentPayload {
                    content_type: content_type.clone(),
                    filename: filename.clone(),
                    content: BASE64.encode(content),
                }),
                MessagePart::Alternative { content_type, body } => {
                    // Last part of a supported type wins; anything else is
                    // dropped.
                    if !supports_content_type(content_type) {
                        continue;
                    }
                    if content_type == TEXT_PLAIN {
                        text_part = Some(body.clone());
                    } else {
                        html_part = Some(body.clone());
                    }
                }
            }
        }

        let mut headers = Vec::new();
        if let Some(reply_to) = &message.reply_to {
            let mut entry = BTreeMap::new();
            entry.insert(
                "Reply-To".to_string(),
                format!(
                    "{} <{}>",
                    reply_to.name.as_deref().unwrap_or(""),
                    reply_to.email
                ),
            );
            headers.push(entry);
        }

        let recipients = message
            .to
            .iter()
            .chain(message.cc.iter())
            .chain(message.bcc.iter())
            .map(|address| Recipient {
                email: address.email.clone(),
                name: address.name.clone(),
            })
            .collect();

        let mut directives = Map::new();
        for (header_name, field_name) in DIRECTIVE_HEADERS {
            if let Some(value) = message.header_value(header_name) {
                directives.insert(field_name.to_string(), Value::String(value.to_string()));
            }
        }

        Self {
            from_email: message.from.email.clone(),
            from_name: message.from.name.clone(),
            html_part,
            text_part,
            subject: message.subject.clone(),
            headers,
            recipients,
            attachments,
            directives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{Address, TEXT_HTML};
    use base64::Engine as _;
    use serde_json::json;

    fn base_message() -> Message {
        Message::new(Address::named("a@x.com", "A"), "Hi")
            .to(Address::named("b@x.com", "B"))
    }

    #[test]
    fn test_plain_text_message() {
        let message = base_message().with_body("hello", TEXT_PLAIN);
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.text_part.as_deref(), Some("hello"));
        assert_eq!(payload.html_part, None);
        assert!(payload.attachments.is_empty());
    }

    #[test]
    fn test_html_message() {
        let message = base_message().with_body("<h1>hello</h1>", TEXT_HTML);
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.html_part.as_deref(), Some("<h1>hello</h1>"));
        assert_eq!(payload.text_part, None);
    }

    #[test]
    fn test_unsupported_content_type_falls_back_to_html() {
        let message = base_message().with_body("raw", "multipart/alternative");
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.html_part.as_deref(), Some("raw"));
        assert_eq!(payload.text_part, None);
    }

    #[test]
    fn test_html_body_with_plain_alternative() {
        let message = base_message()
            .with_body("<h1>hello</h1>", TEXT_HTML)
            .with_part(TEXT_PLAIN, "hello");
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.html_part.as_deref(), Some("<h1>hello</h1>"));
        assert_eq!(payload.text_part.as_deref(), Some("hello"));
    }

    #[test]
    fn test_later_alternative_wins() {
        let message = base_message()
            .with_body("<h1>first</h1>", TEXT_HTML)
            .with_part(TEXT_HTML, "<h1>second</h1>")
            .with_part(TEXT_HTML, "<h1>third</h1>");
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.html_part.as_deref(), Some("<h1>third</h1>"));
    }

    #[test]
    fn test_unsupported_alternative_is_dropped() {
        let message = base_message()
            .with_body("hello", TEXT_PLAIN)
            .with_part("text/calendar", "BEGIN:VCALENDAR");
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.text_part.as_deref(), Some("hello"));
        assert_eq!(payload.html_part, None);
    }

    #[test]
    fn test_attachments_preserve_order_and_encoding() {
        let message = base_message()
            .with_body("hello", TEXT_PLAIN)
            .attach("application/pdf", "report.pdf", b"pdf bytes".to_vec())
            .attach("image/png", "logo.png", vec![0x89, 0x50, 0x4e, 0x47]);
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.attachments.len(), 2);
        assert_eq!(payload.attachments[0].filename, "report.pdf");
        assert_eq!(payload.attachments[0].content, BASE64.encode(b"pdf bytes"));
        assert_eq!(payload.attachments[1].content_type, "image/png");
        assert_eq!(
            payload.attachments[1].content,
            BASE64.encode([0x89, 0x50, 0x4e, 0x47])
        );
    }

    #[test]
    fn test_attachments_key_absent_when_empty() {
        let message = base_message().with_body("hello", TEXT_PLAIN);
        let value = serde_json::to_value(SendPayload::from_message(&message)).unwrap();

        assert!(value.get("Attachments").is_none());
    }

    #[test]
    fn test_recipients_concatenate_to_cc_bcc() {
        let message = Message::new(Address::named("a@x.com", "A"), "Hi")
            .to(Address::named("to@x.com", "To"))
            .cc(Address::named("cc@x.com", "Cc"))
            .bcc(Address::named("bcc@x.com", "Bcc"));
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.recipients.len(), 3);
        assert_eq!(payload.recipients[0].email, "to@x.com");
        assert_eq!(payload.recipients[0].name.as_deref(), Some("To"));
        // Cc and Bcc carry their own email and name, not To's.
        assert_eq!(payload.recipients[1].email, "cc@x.com");
        assert_eq!(payload.recipients[1].name.as_deref(), Some("Cc"));
        assert_eq!(payload.recipients[2].email, "bcc@x.com");
        assert_eq!(payload.recipients[2].name.as_deref(), Some("Bcc"));
    }

    #[test]
    fn test_duplicate_recipients_are_kept() {
        let message = base_message().cc(Address::named("b@x.com", "B"));
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.recipients.len(), 2);
        assert_eq!(payload.recipients[0].email, payload.recipients[1].email);
    }

    #[test]
    fn test_reply_to_header_entry() {
        let message = base_message()
            .with_body("hello", TEXT_PLAIN)
            .reply_to(Address::named("support@x.com", "Support"));
        let payload = SendPayload::from_message(&message);

        assert_eq!(payload.headers.len(), 1);
        assert_eq!(
            payload.headers[0].get("Reply-To").map(String::as_str),
            Some("Support <support@x.com>")
        );
    }

    #[test]
    fn test_no_reply_to_means_no_header_entry() {
        let payload = SendPayload::from_message(&base_message());
        assert!(payload.headers.is_empty());
    }

    #[test]
    fn test_each_directive_header_maps_to_its_field() {
        for (header_name, field_name) in DIRECTIVE_HEADERS {
            let message = base_message()
                .with_body("hello", TEXT_PLAIN)
                .header(*header_name, "value-123");
            let value = serde_json::to_value(SendPayload::from_message(&message)).unwrap();

            assert_eq!(
                value.get(*field_name),
                Some(&json!("value-123")),
                "header {} should map to field {}",
                header_name,
                field_name
            );
        }
    }

    #[test]
    fn test_unset_directives_produce_no_keys() {
        let message = base_message().with_body("hello", TEXT_PLAIN);
        let value = serde_json::to_value(SendPayload::from_message(&message)).unwrap();

        for (_, field_name) in DIRECTIVE_HEADERS {
            assert!(
                value.get(*field_name).is_none(),
                "field {} should be absent",
                field_name
            );
        }
    }

    #[test]
    fn test_unrecognized_headers_are_dropped() {
        let message = base_message()
            .with_body("hello", TEXT_PLAIN)
            .header("X-Custom-Header", "value");
        let value = serde_json::to_value(SendPayload::from_message(&message)).unwrap();

        assert!(value.get("X-Custom-Header").is_none());
    }

    #[test]
    fn test_worked_example() {
        let message = Message::new(Address::named("a@x.com", "A"), "Hi")
            .to(Address::named("b@x.com", "B"))
            .with_body("hello", TEXT_PLAIN);
        let value = serde_json::to_value(SendPayload::from_message(&message)).unwrap();

        assert_eq!(
            value,
            json!({
                "FromEmail": "a@x.com",
                "FromName": "A",
                "Text-part": "hello",
                "Html-part": null,
                "Subject": "Hi",
                "Recipients": [{"Email": "b@x.com", "Name": "B"}],
                "Headers": []
            })
        );
    }
}
