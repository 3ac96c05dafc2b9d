//! Input model for one upload body.

use crate::attachment::Attachment;
use crate::header::Headers;
use crate::related::EmbeddedObject;

/// Returns the value when it is set and non-empty.
///
/// Empty strings are treated exactly like absent ones everywhere a field is
/// optional.
pub(crate) fn present(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

/// Draft association for the JSON metadata block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Draft {
    /// Id of an existing draft to update.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
}

impl Draft {
    /// Creates a draft reference without an id (a new draft).
    #[must_use]
    pub const fn new() -> Self {
        Self { id: None }
    }

    /// Creates a reference to an existing draft.
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    /// Returns the id if it is set and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        present(self.id.as_ref())
    }
}

/// Everything needed to build one upload body.
///
/// Every field is optional. Empty collections and empty strings behave as if
/// they were never supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct MessageRequest {
    /// Draft metadata; gates the `message` object of the JSON block.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub draft: Option<Draft>,
    /// Message headers, emitted in insertion order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Headers::is_empty"))]
    pub headers: Headers,
    /// Thread the message belongs to. Only emitted when `draft` is set.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub thread_id: Option<String>,
    /// Plain text representation.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub text_plain: Option<String>,
    /// HTML representation.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub text_html: Option<String>,
    /// Inline objects referenced from the HTML through `cid:` URIs.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub embedded: Vec<EmbeddedObject>,
    /// Attachments, emitted in order.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub attachments: Vec<Attachment>,
}

impl MessageRequest {
    /// Creates an empty request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the draft metadata.
    #[must_use]
    pub fn draft(mut self, draft: Draft) -> Self {
        self.draft = Some(draft);
        self
    }

    /// Sets the draft metadata from an existing draft id.
    #[must_use]
    pub fn draft_id(self, id: impl Into<String>) -> Self {
        self.draft(Draft::with_id(id))
    }

    /// Sets the thread id.
    #[must_use]
    pub fn thread_id(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    /// Adds or replaces one header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Replaces all headers.
    #[must_use]
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the plain text body.
    #[must_use]
    pub fn text_plain(mut self, text: impl Into<String>) -> Self {
        self.text_plain = Some(text.into());
        self
    }

    /// Sets the HTML body.
    #[must_use]
    pub fn text_html(mut self, html: impl Into<String>) -> Self {
        self.text_html = Some(html.into());
        self
    }

    /// Appends an inline object.
    #[must_use]
    pub fn embed(mut self, object: EmbeddedObject) -> Self {
        self.embedded.push(object);
        self
    }

    /// Appends an attachment.
    #[must_use]
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    pub(crate) fn plain(&self) -> Option<&str> {
        present(self.text_plain.as_ref())
    }

    pub(crate) fn html(&self) -> Option<&str> {
        present(self.text_html.as_ref())
    }

    pub(crate) fn thread(&self) -> Option<&str> {
        present(self.thread_id.as_ref())
    }
}


#[cfg(all(test, feature = "serde"))]
#[allow(clippy::unwrap_used)]
mod serde_tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_request() {
        let json = r#"{
            "draft": {"id": "r-42"},
            "threadId": "t-7",
            "headers": {"To": "a@b.com", "Subject": "Hi", "From": "c@d.com"},
            "textPlain": "hi",
            "textHtml": "<b>hi</b>",
            "embedded": [{"type": "image/png", "id": "abc123", "data": "QUJD"}],
            "attachments": [{"type": "text/csv", "name": "f.csv", "data": "MSwyLDM="}]
        }"#;

        let request: MessageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.draft, Some(Draft::with_id("r-42")));
        assert_eq!(request.thread_id.as_deref(), Some("t-7"));
        let names: Vec<_> = request.headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["To", "Subject", "From"]);
        assert_eq!(request.embedded[0].content_type, "image/png");
        assert_eq!(request.embedded[0].name, None);
        assert_eq!(request.attachments[0].name.as_deref(), Some("f.csv"));
    }

    #[test]
    fn test_deserialize_headers_differing_in_case() {
        let json = r#"{"headers": {"To": "a@b.com", "to": "c@d.com"}, "textPlain": "hi"}"#;

        let request: MessageRequest = serde_json::from_str(json).unwrap();
        let entries: Vec<_> = request.headers.iter().collect();
        assert_eq!(entries, [("To", "a@b.com"), ("to", "c@d.com")]);

        let body = crate::create_body(&request);
        assert!(body.contains("boundary=\"foo_bar\"\r\nTo: a@b.com\r\nto: c@d.com\r\n\r\n"));
    }

    #[test]
    fn test_deserialize_minimal_request() {
        let request: MessageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, MessageRequest::default());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let request = MessageRequest::new().text_plain("hi");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"textPlain":"hi"}"#);
    }
}
