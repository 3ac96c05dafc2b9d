//! Assembly of the complete upload body.
//!
//! The body is a `multipart/mixed` envelope with two members: the JSON
//! metadata block and a `message/rfc822` entity. The RFC822 entity declares
//! its own `multipart/mixed` content type inline, followed by the caller's
//! headers, then holds the (possibly wrapped) text and the attachments.
//!
//! ```text
//! --outer
//! <json block>
//! --outer
//! Content-Type: message/rfc822
//!
//! Content-Type: multipart/mixed; boundary="message"
//! <headers>
//!
//! --message
//! <text | alternative | related>
//! --message            (one per attachment)
//! ...
//! --message--
//! --outer--
//! ```

use crate::attachment::write_attachments;
use crate::boundary::Boundaries;
use crate::content_type::ContentType;
use crate::error::Result;
use crate::header::{CRLF, write_header};
use crate::metadata::Metadata;
use crate::related::WrappedText;
use crate::request::MessageRequest;
use crate::text::TextSection;

/// Builds upload bodies with a fixed set of boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyBuilder {
    boundaries: Boundaries,
}

impl BodyBuilder {
    /// Creates a builder using the fixed boundary tokens.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given boundaries instead.
    #[must_use]
    pub fn with_boundaries(mut self, boundaries: Boundaries) -> Self {
        self.boundaries = boundaries;
        self
    }

    /// Uses freshly generated random boundaries.
    #[must_use]
    pub fn with_random_boundaries(self) -> Self {
        self.with_boundaries(Boundaries::random())
    }

    /// Returns the boundaries in use.
    ///
    /// The upload request needs `boundaries().outer` for its own
    /// `Content-Type: multipart/related; boundary=...` header.
    #[must_use]
    pub const fn boundaries(&self) -> &Boundaries {
        &self.boundaries
    }

    /// Builds the body.
    ///
    /// Never fails. Content that contains a boundary token yields a body
    /// that parsers cannot split correctly; use [`BodyBuilder::try_build`]
    /// to reject such requests up front.
    #[must_use]
    pub fn build(&self, request: &MessageRequest) -> String {
        let boundaries = &self.boundaries;
        let metadata = Metadata::from_request(request);
        let text = TextSection::from_request(request);
        let wrapped = WrappedText::new(text, &request.embedded);

        let mut out = String::with_capacity(estimate_len(request));

        boundaries.outer.write_delimiter(&mut out);
        metadata.write_to(&mut out);
        out.push_str("\r\n\r\n");
        tracing::trace!(?metadata, "wrote metadata block");

        boundaries.outer.write_delimiter(&mut out);
        write_header(&mut out, "Content-Type", ContentType::message_rfc822());
        out.push_str(CRLF);

        write_header(
            &mut out,
            "Content-Type",
            ContentType::multipart_mixed(boundaries.message.as_str()),
        );
        request.headers.write_to(&mut out);
        out.push_str(CRLF);

        boundaries.message.write_delimiter(&mut out);
        wrapped.write_to(&mut out, boundaries);
        out.push_str("\r\n\r\n");
        tracing::trace!(related = wrapped.is_related(), "wrote text section");

        write_attachments(&mut out, &request.attachments, &boundaries.message);

        boundaries.message.write_close(&mut out);
        out.push_str("\r\n\r\n");
        boundaries.outer.write_close(&mut out);

        tracing::debug!(
            text = text_shape(text),
            related = wrapped.is_related(),
            headers = request.headers.len(),
            embedded = request.embedded.len(),
            attachments = request.attachments.len(),
            len = out.len(),
            "built upload body"
        );

        out
    }

    /// Validates the request, then builds the body.
    ///
    /// Output is identical to [`BodyBuilder::build`] for every request that
    /// passes validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`](crate::Error::MissingField) when an
    /// inline object or attachment lacks a required field, and
    /// [`Error::BoundaryCollision`](crate::Error::BoundaryCollision) when a
    /// boundary token appears in caller content.
    pub fn try_build(&self, request: &MessageRequest) -> Result<String> {
        if let Err(e) = request.validate(&self.boundaries) {
            tracing::warn!(error = %e, "rejected message request");
            return Err(e);
        }
        Ok(self.build(request))
    }
}

/// Builds the upload body with the fixed boundary tokens.
///
/// This is the plain entry point: one request in, one document out.
#[must_use]
pub fn create_body(request: &MessageRequest) -> String {
    BodyBuilder::new().build(request)
}

const fn text_shape(text: TextSection<'_>) -> &'static str {
    match text {
        TextSection::Empty => "empty",
        TextSection::Plain(_) => "plain",
        TextSection::Html(_) => "html",
        TextSection::Alternative { .. } => "alternative",
    }
}

/// Rough output size: payloads plus a fixed allowance per part.
fn estimate_len(request: &MessageRequest) -> usize {
    const PART_OVERHEAD: usize = 256;

    let text = request.text_plain.as_ref().map_or(0, String::len)
        + request.text_html.as_ref().map_or(0, String::len);
    let headers: usize = request
        .headers
        .iter()
        .map(|(name, value)| name.len() + value.len() + 4)
        .sum();
    let embedded: usize = request
        .embedded
        .iter()
        .map(|object| object.data.len() + PART_OVERHEAD)
        .sum();
    let attachments: usize = request
        .attachments
        .iter()
        .map(|attachment| attachment.data.len() + PART_OVERHEAD)
        .sum();

    4 * PART_OVERHEAD + text + headers + embedded + attachments
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::attachment::Attachment;
    use crate::related::EmbeddedObject;

    #[test]
    fn test_empty_request() {
        let out = create_body(&MessageRequest::new());
        assert_eq!(
            out,
            concat!(
                "--foo_bar_baz\r\n",
                "Content-Type: application/json; charset=\"UTF-8\"\r\n\r\n",
                "{\r\n}\r\n\r\n",
                "--foo_bar_baz\r\n",
                "Content-Type: message/rfc822\r\n\r\n",
                "Content-Type: multipart/mixed; boundary=\"foo_bar\"\r\n",
                "\r\n",
                "--foo_bar\r\n",
                "\r\n\r\n",
                "--foo_bar--\r\n\r\n",
                "--foo_bar_baz--",
            )
        );
    }

    #[test]
    fn test_end_to_end_scenario() {
        let request = MessageRequest::new()
            .text_plain("hi")
            .header("To", "a@b.com")
            .attach(Attachment::new("text/csv", "MSwyLDM=").with_name("f.csv"));

        assert_eq!(
            create_body(&request),
            concat!(
                "--foo_bar_baz\r\n",
                "Content-Type: application/json; charset=\"UTF-8\"\r\n\r\n",
                "{\r\n}\r\n\r\n",
                "--foo_bar_baz\r\n",
                "Content-Type: message/rfc822\r\n\r\n",
                "Content-Type: multipart/mixed; boundary=\"foo_bar\"\r\n",
                "To: a@b.com\r\n",
                "\r\n",
                "--foo_bar\r\n",
                "Content-Type: text/plain; charset=\"UTF-8\"\r\n",
                "MIME-Version: 1.0\r\n",
                "Content-Transfer-Encoding: 7bit\r\n\r\n",
                "hi\r\n\r\n",
                "--foo_bar\r\n",
                "Content-Type: text/csv\r\n",
                "MIME-Version: 1.0\r\n",
                "Content-Transfer-Encoding: base64\r\n",
                "Content-Disposition: attachment; filename=\"f.csv\"\r\n\r\n",
                "MSwyLDM=\r\n\r\n",
                "--foo_bar--\r\n\r\n",
                "--foo_bar_baz--",
            )
        );
    }

    #[test]
    fn test_header_absence() {
        let out = create_body(&MessageRequest::new().text_plain("x"));
        assert!(out.contains("Content-Type: multipart/mixed; boundary=\"foo_bar\"\r\n\r\n--foo_bar\r\n"));
    }

    #[test]
    fn test_headers_differing_in_case_both_emitted() {
        let request = MessageRequest::new()
            .header("To", "a@b.com")
            .header("to", "c@d.com")
            .text_plain("hi");
        let out = create_body(&request);
        assert!(out.contains("boundary=\"foo_bar\"\r\nTo: a@b.com\r\nto: c@d.com\r\n\r\n--foo_bar\r\n"));
    }

    #[test]
    fn test_draft_metadata_in_envelope() {
        let request = MessageRequest::new().draft_id("r-1").thread_id("t-1");
        let out = create_body(&request);
        assert!(out.starts_with(
            "--foo_bar_baz\r\nContent-Type: application/json; charset=\"UTF-8\"\r\n\r\n{\r\n\"id\": \"r-1\",\r\n"
        ));
        assert!(out.contains("  \"threadId\": \"t-1\"\r\n}\r\n}\r\n\r\n--foo_bar_baz\r\n"));
    }

    #[test]
    fn test_related_inside_message_body() {
        let request = MessageRequest::new()
            .text_html("<img src=\"cid:abc123\">")
            .embed(EmbeddedObject::new("image/png", "abc123", "QUJD"));
        let out = create_body(&request);

        assert!(out.contains(
            "--foo_bar\r\nContent-Type: multipart/related; boundary=\"fizz_buzz\"\r\n\r\n--fizz_buzz\r\nContent-Type: text/html"
        ));
        assert!(out.contains("--fizz_buzz--\r\n\r\n--foo_bar--\r\n\r\n--foo_bar_baz--"));
    }

    #[test]
    fn test_custom_boundaries() {
        let builder = BodyBuilder::new().with_boundaries(Boundaries::new("o", "m", "a", "r"));
        let request = MessageRequest::new()
            .text_plain("p")
            .text_html("h")
            .embed(EmbeddedObject::new("image/png", "i", "AAAA"))
            .attach(Attachment::new("text/plain", "QQ=="));
        let out = builder.build(&request);

        assert!(out.starts_with("--o\r\n"));
        assert!(out.ends_with("--m--\r\n\r\n--o--"));
        assert!(out.contains("multipart/mixed; boundary=\"m\""));
        assert!(out.contains("multipart/alternative; boundary=\"a\""));
        assert!(out.contains("multipart/related; boundary=\"r\""));
        assert!(!out.contains("foo"));
    }

    #[test]
    fn test_try_build_matches_build() {
        let builder = BodyBuilder::new();
        let request = MessageRequest::new().text_plain("hi").header("To", "a@b.com");
        assert_eq!(builder.try_build(&request).unwrap(), builder.build(&request));
    }

    #[test]
    fn test_try_build_rejects_collision() {
        let request = MessageRequest::new().header("X-Test", "foo_bar");
        assert!(BodyBuilder::new().try_build(&request).is_err());
    }

    #[test]
    fn test_builder_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BodyBuilder>();
        assert_send_sync::<MessageRequest>();
    }
}
