//! Inline objects and the `multipart/related` envelope.

use crate::boundary::Boundaries;
use crate::content_type::ContentType;
use crate::encoding::TransferEncoding;
use crate::header::{CRLF, write_header};
use crate::request::present;
use crate::text::TextSection;

/// An object shown inline in the HTML body, referenced as `cid:<id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmbeddedObject {
    /// Media type, written verbatim (e.g. `image/png`).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub content_type: String,
    /// Content-ID, without angle brackets.
    pub id: String,
    /// Display and file name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Base64 payload, written verbatim.
    pub data: String,
}

impl EmbeddedObject {
    /// Creates an unnamed inline object.
    #[must_use]
    pub fn new(
        content_type: impl Into<String>,
        id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            content_type: content_type.into(),
            id: id.into(),
            name: None,
            data: data.into(),
        }
    }

    /// Sets the display and file name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Writes this object's part headers, blank line and payload.
    fn write_part(&self, out: &mut String) {
        let name = present(self.name.as_ref());

        out.push_str("Content-Type: ");
        out.push_str(&self.content_type);
        if let Some(name) = name {
            out.push_str("; name=\"");
            out.push_str(name);
            out.push('"');
        }
        out.push_str(CRLF);
        write_header(out, "MIME-Version", "1.0");
        write_header(out, "Content-ID", format_args!("<{}>", self.id));
        write_header(out, "Content-Transfer-Encoding", TransferEncoding::Base64);
        out.push_str("Content-Disposition: inline");
        if let Some(name) = name {
            out.push_str("; filename=\"");
            out.push_str(name);
            out.push('"');
        }
        out.push_str(CRLF);
        out.push_str(CRLF);
        out.push_str(&self.data);
    }
}

/// The message text, wrapped in `multipart/related` when inline objects exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrappedText<'a> {
    /// No inline objects; the text section is emitted as is.
    Unwrapped(TextSection<'a>),
    /// Text section first, then each inline object in order.
    Related {
        /// The composed text section.
        text: TextSection<'a>,
        /// Inline objects, never empty.
        embedded: &'a [EmbeddedObject],
    },
}

impl<'a> WrappedText<'a> {
    /// Wraps `text` only when `embedded` is non-empty.
    #[must_use]
    pub const fn new(text: TextSection<'a>, embedded: &'a [EmbeddedObject]) -> Self {
        if embedded.is_empty() {
            Self::Unwrapped(text)
        } else {
            Self::Related { text, embedded }
        }
    }

    /// Returns true when a related envelope is emitted.
    #[must_use]
    pub const fn is_related(&self) -> bool {
        matches!(self, Self::Related { .. })
    }

    /// Appends the text, wrapped if needed.
    pub fn write_to(&self, out: &mut String, boundaries: &Boundaries) {
        match self {
            Self::Unwrapped(text) => text.write_to(out, &boundaries.alternative),
            Self::Related { text, embedded } => {
                let boundary = &boundaries.related;
                write_header(
                    out,
                    "Content-Type",
                    ContentType::multipart_related(boundary.as_str()),
                );
                out.push_str(CRLF);

                boundary.write_delimiter(out);
                text.write_to(out, &boundaries.alternative);
                out.push_str("\r\n\r\n");

                for object in *embedded {
                    boundary.write_delimiter(out);
                    object.write_part(out);
                    out.push_str("\r\n\r\n");
                }

                boundary.write_close(out);
            }
        }
    }

    /// Renders into a new string.
    #[must_use]
    pub fn render(&self, boundaries: &Boundaries) -> String {
        let mut out = String::new();
        self.write_to(&mut out, boundaries);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_embedded_passes_text_through() {
        let boundaries = Boundaries::fixed();
        let text = TextSection::new(Some("hi"), Some("<b>hi</b>"));
        let wrapped = WrappedText::new(text, &[]);

        assert!(!wrapped.is_related());
        assert_eq!(
            wrapped.render(&boundaries),
            text.render(&boundaries.alternative)
        );
    }

    #[test]
    fn test_single_object() {
        let boundaries = Boundaries::fixed();
        let text = TextSection::new(None, Some("<img src=\"cid:abc123\">"));
        let embedded = [EmbeddedObject::new("image/png", "abc123", "QUJD")];
        let out = WrappedText::new(text, &embedded).render(&boundaries);

        let expected = format!(
            "Content-Type: multipart/related; boundary=\"fizz_buzz\"\r\n\r\n\
             --fizz_buzz\r\n{}\r\n\r\n\
             --fizz_buzz\r\n\
             Content-Type: image/png\r\n\
             MIME-Version: 1.0\r\n\
             Content-ID: <abc123>\r\n\
             Content-Transfer-Encoding: base64\r\n\
             Content-Disposition: inline\r\n\r\n\
             QUJD\r\n\r\n\
             --fizz_buzz--",
            text.render(&boundaries.alternative)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn test_named_object() {
        let boundaries = Boundaries::fixed();
        let embedded = [EmbeddedObject::new("image/jpeg", "pic", "AAAA").with_name("cat.jpg")];
        let out = WrappedText::new(TextSection::Empty, &embedded).render(&boundaries);

        assert!(out.contains("Content-Type: image/jpeg; name=\"cat.jpg\"\r\n"));
        assert!(out.contains("Content-Disposition: inline; filename=\"cat.jpg\"\r\n"));
        // empty text still takes the first member slot
        assert!(out.contains("--fizz_buzz\r\n\r\n\r\n--fizz_buzz\r\n"));
    }

    #[test]
    fn test_objects_keep_order() {
        let boundaries = Boundaries::fixed();
        let embedded = [
            EmbeddedObject::new("image/png", "first", "AAAA"),
            EmbeddedObject::new("image/png", "second", "BBBB"),
        ];
        let out = WrappedText::new(TextSection::Plain("x"), &embedded).render(&boundaries);

        let first = out.find("Content-ID: <first>").unwrap_or(usize::MAX);
        let second = out.find("Content-ID: <second>").unwrap_or(0);
        assert!(first < second);
        assert_eq!(out.matches("--fizz_buzz\r\n").count(), 3);
        assert!(out.ends_with("--fizz_buzz--"));
    }

    #[test]
    fn test_empty_name_is_omitted() {
        let boundaries = Boundaries::fixed();
        let embedded = [EmbeddedObject::new("image/gif", "g", "R0lG").with_name("")];
        let out = WrappedText::new(TextSection::Empty, &embedded).render(&boundaries);
        assert!(out.contains("Content-Type: image/gif\r\n"));
        assert!(out.contains("Content-Disposition: inline\r\n"));
    }
}
