//! Attachment parts of the RFC822 message body.

use crate::boundary::Boundary;
use crate::encoding::TransferEncoding;
use crate::header::{CRLF, write_header};
use crate::request::present;

/// A file attached to the message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attachment {
    /// Media type, written verbatim (e.g. `application/pdf`).
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub content_type: String,
    /// File name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Base64 payload, written verbatim.
    pub data: String,
}

impl Attachment {
    /// Creates an unnamed attachment.
    #[must_use]
    pub fn new(content_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            name: None,
            data: data.into(),
        }
    }

    /// Sets the file name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn write_part(&self, out: &mut String, boundary: &Boundary) {
        boundary.write_delimiter(out);
        write_header(out, "Content-Type", &self.content_type);
        write_header(out, "MIME-Version", "1.0");
        write_header(out, "Content-Transfer-Encoding", TransferEncoding::Base64);
        out.push_str("Content-Disposition: attachment");
        if let Some(name) = present(self.name.as_ref()) {
            out.push_str("; filename=\"");
            out.push_str(name);
            out.push('"');
        }
        out.push_str(CRLF);
        out.push_str(CRLF);
        out.push_str(&self.data);
        out.push_str("\r\n\r\n");
    }
}

/// Appends one part per attachment, in order.
///
/// No closing delimiter is written: the parts live inside the message body,
/// whose own closing delimiter follows them.
pub fn write_attachments(out: &mut String, attachments: &[Attachment], boundary: &Boundary) {
    for attachment in attachments {
        attachment.write_part(out, boundary);
    }
}

/// Renders the attachment parts into a new string.
#[must_use]
pub fn render_attachments(attachments: &[Attachment], boundary: &Boundary) -> String {
    let mut out = String::new();
    write_attachments(&mut out, attachments, boundary);
    out
}
