//! Text leaf parts and the plain/HTML alternative envelope.

use crate::boundary::Boundary;
use crate::content_type::ContentType;
use crate::encoding::TransferEncoding;
use crate::header::{CRLF, write_header};
use crate::request::MessageRequest;

/// Text flavour of a leaf part.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFlavor {
    /// `text/plain`.
    Plain,
    /// `text/html`.
    Html,
}

impl TextFlavor {
    /// Returns the content type with its UTF-8 charset.
    #[must_use]
    pub fn content_type(self) -> ContentType {
        match self {
            Self::Plain => ContentType::text_plain(),
            Self::Html => ContentType::text_html(),
        }
    }
}

/// Writes one text leaf: three headers, a blank line, then the text as is.
pub fn write_text_part(out: &mut String, flavor: TextFlavor, text: &str) {
    write_header(out, "Content-Type", flavor.content_type());
    write_header(out, "MIME-Version", "1.0");
    write_header(out, "Content-Transfer-Encoding", TransferEncoding::SevenBit);
    out.push_str(CRLF);
    out.push_str(text);
}

/// Which text representations a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSection<'a> {
    /// No text at all; renders as the empty string.
    Empty,
    /// Plain text only.
    Plain(&'a str),
    /// HTML only.
    Html(&'a str),
    /// Both, wrapped in `multipart/alternative` with plain first.
    Alternative {
        /// Plain text representation.
        plain: &'a str,
        /// HTML representation.
        html: &'a str,
    },
}

impl<'a> TextSection<'a> {
    /// Selects the section from the supplied representations.
    #[must_use]
    pub const fn new(plain: Option<&'a str>, html: Option<&'a str>) -> Self {
        match (plain, html) {
            (Some(plain), Some(html)) => Self::Alternative { plain, html },
            (Some(plain), None) => Self::Plain(plain),
            (None, Some(html)) => Self::Html(html),
            (None, None) => Self::Empty,
        }
    }

    /// Selects the section for a request.
    #[must_use]
    pub fn from_request(request: &'a MessageRequest) -> Self {
        Self::new(request.plain(), request.html())
    }

    /// Appends the section. `boundary` is only used by the alternative form.
    pub fn write_to(&self, out: &mut String, boundary: &Boundary) {
        match *self {
            Self::Empty => {}
            Self::Plain(text) => write_text_part(out, TextFlavor::Plain, text),
            Self::Html(html) => write_text_part(out, TextFlavor::Html, html),
            Self::Alternative { plain, html } => {
                write_header(
                    out,
                    "Content-Type",
                    ContentType::multipart_alternative(boundary.as_str()),
                );
                out.push_str(CRLF);

                boundary.write_delimiter(out);
                write_text_part(out, TextFlavor::Plain, plain);
                out.push_str("\r\n\r\n");

                boundary.write_delimiter(out);
                write_text_part(out, TextFlavor::Html, html);
                out.push_str("\r\n\r\n");

                boundary.write_close(out);
            }
        }
    }

    /// Renders the section into a new string.
    #[must_use]
    pub fn render(&self, boundary: &Boundary) -> String {
        let mut out = String::new();
        self.write_to(&mut out, boundary);
        out
    }
}
