//! JSON metadata block carrying the draft and thread association.

use crate::content_type::ContentType;
use crate::header::{CRLF, write_header};
use crate::request::{Draft, MessageRequest};

/// Shape of the JSON metadata block.
///
/// The `message` object only exists when a draft is given, so a thread id
/// without a draft is dropped. Upload consumers that need the thread id on a
/// plain message must send a draft as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metadata<'a> {
    /// No draft: `{}`.
    Bare,
    /// New draft: `{"message": {...}}`.
    Message {
        /// Thread to file the draft into.
        thread_id: Option<&'a str>,
    },
    /// Existing draft: `{"id": ..., "message": {...}}`.
    Draft {
        /// Id of the draft being updated.
        id: &'a str,
        /// Thread to file the draft into.
        thread_id: Option<&'a str>,
    },
}

impl<'a> Metadata<'a> {
    /// Selects the shape from an optional draft and thread id.
    #[must_use]
    pub fn new(draft: Option<&'a Draft>, thread_id: Option<&'a str>) -> Self {
        match draft {
            None => Self::Bare,
            Some(draft) => match draft.id() {
                Some(id) => Self::Draft { id, thread_id },
                None => Self::Message { thread_id },
            },
        }
    }

    /// Selects the shape for a request.
    #[must_use]
    pub fn from_request(request: &'a MessageRequest) -> Self {
        Self::new(request.draft.as_ref(), request.thread())
    }

    /// Appends the content-type header, blank line, and JSON text.
    ///
    /// Values are written verbatim; the caller supplies JSON-safe strings.
    pub fn write_to(&self, out: &mut String) {
        write_header(out, "Content-Type", ContentType::application_json());
        out.push_str(CRLF);
        out.push('{');
        out.push_str(CRLF);
        match *self {
            Self::Bare => {}
            Self::Message { thread_id } => write_message(out, thread_id),
            Self::Draft { id, thread_id } => {
                out.push_str("\"id\": \"");
                out.push_str(id);
                out.push_str("\",");
                out.push_str(CRLF);
                write_message(out, thread_id);
            }
        }
        out.push('}');
    }

    /// Renders the block into a new string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out);
        out
    }
}

fn write_message(out: &mut String, thread_id: Option<&str>) {
    out.push_str("\"message\": {");
    out.push_str(CRLF);
    if let Some(thread_id) = thread_id {
        out.push_str("  \"threadId\": \"");
        out.push_str(thread_id);
        out.push('"');
        out.push_str(CRLF);
    }
    out.push('}');
    out.push_str(CRLF);
}
