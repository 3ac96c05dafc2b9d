//! Minimal reader that splits a generated body back into its parts.
//!
//! Delimiter lines are matched exactly (trailing whitespace allowed), and the
//! line break before a delimiter belongs to the delimiter, as in RFC 2046.
//! Only what the builder produces is understood: header blocks, nested
//! multiparts and `message/rfc822` entities.

use crate::boundary::Boundaries;
use crate::content_type::ContentType;
use crate::error::{Error, Result};
use crate::header::Headers;

/// Body of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// Leaf content, exactly as found between the delimiters.
    Leaf(String),
    /// Members of a multipart entity.
    Multipart(Vec<Entity>),
    /// An encapsulated `message/rfc822` entity.
    Message(Box<Entity>),
}

/// One MIME entity: headers plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    /// Entity headers.
    pub headers: Headers,
    /// Parsed `Content-Type`, if the entity declares one.
    pub content_type: Option<ContentType>,
    /// Entity body.
    pub body: Body,
}

impl Entity {
    /// Parses an entity: header block, blank line, body.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed headers or content types, multiparts
    /// without a boundary, and multiparts that are never closed.
    pub fn parse(text: &str) -> Result<Self> {
        let (head, body) = split_head(text);
        let headers = Headers::parse(head)?;
        let content_type = header(&headers, "Content-Type")
            .map(ContentType::parse)
            .transpose()?;

        let body = match &content_type {
            Some(ct) if ct.is_multipart() => {
                let boundary = ct.boundary().ok_or(Error::MissingBoundary)?;
                Body::Multipart(parse_parts(body, boundary)?)
            }
            Some(ct) if ct.is_rfc822() => Body::Message(Box::new(Self::parse(body)?)),
            _ => Body::Leaf(body.to_string()),
        };

        Ok(Self {
            headers,
            content_type,
            body,
        })
    }

    /// Returns the members of a multipart entity, or an empty slice.
    #[must_use]
    pub fn parts(&self) -> &[Self] {
        match &self.body {
            Body::Multipart(parts) => parts,
            _ => &[],
        }
    }

    /// Returns the encapsulated message of a `message/rfc822` entity.
    #[must_use]
    pub fn message(&self) -> Option<&Self> {
        match &self.body {
            Body::Message(message) => Some(&**message),
            _ => None,
        }
    }

    /// Returns leaf content without the trailing line breaks the builder pads
    /// each part with.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            Body::Leaf(text) => Some(text.trim_end_matches("\r\n")),
            _ => None,
        }
    }

    /// Checks the content type, ignoring case. Entities without one never match.
    #[must_use]
    pub fn is(&self, main_type: &str, sub_type: &str) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.is(main_type, sub_type))
    }

    /// Returns every entity of this tree in document order, self first.
    #[must_use]
    pub fn walk(&self) -> Vec<&Self> {
        let mut out = vec![self];
        match &self.body {
            Body::Leaf(_) => {}
            Body::Multipart(parts) => out.extend(parts.iter().flat_map(Self::walk)),
            Body::Message(message) => out.extend(message.walk()),
        }
        out
    }
}

/// A parsed upload body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Members of the outer envelope.
    pub parts: Vec<Entity>,
}

impl Document {
    /// Parses a body whose outer envelope uses `boundaries.outer`.
    ///
    /// The outer envelope carries no headers of its own; its boundary travels
    /// in the upload request's content type.
    ///
    /// # Errors
    ///
    /// Returns an error if any entity fails to parse.
    pub fn parse(text: &str, boundaries: &Boundaries) -> Result<Self> {
        Ok(Self {
            parts: parse_parts(text, boundaries.outer.as_str())?,
        })
    }

    /// Returns the JSON metadata text.
    #[must_use]
    pub fn metadata(&self) -> Option<&str> {
        self.parts
            .first()
            .filter(|part| part.is("application", "json"))
            .and_then(Entity::text)
    }

    /// Returns the encapsulated RFC822 message.
    #[must_use]
    pub fn message(&self) -> Option<&Entity> {
        self.parts.get(1).and_then(Entity::message)
    }
}

/// Looks up a header by name, ignoring ASCII case as RFC 5322 readers do.
fn header<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        .map(|(_, value)| value)
}

/// Splits an entity into header block and body.
fn split_head(text: &str) -> (&str, &str) {
    if let Some(body) = text.strip_prefix("\r\n") {
        return ("", body);
    }
    match text.find("\r\n\r\n") {
        Some(pos) => (&text[..pos + 2], &text[pos + 4..]),
        None => (text, ""),
    }
}

/// Parses the members of a multipart body.
fn parse_parts(body: &str, boundary: &str) -> Result<Vec<Entity>> {
    split_parts(body, boundary)?
        .into_iter()
        .map(Entity::parse)
        .collect()
}

/// Splits a multipart body into raw member texts.
fn split_parts<'a>(body: &'a str, boundary: &str) -> Result<Vec<&'a str>> {
    let delimiter = format!("--{boundary}");
    let close = format!("--{boundary}--");

    let mut parts = Vec::new();
    let mut start: Option<usize> = None;
    let mut offset = 0;

    for line in body.split_inclusive('\n') {
        let bare = line.trim_end();
        if bare == delimiter || bare == close {
            if let Some(begin) = start.take() {
                let content = &body[begin..offset];
                parts.push(content.strip_suffix("\r\n").unwrap_or(content));
            }
            if bare == close {
                return Ok(parts);
            }
            start = Some(offset + line.len());
        }
        offset += line.len();
    }

    Err(Error::InvalidMultipart(format!(
        "no closing delimiter for boundary {boundary:?}"
    )))
}
