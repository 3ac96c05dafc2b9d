//! MIME content type handling.

use crate::error::{Error, Result};
use std::fmt;

/// MIME content type with ordered parameters.
///
/// Rendering always quotes parameter values, matching the
/// `text/plain; charset="UTF-8"` form expected by the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentType {
    /// Main type (e.g., "text", "image", "multipart").
    pub main_type: String,
    /// Subtype (e.g., "plain", "html", "related").
    pub sub_type: String,
    parameters: Vec<(String, String)>,
}

impl ContentType {
    /// Creates a new content type without parameters.
    #[must_use]
    pub fn new(main_type: impl Into<String>, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.into(),
            sub_type: sub_type.into(),
            parameters: Vec::new(),
        }
    }

    /// Creates a `text/plain; charset="UTF-8"` content type.
    #[must_use]
    pub fn text_plain() -> Self {
        Self::new("text", "plain").with_parameter("charset", "UTF-8")
    }

    /// Creates a `text/html; charset="UTF-8"` content type.
    #[must_use]
    pub fn text_html() -> Self {
        Self::new("text", "html").with_parameter("charset", "UTF-8")
    }

    /// Creates an `application/json; charset="UTF-8"` content type.
    #[must_use]
    pub fn application_json() -> Self {
        Self::new("application", "json").with_parameter("charset", "UTF-8")
    }

    /// Creates a `message/rfc822` content type.
    #[must_use]
    pub fn message_rfc822() -> Self {
        Self::new("message", "rfc822")
    }

    /// Creates a multipart/mixed content type with boundary.
    #[must_use]
    pub fn multipart_mixed(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "mixed").with_parameter("boundary", boundary)
    }

    /// Creates a multipart/alternative content type with boundary.
    #[must_use]
    pub fn multipart_alternative(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "alternative").with_parameter("boundary", boundary)
    }

    /// Creates a multipart/related content type with boundary.
    #[must_use]
    pub fn multipart_related(boundary: impl Into<String>) -> Self {
        Self::new("multipart", "related").with_parameter("boundary", boundary)
    }

    /// Adds or replaces a parameter, keeping first-insertion order.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self
            .parameters
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&key))
        {
            Some((_, existing)) => *existing = value,
            None => self.parameters.push((key, value)),
        }
        self
    }

    /// Returns a parameter value by case-insensitive name.
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    /// Returns the boundary parameter if present.
    #[must_use]
    pub fn boundary(&self) -> Option<&str> {
        self.parameter("boundary")
    }

    /// Checks if this is a multipart content type.
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("multipart")
    }

    /// Checks if this is an encapsulated `message/rfc822` entity.
    #[must_use]
    pub fn is_rfc822(&self) -> bool {
        self.main_type.eq_ignore_ascii_case("message") && self.sub_type.eq_ignore_ascii_case("rfc822")
    }

    /// Checks whether the type matches `main/sub`, ignoring case.
    #[must_use]
    pub fn is(&self, main_type: &str, sub_type: &str) -> bool {
        self.main_type.eq_ignore_ascii_case(main_type) && self.sub_type.eq_ignore_ascii_case(sub_type)
    }

    /// Parses a content type string.
    ///
    /// Format: `type/subtype; param1=value1; param2="value2"`
    ///
    /// # Errors
    ///
    /// Returns an error if the type or subtype is missing.
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.split(';');

        let type_str = parts.next().unwrap_or_default().trim();
        let (main_type, sub_type) = type_str
            .split_once('/')
            .ok_or_else(|| Error::InvalidContentType(s.to_string()))?;
        let (main_type, sub_type) = (main_type.trim(), sub_type.trim());
        if main_type.is_empty() || sub_type.is_empty() {
            return Err(Error::InvalidContentType(s.to_string()));
        }

        let mut content_type = Self::new(main_type.to_lowercase(), sub_type.to_lowercase());
        for param in parts {
            if let Some((key, value)) = param.trim().split_once('=') {
                content_type = content_type
                    .with_parameter(key.trim().to_lowercase(), value.trim().trim_matches('"'));
            }
        }

        Ok(content_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let main = &self.main_type;
        let sub = &self.sub_type;
        write!(f, "{main}/{sub}")?;

        for (key, value) in &self.parameters {
            write!(f, "; {key}=\"{value}\"")?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_renderings() {
        assert_eq!(
            ContentType::text_plain().to_string(),
            "text/plain; charset=\"UTF-8\""
        );
        assert_eq!(
            ContentType::text_html().to_string(),
            "text/html; charset=\"UTF-8\""
        );
        assert_eq!(
            ContentType::application_json().to_string(),
            "application/json; charset=\"UTF-8\""
        );
        assert_eq!(ContentType::message_rfc822().to_string(), "message/rfc822");
        assert_eq!(
            ContentType::multipart_mixed("foo_bar").to_string(),
            "multipart/mixed; boundary=\"foo_bar\""
        );
        assert_eq!(
            ContentType::multipart_alternative("foo").to_string(),
            "multipart/alternative; boundary=\"foo\""
        );
        assert_eq!(
            ContentType::multipart_related("fizz_buzz").to_string(),
            "multipart/related; boundary=\"fizz_buzz\""
        );
    }

    #[test]
    fn test_multipart_mixed() {
        let ct = ContentType::multipart_mixed("boundary123");
        assert!(ct.is("multipart", "mixed"));
        assert_eq!(ct.boundary(), Some("boundary123"));
        assert!(ct.is_multipart());
        assert!(!ct.is_rfc822());
    }

    #[test]
    fn test_content_type_parse() {
        let ct = ContentType::parse("Text/Plain; Charset=utf-8").unwrap();
        assert!(ct.is("text", "plain"));
        assert_eq!(ct.parameter("charset"), Some("utf-8"));
    }

    #[test]
    fn test_content_type_parse_quoted_boundary_keeps_case() {
        let ct = ContentType::parse("multipart/related; boundary=\"Fizz_Buzz\"").unwrap();
        assert!(ct.is_multipart());
        assert_eq!(ct.boundary(), Some("Fizz_Buzz"));
    }

    #[test]
    fn test_content_type_parse_invalid() {
        assert!(matches!(
            ContentType::parse("textplain"),
            Err(Error::InvalidContentType(_))
        ));
        assert!(matches!(
            ContentType::parse("text/"),
            Err(Error::InvalidContentType(_))
        ));
    }

    #[test]
    fn test_with_parameter_replaces() {
        let ct = ContentType::new("image", "png")
            .with_parameter("name", "a.png")
            .with_parameter("NAME", "b.png");
        assert_eq!(ct.parameter("name"), Some("b.png"));
        assert_eq!(ct.to_string(), "image/png; name=\"b.png\"");
    }
}
