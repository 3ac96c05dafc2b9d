//! Ordered header block.

use crate::error::{Error, Result};
use std::fmt;

/// Line terminator used throughout the generated document.
pub(crate) const CRLF: &str = "\r\n";

/// Writes one `name: value` line terminated by CRLF.
pub(crate) fn write_header(out: &mut String, name: &str, value: impl fmt::Display) {
    out.push_str(name);
    out.push_str(": ");
    out.push_str(&value.to_string());
    out.push_str(CRLF);
}

/// Ordered collection of email headers.
///
/// Entries are emitted in insertion order and only entries added by the
/// caller are ever iterated. Names are compared exactly, so `To` and `to`
/// are two headers. Inserting an existing name replaces its value in place.
///
/// A block read by [`Headers::parse`] is kept as written and may repeat a
/// name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: Vec<(String, String)>,
}

impl Headers {
    /// Creates a new empty header collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a header, returning the previous value if the name existed.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => Some(std::mem::replace(&mut self.entries[index].1, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Gets the value of the first header with exactly this name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].1.as_str())
    }

    /// Removes the first header with exactly this name, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name)
            .map(|index| self.entries.remove(index).1)
    }

    /// Returns the number of headers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no header was inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over all headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Appends every header as a CRLF-terminated line.
    ///
    /// Names and values are written verbatim. An empty collection writes
    /// nothing, not even a line break.
    pub fn write_to(&self, out: &mut String) {
        for (name, value) in self.iter() {
            write_header(out, name, value);
        }
    }

    /// Parses a header block.
    ///
    /// Lines may end in CRLF or LF. Continuation lines (leading space or tab)
    /// are unfolded into the previous value. Parsing stops at the first empty
    /// line. The block is kept as written: repeated names stay, and only the
    /// first is returned by [`Headers::get`].
    ///
    /// # Errors
    ///
    /// Returns an error if a line is neither a continuation nor `name: value`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut headers = Self::new();

        for line in text.lines() {
            if line.is_empty() {
                break;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                let Some((_, value)) = headers.entries.last_mut() else {
                    return Err(Error::InvalidHeader(line.to_string()));
                };
                value.push(' ');
                value.push_str(line.trim());
                continue;
            }

            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| Error::InvalidHeader(line.to_string()))?;
            headers
                .entries
                .push((name.trim().to_string(), value.trim().to_string()));
        }

        Ok(headers)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing == name)
    }
}

impl<K, V> FromIterator<(K, V)> for Headers
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.insert(name, value);
        }
        headers
    }
}

impl fmt::Display for Headers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.iter() {
            write!(f, "{name}: {value}{CRLF}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Headers;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::fmt;

    impl Serialize for Headers {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (name, value) in self.iter() {
                map.serialize_entry(name, value)?;
            }
            map.end()
        }
    }

    struct HeadersVisitor;

    impl<'de> Visitor<'de> for HeadersVisitor {
        type Value = Headers;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of header names to string values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Headers, A::Error> {
            let mut headers = Headers::new();
            while let Some((name, value)) = access.next_entry::<String, String>()? {
                headers.insert(name, value);
            }
            Ok(headers)
        }
    }

    impl<'de> Deserialize<'de> for Headers {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(HeadersVisitor)
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect
)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_new() {
        let headers = Headers::new();
        assert!(headers.is_empty());
        assert_eq!(headers.to_string(), "");
    }

    #[test]
    fn test_headers_insertion_order() {
        let headers: Headers = [
            ("To", "a@b.com"),
            ("Subject", "Hello"),
            ("From", "c@d.com"),
        ]
        .into_iter()
        .collect();

        let names: Vec<_> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["To", "Subject", "From"]);
        assert_eq!(
            headers.to_string(),
            "To: a@b.com\r\nSubject: Hello\r\nFrom: c@d.com\r\n"
        );
    }

    #[test]
    fn test_headers_insert_replaces_in_place() {
        let mut headers = Headers::new();
        headers.insert("To", "alice@example.com");
        headers.insert("Subject", "Test");

        let previous = headers.insert("To", "bob@example.com");
        assert_eq!(previous.as_deref(), Some("alice@example.com"));
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.iter().next(), Some(("To", "bob@example.com")));
    }

    #[test]
    fn test_headers_names_are_case_sensitive() {
        let mut headers = Headers::new();
        headers.insert("To", "a@b.com");
        assert!(headers.insert("to", "c@d.com").is_none());

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("To"), Some("a@b.com"));
        assert_eq!(headers.get("to"), Some("c@d.com"));
        assert!(headers.get("TO").is_none());
        assert_eq!(headers.to_string(), "To: a@b.com\r\nto: c@d.com\r\n");
    }

    #[test]
    fn test_headers_remove() {
        let mut headers = Headers::new();
        headers.insert("Subject", "Test");
        assert!(headers.remove("subject").is_none());
        assert_eq!(headers.remove("Subject").as_deref(), Some("Test"));
        assert!(headers.get("Subject").is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_headers_write_to_verbatim() {
        let mut headers = Headers::new();
        headers.insert("X-Odd", "value: with colon");

        let mut out = String::new();
        headers.write_to(&mut out);
        assert_eq!(out, "X-Odd: value: with colon\r\n");
    }

    #[test]
    fn test_headers_parse() {
        let text = concat!(
            "From: sender@example.com\r\n",
            "To: recipient@example.com\r\n",
            "Content-Type: text/plain;\r\n",
            " charset=utf-8\r\n",
            "\r\n",
            "Body: not a header\r\n"
        );

        let headers = Headers::parse(text).unwrap();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("From"), Some("sender@example.com"));
        assert_eq!(
            headers.get("Content-Type"),
            Some("text/plain; charset=utf-8")
        );
        assert!(headers.get("Body").is_none());
    }

    #[test]
    fn test_headers_parse_rejects_garbage() {
        assert!(matches!(
            Headers::parse("no colon here\r\n"),
            Err(Error::InvalidHeader(_))
        ));
        assert!(matches!(
            Headers::parse(" leading continuation\r\n"),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_headers_parse_keeps_duplicates() {
        let headers = Headers::parse("Received: a\r\nReceived: b\r\n").unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("Received"), Some("a"));
        assert_eq!(headers.to_string(), "Received: a\r\nReceived: b\r\n");
    }
}
