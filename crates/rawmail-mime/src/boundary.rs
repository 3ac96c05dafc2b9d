//! Boundary tokens, one per nesting level.
//!
//! The format has no escaping: a token that shows up inside caller content
//! corrupts the document. The fixed tokens below are what the upload
//! endpoint has always been fed; [`Boundaries::random`] trades that for
//! per-call tokens that are very unlikely to collide.

use rand::Rng;
use rand::distributions::Alphanumeric;
use std::fmt;

use crate::header::CRLF;

/// Fixed token for the outer `multipart/mixed` upload envelope.
pub const OUTER: &str = "foo_bar_baz";
/// Fixed token for the `multipart/mixed` body of the RFC822 message.
pub const MESSAGE: &str = "foo_bar";
/// Fixed token for the `multipart/alternative` text envelope.
pub const ALTERNATIVE: &str = "foo";
/// Fixed token for the `multipart/related` inline-object envelope.
pub const RELATED: &str = "fizz_buzz";

/// Length of the random suffix of generated tokens.
const RANDOM_LEN: usize = 24;

/// A boundary delimiter token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Boundary(String);

impl Boundary {
    /// Creates a boundary from a token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the bare token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends `--token` and CRLF.
    pub(crate) fn write_delimiter(&self, out: &mut String) {
        out.push_str("--");
        out.push_str(&self.0);
        out.push_str(CRLF);
    }

    /// Appends `--token--` with no trailing line break.
    pub(crate) fn write_close(&self, out: &mut String) {
        out.push_str("--");
        out.push_str(&self.0);
        out.push_str("--");
    }

    fn random(prefix: &str) -> Self {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_LEN)
            .map(char::from)
            .collect();
        Self(format!("{prefix}_{suffix}"))
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four boundary tokens used by one body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundaries {
    /// Outer upload envelope.
    pub outer: Boundary,
    /// Body of the RFC822 message; also delimits attachments.
    pub message: Boundary,
    /// Plain/HTML alternative envelope.
    pub alternative: Boundary,
    /// Inline-object related envelope.
    pub related: Boundary,
}

impl Boundaries {
    /// Creates a set from explicit tokens.
    #[must_use]
    pub fn new(
        outer: impl Into<String>,
        message: impl Into<String>,
        alternative: impl Into<String>,
        related: impl Into<String>,
    ) -> Self {
        Self {
            outer: Boundary::new(outer),
            message: Boundary::new(message),
            alternative: Boundary::new(alternative),
            related: Boundary::new(related),
        }
    }

    /// Returns the fixed tokens (`foo_bar_baz`, `foo_bar`, `foo`, `fizz_buzz`).
    #[must_use]
    pub fn fixed() -> Self {
        Self::new(OUTER, MESSAGE, ALTERNATIVE, RELATED)
    }

    /// Generates fresh random tokens.
    ///
    /// Each token carries a distinct level prefix, so no token is a prefix of
    /// another.
    #[must_use]
    pub fn random() -> Self {
        Self {
            outer: Boundary::random("outer"),
            message: Boundary::random("message"),
            alternative: Boundary::random("alternative"),
            related: Boundary::random("related"),
        }
    }

    /// Returns every token, outermost first.
    #[must_use]
    pub const fn all(&self) -> [&Boundary; 4] {
        [&self.outer, &self.message, &self.alternative, &self.related]
    }

    /// Returns the first token found inside `text`, if any.
    #[must_use]
    pub fn find_in(&self, text: &str) -> Option<&Boundary> {
        self.all()
            .into_iter()
            .find(|boundary| text.contains(boundary.as_str()))
    }
}

impl Default for Boundaries {
    fn default() -> Self {
        Self::fixed()
    }
}
