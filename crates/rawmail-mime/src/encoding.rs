//! Content-Transfer-Encoding values.

use std::fmt;

/// Transfer encodings declared by generated parts.
///
/// Payloads are never encoded here: text is declared `7bit` and inline
/// objects and attachments are declared `base64` because the caller hands
/// them over already encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    /// 7-bit ASCII text.
    SevenBit,
    /// Base64 payload.
    Base64,
}

impl TransferEncoding {
    /// Returns the header token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SevenBit => "7bit",
            Self::Base64 => "base64",
        }
    }
}

impl fmt::Display for TransferEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
