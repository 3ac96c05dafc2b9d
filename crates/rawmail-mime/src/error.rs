//! Error types for body construction and structure reading.

/// Result type alias for MIME operations.
pub type Result<T> = std::result::Result<T, Error>;

/// MIME error types.
///
/// Building a body never fails. These errors come from the hardened
/// [`BodyBuilder::try_build`](crate::BodyBuilder::try_build) path and from the
/// [`inspect`](crate::inspect) reader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field of an embedded object or attachment is empty.
    #[error("{part}[{index}] is missing required field `{field}`")]
    MissingField {
        /// Collection the part belongs to (`embedded` or `attachments`).
        part: &'static str,
        /// Position of the part in its collection.
        index: usize,
        /// Name of the empty field.
        field: &'static str,
    },

    /// A reserved boundary token appears inside caller-supplied content.
    #[error("Boundary `{boundary}` appears in {location}")]
    BoundaryCollision {
        /// The colliding boundary token.
        boundary: String,
        /// Where the token was found (e.g. `header "To"`, `attachments[1].data`).
        location: String,
    },

    /// Invalid MIME header.
    #[error("Invalid MIME header: {0}")]
    InvalidHeader(String),

    /// Invalid content type.
    #[error("Invalid content type: {0}")]
    InvalidContentType(String),

    /// Missing boundary in multipart entity.
    #[error("Missing boundary in multipart entity")]
    MissingBoundary,

    /// Invalid multipart structure.
    #[error("Invalid multipart structure: {0}")]
    InvalidMultipart(String),
}
