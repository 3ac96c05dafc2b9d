//! # rawmail-mime
//!
//! Builds the nested MIME multipart body that message-store upload endpoints
//! (Gmail-style `uploadType=multipart`) accept: a JSON metadata block next to
//! a raw RFC822 message.
//!
//! ## Features
//!
//! - **Metadata block**: draft id and thread id association
//! - **Text**: plain, HTML, or both as `multipart/alternative`
//! - **Inline objects**: `multipart/related` with `Content-ID` references
//! - **Attachments**: pre-encoded base64 payloads
//! - **Boundaries**: fixed tokens by default, random ones on request
//! - **Inspection**: read a generated body back into a tree of parts
//!
//! ## Quick Start
//!
//! ```
//! use rawmail_mime::{Attachment, MessageRequest, create_body};
//!
//! let request = MessageRequest::new()
//!     .header("To", "a@b.com")
//!     .text_plain("hi")
//!     .attach(Attachment::new("text/csv", "MSwyLDM=").with_name("f.csv"));
//!
//! let body = create_body(&request);
//! assert!(body.starts_with("--foo_bar_baz\r\n"));
//! assert!(body.contains("Content-Disposition: attachment; filename=\"f.csv\""));
//! ```
//!
//! ## Structure
//!
//! ```text
//! multipart/mixed (outer)
//! ├── application/json             draft / thread metadata
//! └── message/rfc822
//!     └── multipart/mixed          caller headers
//!         ├── text                 plain | html | alternative
//!         │                        (inside multipart/related with inline objects)
//!         └── attachment ...
//! ```
//!
//! ## Caller contract
//!
//! Payloads are written verbatim: nothing is escaped, folded or encoded. No
//! boundary token may appear in caller content; [`BodyBuilder::try_build`]
//! checks this, [`create_body`] does not.
//!
//! ## Hardened building
//!
//! ```
//! use rawmail_mime::{BodyBuilder, Error, MessageRequest};
//!
//! let request = MessageRequest::new().text_plain("see foo_bar");
//! let err = BodyBuilder::new().try_build(&request).unwrap_err();
//! assert!(matches!(err, Error::BoundaryCollision { .. }));
//!
//! // Random boundaries make the collision go away.
//! let builder = BodyBuilder::new().with_random_boundaries();
//! assert!(builder.try_build(&request).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod attachment;
mod body;
mod content_type;
mod error;
mod header;
mod metadata;
mod related;
mod request;
mod text;
mod validate;

pub mod boundary;
pub mod encoding;
pub mod inspect;

pub use attachment::{Attachment, render_attachments, write_attachments};
pub use body::{BodyBuilder, create_body};
pub use boundary::{Boundaries, Boundary};
pub use content_type::ContentType;
pub use error::{Error, Result};
pub use header::Headers;
pub use metadata::Metadata;
pub use related::{EmbeddedObject, WrappedText};
pub use request::{Draft, MessageRequest};
pub use text::{TextFlavor, TextSection, write_text_part};
