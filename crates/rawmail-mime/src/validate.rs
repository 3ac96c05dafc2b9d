//! Request checks for the hardened build path.

use crate::boundary::Boundaries;
use crate::error::{Error, Result};
use crate::request::MessageRequest;

impl MessageRequest {
    /// Checks required fields and boundary collisions.
    ///
    /// Inline objects need a non-empty `type`, `id` and `data`; attachments
    /// need a non-empty `type` and `data`. No boundary token may occur in any
    /// header, text, JSON field, name, id or payload.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, required fields first.
    pub fn validate(&self, boundaries: &Boundaries) -> Result<()> {
        self.check_required()?;
        self.check_collisions(boundaries)
    }

    fn check_required(&self) -> Result<()> {
        for (index, object) in self.embedded.iter().enumerate() {
            for (field, value) in [
                ("type", &object.content_type),
                ("id", &object.id),
                ("data", &object.data),
            ] {
                if value.is_empty() {
                    return Err(Error::MissingField {
                        part: "embedded",
                        index,
                        field,
                    });
                }
            }
        }

        for (index, attachment) in self.attachments.iter().enumerate() {
            for (field, value) in [("type", &attachment.content_type), ("data", &attachment.data)] {
                if value.is_empty() {
                    return Err(Error::MissingField {
                        part: "attachments",
                        index,
                        field,
                    });
                }
            }
        }

        Ok(())
    }

    fn check_collisions(&self, boundaries: &Boundaries) -> Result<()> {
        if let Some(id) = self.draft.as_ref().and_then(|draft| draft.id.as_deref()) {
            check(boundaries, id, || "draft.id".to_string())?;
        }
        if let Some(thread_id) = &self.thread_id {
            check(boundaries, thread_id, || "threadId".to_string())?;
        }
        for (name, value) in self.headers.iter() {
            check(boundaries, name, || format!("header name {name:?}"))?;
            check(boundaries, value, || format!("header {name:?}"))?;
        }
        if let Some(text) = &self.text_plain {
            check(boundaries, text, || "textPlain".to_string())?;
        }
        if let Some(html) = &self.text_html {
            check(boundaries, html, || "textHtml".to_string())?;
        }
        for (index, object) in self.embedded.iter().enumerate() {
            check(boundaries, &object.content_type, || format!("embedded[{index}].type"))?;
            check(boundaries, &object.id, || format!("embedded[{index}].id"))?;
            if let Some(name) = &object.name {
                check(boundaries, name, || format!("embedded[{index}].name"))?;
            }
            check(boundaries, &object.data, || format!("embedded[{index}].data"))?;
        }
        for (index, attachment) in self.attachments.iter().enumerate() {
            check(boundaries, &attachment.content_type, || {
                format!("attachments[{index}].type")
            })?;
            if let Some(name) = &attachment.name {
                check(boundaries, name, || format!("attachments[{index}].name"))?;
            }
            check(boundaries, &attachment.data, || format!("attachments[{index}].data"))?;
        }

        Ok(())
    }
}

/// Fails when any boundary token occurs in `text`.
fn check(boundaries: &Boundaries, text: &str, location: impl FnOnce() -> String) -> Result<()> {
    match boundaries.find_in(text) {
        Some(boundary) => Err(Error::BoundaryCollision {
            boundary: boundary.to_string(),
            location: location(),
        }),
        None => Ok(()),
    }
}
