//! Input trimming and validation for note fields.

use notes_types::{CreateNoteRequest, Note};
use serde_json::{Map, Value};

use crate::error::{ApiError, MSG_CONTENT_EMPTY, MSG_CREATE_REQUIRED, MSG_TITLE_EMPTY};

/// Trimmed value, or `None` if nothing but whitespace remains.
fn trimmed(value: &str) -> Option<String> {
    let t = value.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// A validated create request: both fields present, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn from_request(req: &CreateNoteRequest) -> Result<Self, ApiError> {
        let title = req.title.as_deref().and_then(trimmed);
        let content = req.content.as_deref().and_then(trimmed);
        match (title, content) {
            (Some(title), Some(content)) => Ok(Self { title, content }),
            _ => Err(ApiError::Validation(MSG_CREATE_REQUIRED)),
        }
    }
}

fn patch_field(
    fields: &Map<String, Value>,
    key: &str,
    empty: &'static str,
) -> Result<Option<String>, ApiError> {
    match fields.get(key) {
        None => Ok(None),
        Some(Value::String(raw)) => trimmed(raw).map(Some).ok_or(ApiError::Validation(empty)),
        Some(Value::Null) => Err(ApiError::Validation(empty)),
        Some(_) => Err(ApiError::InvalidBody),
    }
}

/// A validated partial update. Only present fields are carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    /// Validates every supplied field of a raw update body before anything
    /// is applied. Title is checked first.
    ///
    /// A key that is present with `null` counts as supplied and empty; only a
    /// missing key leaves the field unchanged.
    pub fn from_value(body: &Value) -> Result<Self, ApiError> {
        let fields = body.as_object().ok_or(ApiError::InvalidBody)?;
        let title = patch_field(fields, "title", MSG_TITLE_EMPTY)?;
        let content = patch_field(fields, "content", MSG_CONTENT_EMPTY)?;
        Ok(Self { title, content })
    }

    pub fn apply(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(content) = self.content {
            note.content = content;
        }
    }
}
