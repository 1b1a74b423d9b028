//! Wire types shared by the notes backend and its HTTP clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =====================================================
// Domain Types
// =====================================================

/// A persisted note as returned by every notes endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /api/notes`.
///
/// Both fields are optional at the wire level so that a missing field is
/// reported with the same message as an empty one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl CreateNoteRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

/// Body of `PUT /api/notes/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// =====================================================
// Response Types
// =====================================================

/// `{ "message": ... }` body used for delete confirmations and every error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_serializes_with_camel_case_timestamps() {
        let now = Utc::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: "A".to_string(),
            content: "B".to_string(),
            created_at: now,
            updated_at: now,
        };

        let value = serde_json::to_value(&note).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("createdAt"));
        assert!(obj.contains_key("updatedAt"));
        assert!(!obj.contains_key("created_at"));
        assert_eq!(obj["id"], serde_json::json!(note.id.to_string()));
    }

    #[test]
    fn update_request_omits_absent_fields() {
        let req = UpdateNoteRequest {
            title: None,
            content: Some("new body".to_string()),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert_eq!(json, r#"{"content":"new body"}"#);
    }

    #[test]
    fn create_request_tolerates_missing_fields() {
        let req: CreateNoteRequest = serde_json::from_str(r#"{"title":"only"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("only"));
        assert!(req.content.is_none());
    }
}
