//! CRUD operations over a [`NoteStore`].

use notes_types::{CreateNoteRequest, Note};
use serde_json::Value;
use uuid::Uuid;

use super::validation::{NoteDraft, NotePatch};
use crate::db::NoteStore;
use crate::error::ApiError;

/// Parse a path identifier. Anything that is not a UUID is a client error,
/// never a lookup miss.
pub fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

pub fn list_notes(store: &dyn NoteStore) -> Result<Vec<Note>, ApiError> {
    Ok(store.list()?)
}

pub fn create_note(store: &dyn NoteStore, req: &CreateNoteRequest) -> Result<Note, ApiError> {
    let draft = NoteDraft::from_request(req)?;
    let note = store.create(&draft.title, &draft.content)?;
    log::info!("[NOTES] Created note {}", note.id);
    Ok(note)
}

/// Partial update. Order: id shape, lookup, validation of every supplied
/// field, then a single save. The body stays untyped until the note is known
/// to exist, so an unknown id is a 404 whatever the body holds.
pub fn update_note(store: &dyn NoteStore, raw_id: &str, body: &Value) -> Result<Note, ApiError> {
    let id = parse_id(raw_id)?;
    let mut note = store.get(id)?.ok_or(ApiError::NotFound)?;

    let patch = NotePatch::from_value(body)?;
    patch.apply(&mut note);

    let saved = store.save(&note)?;
    log::info!("[NOTES] Updated note {}", saved.id);
    Ok(saved)
}

pub fn delete_note(store: &dyn NoteStore, raw_id: &str) -> Result<(), ApiError> {
    let id = parse_id(raw_id)?;
    if !store.delete_by_id(id)? {
        return Err(ApiError::NotFound);
    }
    log::info!("[NOTES] Deleted note {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{InMemoryNoteStore, StoreError, StoreResult};
    use notes_types::UpdateNoteRequest;
    use serde_json::json;

    fn patch(title: Option<&str>, content: Option<&str>) -> Value {
        serde_json::to_value(UpdateNoteRequest {
            title: title.map(str::to_string),
            content: content.map(str::to_string),
        })
        .unwrap()
    }

    #[test]
    fn create_then_list_puts_new_note_first() {
        let store = InMemoryNoteStore::new();
        create_note(&store, &CreateNoteRequest::new("older", "x")).unwrap();
        let newest = create_note(&store, &CreateNoteRequest::new("newer", "y")).unwrap();

        let notes = list_notes(&store).unwrap();
        assert_eq!(notes[0], newest);
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn rejected_create_leaves_store_untouched() {
        let store = InMemoryNoteStore::new();
        assert!(create_note(&store, &CreateNoteRequest::new("", "body")).is_err());
        assert!(create_note(&store, &CreateNoteRequest::new("title", "   ")).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn update_unknown_id_is_not_found_for_any_body() {
        let store = InMemoryNoteStore::new();
        let id = Uuid::new_v4().to_string();

        for body in [
            patch(None, None),
            patch(Some("  "), None),
            patch(Some("t"), Some("c")),
            json!({ "title": 5 }),
            json!({ "title": null }),
        ] {
            let err = update_note(&store, &id, &body).unwrap_err();
            assert!(matches!(err, ApiError::NotFound));
        }
    }

    #[test]
    fn failed_update_does_not_mutate() {
        let store = InMemoryNoteStore::new();
        let created = create_note(&store, &CreateNoteRequest::new("T", "C")).unwrap();
        let id = created.id.to_string();

        assert!(update_note(&store, &id, &patch(Some("  "), None)).is_err());
        assert!(update_note(&store, &id, &patch(Some("changed"), Some(" "))).is_err());

        assert_eq!(store.get(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn null_field_is_rejected_without_touching_the_note() {
        let store = InMemoryNoteStore::new();
        let created = create_note(&store, &CreateNoteRequest::new("T", "C")).unwrap();
        let id = created.id.to_string();

        let err = update_note(&store, &id, &json!({ "title": null })).unwrap_err();
        assert_eq!(err.to_string(), "Title cannot be empty");
        let err = update_note(&store, &id, &json!({ "content": null })).unwrap_err();
        assert_eq!(err.to_string(), "Content cannot be empty");

        assert_eq!(store.get(created.id).unwrap().unwrap(), created);
    }

    #[test]
    fn padded_ids_are_malformed() {
        let id = Uuid::new_v4();
        for raw in [format!(" {}", id), format!("{} ", id), format!("\t{}\n", id)] {
            assert!(matches!(parse_id(&raw), Err(ApiError::InvalidId)));
        }
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn update_content_only_keeps_title_and_advances_updated_at() {
        let store = InMemoryNoteStore::new();
        let created = create_note(&store, &CreateNoteRequest::new("T", "C")).unwrap();

        let updated =
            update_note(&store, &created.id.to_string(), &patch(None, Some(" C2 "))).unwrap();
        assert_eq!(updated.title, "T");
        assert_eq!(updated.content, "C2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[test]
    fn malformed_ids_are_client_errors() {
        let store = InMemoryNoteStore::new();
        for raw in ["", "123", "not-a-uuid", "65a1f0c2e4b0a1b2c3d4e5f6"] {
            assert!(matches!(parse_id(raw), Err(ApiError::InvalidId)));
            assert!(matches!(delete_note(&store, raw), Err(ApiError::InvalidId)));
            assert!(matches!(
                update_note(&store, raw, &patch(Some("t"), None)),
                Err(ApiError::InvalidId)
            ));
        }
    }

    #[test]
    fn delete_twice_is_not_found_the_second_time() {
        let store = InMemoryNoteStore::new();
        let created = create_note(&store, &CreateNoteRequest::new("T", "C")).unwrap();
        let id = created.id.to_string();

        delete_note(&store, &id).unwrap();
        assert!(matches!(delete_note(&store, &id), Err(ApiError::NotFound)));
    }

    struct BrokenStore;

    impl NoteStore for BrokenStore {
        fn list(&self) -> StoreResult<Vec<Note>> {
            Err(StoreError::Corrupt("disk on fire".to_string()))
        }
        fn get(&self, _id: Uuid) -> StoreResult<Option<Note>> {
            Err(StoreError::Corrupt("disk on fire".to_string()))
        }
        fn create(&self, _title: &str, _content: &str) -> StoreResult<Note> {
            Err(StoreError::Corrupt("disk on fire".to_string()))
        }
        fn save(&self, _note: &Note) -> StoreResult<Note> {
            Err(StoreError::Corrupt("disk on fire".to_string()))
        }
        fn delete_by_id(&self, _id: Uuid) -> StoreResult<bool> {
            Err(StoreError::Corrupt("disk on fire".to_string()))
        }
    }

    #[test]
    fn store_faults_surface_as_store_errors() {
        let store = BrokenStore;
        assert!(matches!(list_notes(&store), Err(ApiError::Store(_))));
        assert!(matches!(
            create_note(&store, &CreateNoteRequest::new("a", "b")),
            Err(ApiError::Store(_))
        ));
        let id = Uuid::new_v4().to_string();
        assert!(matches!(delete_note(&store, &id), Err(ApiError::Store(_))));
        assert!(matches!(
            update_note(&store, &id, &patch(Some("a"), None)),
            Err(ApiError::Store(_))
        ));
    }
}
