//! In-process note store.
//!
//! Used when the API is exercised without SQLite (tests, throwaway runs).
//! Notes are kept in insertion order; listing walks them backwards.

use notes_types::Note;
use parking_lot::RwLock;
use uuid::Uuid;

use super::store::{self, NoteStore, StoreError, StoreResult};

#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.read().is_empty()
    }
}

impl NoteStore for InMemoryNoteStore {
    fn list(&self) -> StoreResult<Vec<Note>> {
        let mut notes: Vec<Note> = self.notes.read().iter().rev().cloned().collect();
        // Stable sort keeps newer inserts ahead on equal timestamps.
        notes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notes)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<Note>> {
        Ok(self.notes.read().iter().find(|n| n.id == id).cloned())
    }

    fn create(&self, title: &str, content: &str) -> StoreResult<Note> {
        let now = store::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.notes.write().push(note.clone());
        Ok(note)
    }

    fn save(&self, note: &Note) -> StoreResult<Note> {
        let mut notes = self.notes.write();
        let stored = notes
            .iter_mut()
            .find(|n| n.id == note.id)
            .ok_or(StoreError::NotFound(note.id))?;

        stored.title = note.title.clone();
        stored.content = note.content.clone();
        stored.updated_at = store::next_updated_at(note.updated_at.max(stored.updated_at));
        Ok(stored.clone())
    }

    fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        let mut notes = self.notes.write();
        let before = notes.len();
        notes.retain(|n| n.id != id);
        Ok(notes.len() < before)
    }
}
