//! Notes table operations

use chrono::{DateTime, SecondsFormat, Utc};
use notes_types::Note;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::store::{self, NoteStore, StoreError, StoreResult};
use crate::db::Database;

const NOTE_COLUMNS: &str = "id, title, content, created_at, updated_at";

/// Raw row as stored; converted into a [`Note`] after the statement finishes.
struct NoteRow {
    id: String,
    title: String,
    content: String,
    created_at: String,
    updated_at: String,
}

impl NoteRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            created_at: row.get(3)?,
            updated_at: row.get(4)?,
        })
    }
}

impl TryFrom<NoteRow> for Note {
    type Error = StoreError;

    fn try_from(row: NoteRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| StoreError::Corrupt(format!("note id {:?}: {}", row.id, e)))?;
        Ok(Note {
            id,
            title: row.title,
            content: row.content,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Fixed-width RFC 3339 so that text ordering matches time ordering.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("timestamp {:?}: {}", raw, e)))
}

impl Database {
    /// List all notes, newest first
    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM notes ORDER BY created_at DESC, seq DESC",
            NOTE_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], NoteRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(Note::try_from).collect()
    }

    /// Get a note by id
    pub fn get_note(&self, id: Uuid) -> StoreResult<Option<Note>> {
        let conn = self.conn()?;
        let row = conn
            .query_row(
                &format!("SELECT {} FROM notes WHERE id = ?1", NOTE_COLUMNS),
                params![id.to_string()],
                NoteRow::from_row,
            )
            .optional()?;
        row.map(Note::try_from).transpose()
    }

    /// Insert a new note with a fresh id and matching timestamps
    pub fn insert_note(&self, title: &str, content: &str) -> StoreResult<Note> {
        let now = store::now();
        let note = Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };

        let conn = self.conn()?;
        let stamp = format_timestamp(&now);
        conn.execute(
            "INSERT INTO notes (id, title, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![note.id.to_string(), note.title, note.content, stamp, stamp],
        )?;
        Ok(note)
    }

    /// Write back title/content of an existing note with a fresh updated_at
    pub fn update_note(&self, note: &Note) -> StoreResult<Note> {
        let updated_at = store::next_updated_at(note.updated_at);

        let conn = self.conn()?;
        let count = conn.execute(
            "UPDATE notes SET title = ?1, content = ?2, updated_at = ?3 WHERE id = ?4",
            params![
                note.title,
                note.content,
                format_timestamp(&updated_at),
                note.id.to_string()
            ],
        )?;
        if count == 0 {
            return Err(StoreError::NotFound(note.id));
        }

        Ok(Note {
            updated_at,
            ..note.clone()
        })
    }

    /// Delete a note by id
    pub fn delete_note(&self, id: Uuid) -> StoreResult<bool> {
        let conn = self.conn()?;
        let count = conn.execute("DELETE FROM notes WHERE id = ?1", params![id.to_string()])?;
        Ok(count > 0)
    }
}

impl NoteStore for Database {
    fn list(&self) -> StoreResult<Vec<Note>> {
        self.list_notes()
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<Note>> {
        self.get_note(id)
    }

    fn create(&self, title: &str, content: &str) -> StoreResult<Note> {
        self.insert_note(title, content)
    }

    fn save(&self, note: &Note) -> StoreResult<Note> {
        self.update_note(note)
    }

    fn delete_by_id(&self, id: Uuid) -> StoreResult<bool> {
        self.delete_note(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::PoolOptions;
    use tempfile::tempdir;

    fn open_temp() -> (tempfile::TempDir, Database) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("notes.db");
        let db = Database::new(db_path.to_str().unwrap(), &PoolOptions::default())
            .expect("Failed to open database");
        (dir, db)
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let (_dir, db) = open_temp();

        let created = db.insert_note("A", "B").expect("Failed to insert note");
        assert_eq!(created.created_at, created.updated_at);

        let fetched = db.get_note(created.id).unwrap().expect("note should exist");
        assert_eq!(fetched, created);
    }

    #[test]
    fn test_list_is_newest_first() {
        let (_dir, db) = open_temp();

        let first = db.insert_note("first", "1").unwrap();
        let second = db.insert_note("second", "2").unwrap();
        let third = db.insert_note("third", "3").unwrap();

        let ids: Vec<Uuid> = db.list_notes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[test]
    fn test_update_bumps_updated_at_only() {
        let (_dir, db) = open_temp();

        let created = db.insert_note("title", "old").unwrap();
        let mut edited = created.clone();
        edited.content = "new".to_string();

        let saved = db.update_note(&edited).unwrap();
        assert!(saved.updated_at > created.updated_at);
        assert_eq!(saved.created_at, created.created_at);

        let fetched = db.get_note(created.id).unwrap().unwrap();
        assert_eq!(fetched.title, "title");
        assert_eq!(fetched.content, "new");
        assert_eq!(fetched.updated_at, saved.updated_at);
    }

    #[test]
    fn test_update_of_deleted_note_is_not_found() {
        let (_dir, db) = open_temp();

        let created = db.insert_note("gone", "soon").unwrap();
        assert!(db.delete_note(created.id).unwrap());

        let err = db.update_note(&created).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == created.id));
    }

    #[test]
    fn test_delete_reports_whether_a_row_was_removed() {
        let (_dir, db) = open_temp();

        let created = db.insert_note("x", "y").unwrap();
        assert!(db.delete_note(created.id).unwrap());
        assert!(!db.delete_note(created.id).unwrap());
        assert!(db.get_note(created.id).unwrap().is_none());
    }

    #[test]
    fn test_schema_rejects_blank_fields() {
        let (_dir, db) = open_temp();

        let err = db.insert_note("   ", "body").unwrap_err();
        assert!(matches!(err, StoreError::Sqlite(_)));
        assert!(db.list_notes().unwrap().is_empty());
    }

    #[test]
    fn test_in_memory_database_keeps_rows_between_calls() {
        let db = Database::new(":memory:", &PoolOptions::default()).unwrap();
        let created = db.insert_note("memory", "resident").unwrap();
        assert_eq!(db.list_notes().unwrap().len(), 1);
        assert!(db.get_note(created.id).unwrap().is_some());
    }

    #[test]
    fn test_reopen_preserves_notes() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("notes.db");
        let path = db_path.to_str().unwrap();

        let id = {
            let db = Database::new(path, &PoolOptions::default()).unwrap();
            db.insert_note("durable", "yes").unwrap().id
        };

        let db = Database::new(path, &PoolOptions::default()).unwrap();
        let note = db.get_note(id).unwrap().expect("note should survive reopen");
        assert_eq!(note.title, "durable");
    }
}
