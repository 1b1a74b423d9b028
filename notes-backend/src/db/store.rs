//! Data-access contract the notes API depends on.
//!
//! Implementations only guarantee atomic single-record writes. Nothing here
//! spans more than one note.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use notes_types::Note;
use uuid::Uuid;

/// Failures raised by a store backend. Never shown to HTTP clients verbatim.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("note {0} no longer exists")]
    NotFound(Uuid),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent collection of notes.
pub trait NoteStore: Send + Sync {
    /// All notes, newest `created_at` first.
    fn list(&self) -> StoreResult<Vec<Note>>;

    fn get(&self, id: Uuid) -> StoreResult<Option<Note>>;

    /// Insert a note with a fresh id. `created_at == updated_at` on the result.
    fn create(&self, title: &str, content: &str) -> StoreResult<Note>;

    /// Persist the current title/content of an existing note and bump
    /// `updated_at`. Returns the stored record, or `StoreError::NotFound` if
    /// the note was deleted in the meantime.
    fn save(&self, note: &Note) -> StoreResult<Note>;

    /// Returns true if a record was removed.
    fn delete_by_id(&self, id: Uuid) -> StoreResult<bool>;
}

/// Current time at the precision the stores persist.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Timestamp for a mutation of a note last touched at `previous`.
/// Always strictly later than `previous`, even if the clock has not moved.
pub fn next_updated_at(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}
