//! Notes operations — the CRUD contract behind `/api/notes`.
//!
//! Validation lives in [`validation`]; [`service`] sequences lookups,
//! validation and store writes so that a rejected request never mutates state.

pub mod service;
pub mod validation;

pub use service::{create_note, delete_note, list_notes, parse_id, update_note};
pub use validation::{NoteDraft, NotePatch};
