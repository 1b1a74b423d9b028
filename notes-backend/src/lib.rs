//! Notes backend — REST CRUD over a note store, plus a typed HTTP client.

use std::sync::Arc;
use std::time::Instant;

pub mod client;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod notes;
pub mod server;

use db::NoteStore;

/// Shared per-worker application state.
pub struct AppState {
    /// The single long-lived store handle; every handler goes through it.
    pub store: Arc<dyn NoteStore>,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }
}
