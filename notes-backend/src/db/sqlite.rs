//! SQLite-backed database handle.
//!
//! Wraps an r2d2 pool so that handlers never wait on a connection forever:
//! checkout and SQLite's busy handler share the configured timeout.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use super::store::StoreResult;

pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Pool settings, normally taken from [`crate::config::Config`].
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_size: u32,
    pub timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 8,
            timeout: Duration::from_secs(5),
        }
    }
}

pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Open (or create) the database at `database_url` and ensure the schema exists.
    ///
    /// `:memory:` gives a private in-memory database held by a single pooled
    /// connection that is never recycled.
    pub fn new(database_url: &str, options: &PoolOptions) -> StoreResult<Self> {
        let busy_ms = options.timeout.as_millis();
        let in_memory = database_url == ":memory:";

        let manager = if in_memory {
            SqliteConnectionManager::memory()
        } else {
            if let Some(parent) = Path::new(database_url).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        log::error!("[DB] Failed to create {}: {}", parent.display(), e);
                        e
                    })?;
                }
            }
            SqliteConnectionManager::file(database_url)
        };
        let manager = manager.with_init(move |c| {
            c.execute_batch(&format!(
                "PRAGMA journal_mode=WAL; PRAGMA busy_timeout={};",
                busy_ms
            ))
        });

        let builder = Pool::builder().connection_timeout(options.timeout);
        let pool = if in_memory {
            builder
                .max_size(1)
                .min_idle(Some(1))
                .idle_timeout(None)
                .max_lifetime(None)
                .build(manager)?
        } else {
            builder.max_size(options.max_size.max(1)).build(manager)?
        };

        let db = Self { pool };
        db.create_tables()?;
        Ok(db)
    }

    /// Check a connection out of the pool.
    pub fn conn(&self) -> StoreResult<DbConn> {
        Ok(self.pool.get()?)
    }

    fn create_tables(&self) -> StoreResult<()> {
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS notes (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id TEXT NOT NULL UNIQUE,
                title TEXT NOT NULL CHECK (length(trim(title)) > 0),
                content TEXT NOT NULL CHECK (length(trim(content)) > 0),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_notes_created_at ON notes(created_at);",
        )?;
        Ok(())
    }
}
