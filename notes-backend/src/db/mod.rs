pub mod memory;
pub mod sqlite;
pub mod store;
pub mod tables;

pub use memory::InMemoryNoteStore;
pub use sqlite::{Database, DbConn, PoolOptions};
pub use store::{NoteStore, StoreError, StoreResult};
