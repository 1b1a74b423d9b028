//! Table modules - each holds the `impl Database` block for one table.

mod notes;
