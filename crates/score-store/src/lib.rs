//! Storage adapters for the scoring pipeline: a SQLite-backed store for the
//! batch runner and an in-memory store for tests.

mod memory;
mod sqlite;

pub use memory::InMemoryStore;
pub use sqlite::SqliteScoreStore;
