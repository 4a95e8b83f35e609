//! SQLite storage backend.
//!
//! Every kind shares one document table: the record body is stored as JSON
//! next to the columns needed for lookups (`kind`, `id`, `parent_id`,
//! `created_at`). Uses `rusqlite` for synchronous access and `tokio-rusqlite`
//! for async wrapping.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::{open_connection, SqliteRepository};
