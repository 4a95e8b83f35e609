//! In-memory storage backend.
//!
//! Stores records in a `HashMap` behind a tokio `RwLock`. Data is lost when
//! the process exits, which makes it the default for development and tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use trackhub::storage::InMemoryRepository;
//! use trackhub_core::fuel::Vehicle;
//!
//! let vehicles = InMemoryRepository::<Vehicle>::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
