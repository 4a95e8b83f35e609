//! Cached repository decorator.
//!
//! Wraps any [`Repository`](trackhub_core::storage::Repository) with the
//! cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, invalidate cache, publish a change event
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(InMemoryRepository::<Vehicle>::new());
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//! let pubsub = Arc::new(MemoryPubSub::new());
//!
//! let vehicles = CachedRepository::new(repo, cache, pubsub, Duration::from_secs(300));
//! ```

mod repository;

pub use repository::CachedRepository;
