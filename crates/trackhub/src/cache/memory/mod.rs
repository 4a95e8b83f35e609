//! In-memory cache backend.
//!
//! A thread-safe LRU cache with TTL support and broadcast pub/sub for
//! single-instance deployments.

mod cache;
mod pubsub;

pub use cache::MemoryCache;
pub use pubsub::MemoryPubSub;
