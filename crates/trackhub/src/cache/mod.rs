//! Cache backend implementations.
//!
//! Concrete implementations of the cache traits defined in
//! `trackhub_core::cache`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): in-process LRU cache and broadcast pub/sub

#[cfg(not(feature = "memory"))]
compile_error!(
    "No cache backend selected. Enable the 'memory' feature. \
    Example: cargo build -p trackhub --features memory"
);

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::{MemoryCache, MemoryPubSub};
