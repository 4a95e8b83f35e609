//! Functional core for trackhub.
//!
//! Everything in this crate is pure: domain types, validation, calculations
//! and the traits that the server crate implements for storage and caching.
//! No module here performs I/O.

pub mod cache;
pub mod events;
pub mod freelance;
pub mod fuel;
pub mod maintenance;
pub mod record;
pub mod seed;
pub mod serde;
pub mod storage;
