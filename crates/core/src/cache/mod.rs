mod error;
mod keys;
mod patterns;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{events_channel, list_key, list_pattern, record_key};
pub use patterns::pattern_matches;
pub use traits::{decode, encode, Cache, ChangePubSub};
