//! Cache and pub/sub abstractions implemented by the server's backends.

use std::time::Duration;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::broadcast;

use crate::events::ChangeEvent;
use crate::record::RecordKind;

use super::Result;

/// Byte-oriented key/value cache with optional TTL.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the value for `key`, or `None` on a miss or expired entry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Deletes every key matching a `*` glob pattern.
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;
}

/// Fan-out of change events, one channel per record kind.
#[async_trait]
pub trait ChangePubSub: Send + Sync {
    /// Publishes an event on the channel of `event.kind`.
    async fn publish(&self, event: &ChangeEvent) -> Result<()>;

    /// Subscribes to every event of a kind published after this call.
    async fn subscribe(&self, kind: RecordKind) -> Result<broadcast::Receiver<ChangeEvent>>;
}

/// Encodes a value for storage in a [`Cache`].
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decodes a value previously stored with [`encode`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheError;
    use crate::fuel::Vehicle;

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let bytes = encode(&vec![1, 2, 3]).unwrap();
        let result = decode::<Vehicle>(&bytes);
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_encode_list_preserves_order() {
        let vehicles = vec![
            Vehicle::new("Ford", "Focus", 2015),
            Vehicle::new("Kia", "Rio", 2018),
        ];
        let decoded: Vec<Vehicle> = decode(&encode(&vehicles).unwrap()).unwrap();

        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].id, vehicles[0].id);
        assert_eq!(decoded[1].make, "Kia");
    }
}
