//! In-memory pub/sub over tokio broadcast channels.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use trackhub_core::cache::{events_channel, ChangePubSub, Result};
use trackhub_core::events::ChangeEvent;
use trackhub_core::record::RecordKind;

/// Channel capacity for pub/sub messages.
const CHANNEL_CAPACITY: usize = 100;

/// One broadcast channel per `events:{kind}` name.
#[derive(Debug, Clone)]
pub struct MemoryPubSub {
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<ChangeEvent>>>>,
}

impl MemoryPubSub {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn get_or_create_channel(&self, kind: RecordKind) -> broadcast::Sender<ChangeEvent> {
        let name = events_channel(kind);
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(&name) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;

        // Double-check after acquiring write lock
        if let Some(sender) = channels.get(&name) {
            return sender.clone();
        }

        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        channels.insert(name, sender.clone());
        sender
    }
}

impl Default for MemoryPubSub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChangePubSub for MemoryPubSub {
    async fn publish(&self, event: &ChangeEvent) -> Result<()> {
        let sender = self.get_or_create_channel(event.kind).await;

        // No receivers just means nobody is watching this kind.
        let _ = sender.send(event.clone());

        Ok(())
    }

    async fn subscribe(&self, kind: RecordKind) -> Result<broadcast::Receiver<ChangeEvent>> {
        let sender = self.get_or_create_channel(kind).await;
        Ok(sender.subscribe())
    }
}
