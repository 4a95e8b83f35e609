//! Application state with repository-based storage.
//!
//! This module defines the shared application state that is passed to all
//! request handlers. It holds one cached repository per record kind and the
//! change-event history replayed to SSE clients. Backend combinations are
//! selected via feature flags.

use std::{
    collections::{HashSet, VecDeque},
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};

use chrono::{Local, NaiveDate, Utc};
use tokio::sync::broadcast;
use uuid::Uuid;

use trackhub_core::cache::{Cache, ChangePubSub};
use trackhub_core::events::ChangeEvent;
use trackhub_core::freelance::{Client, Invoice, Project, TimeEntry};
use trackhub_core::fuel::{FillUp, Trip, Vehicle};
use trackhub_core::maintenance::{Contractor, MaintenanceTask, ServiceLog};
use trackhub_core::record::{Record, RecordKind};
use trackhub_core::seed::SeedData;
use trackhub_core::storage::{Repository, RepositoryError};

use crate::config::Config;
use crate::storage::CachedRepository;

// Cache features: exactly one must be enabled
#[cfg(not(feature = "memory"))]
compile_error!("Must enable a cache feature: 'memory'");

/// Capacity of the local fan-out from event history to SSE streams.
const LIVE_CHANNEL_CAPACITY: usize = 256;

/// Runs `$body` with `$repo` bound to the repository of `$kind`.
macro_rules! with_repository {
    ($state:expr, $kind:expr, $repo:ident => $body:expr) => {
        match $kind {
            RecordKind::Vehicle => {
                let $repo = &$state.vehicles;
                $body
            }
            RecordKind::FillUp => {
                let $repo = &$state.fill_ups;
                $body
            }
            RecordKind::Trip => {
                let $repo = &$state.trips;
                $body
            }
            RecordKind::MaintenanceTask => {
                let $repo = &$state.maintenance_tasks;
                $body
            }
            RecordKind::ServiceLog => {
                let $repo = &$state.service_logs;
                $body
            }
            RecordKind::Contractor => {
                let $repo = &$state.contractors;
                $body
            }
            RecordKind::Client => {
                let $repo = &$state.clients;
                $body
            }
            RecordKind::Project => {
                let $repo = &$state.projects;
                $body
            }
            RecordKind::TimeEntry => {
                let $repo = &$state.time_entries;
                $body
            }
            RecordKind::Invoice => {
                let $repo = &$state.invoices;
                $body
            }
        }
    };
}

/// A stored event with its ID for replay on reconnection.
#[derive(Clone, Debug)]
pub struct StoredEvent {
    pub id: u64,
    pub event: ChangeEvent,
}

/// Builds the raw (uncached) repository for any record type.
pub trait StorageBackend {
    fn repository<T: Record>(&self) -> Arc<dyn Repository<T>>;
}

/// Shared application state.
///
/// This is cloned for each request handler. Every repository is wrapped in
/// a [`CachedRepository`], so writes through it invalidate the cache and
/// publish change events.
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn Repository<Vehicle>>,
    pub fill_ups: Arc<dyn Repository<FillUp>>,
    pub trips: Arc<dyn Repository<Trip>>,
    pub maintenance_tasks: Arc<dyn Repository<MaintenanceTask>>,
    pub service_logs: Arc<dyn Repository<ServiceLog>>,
    pub contractors: Arc<dyn Repository<Contractor>>,
    pub clients: Arc<dyn Repository<Client>>,
    pub projects: Arc<dyn Repository<Project>>,
    pub time_entries: Arc<dyn Repository<TimeEntry>>,
    pub invoices: Arc<dyn Repository<Invoice>>,

    /// Change-event pub/sub the cached repositories publish to.
    pub pubsub: Arc<dyn ChangePubSub>,

    /// Event counter for generating unique event IDs.
    event_counter: Arc<AtomicU64>,
    /// Event history for SSE reconnection catch-up.
    event_history: Arc<RwLock<VecDeque<StoredEvent>>>,
    /// Maximum events to keep in history.
    event_history_max_size: usize,
    /// Kinds with active event listeners.
    active_listeners: Arc<RwLock<HashSet<RecordKind>>>,
    /// Every event added to history, as it is added.
    live_tx: broadcast::Sender<StoredEvent>,

    /// Shutdown signal sender for SSE connections and listeners.
    shutdown_tx: broadcast::Sender<()>,

    /// Upper bound on request handling time.
    pub request_timeout: Duration,
}

impl AppState {
    /// Wires one cached repository per kind over the given backend.
    pub fn build(
        backend: &impl StorageBackend,
        cache: Arc<dyn Cache>,
        pubsub: Arc<dyn ChangePubSub>,
        config: &Config,
    ) -> Self {
        fn cached<T: Record>(
            backend: &impl StorageBackend,
            cache: &Arc<dyn Cache>,
            pubsub: &Arc<dyn ChangePubSub>,
            config: &Config,
        ) -> Arc<dyn Repository<T>> {
            Arc::new(CachedRepository::new(
                backend.repository::<T>(),
                cache.clone(),
                pubsub.clone(),
                config.cache_ttl(),
            ))
        }

        let (shutdown_tx, _) = broadcast::channel(1);
        let (live_tx, _) = broadcast::channel(LIVE_CHANNEL_CAPACITY);

        Self {
            vehicles: cached(backend, &cache, &pubsub, config),
            fill_ups: cached(backend, &cache, &pubsub, config),
            trips: cached(backend, &cache, &pubsub, config),
            maintenance_tasks: cached(backend, &cache, &pubsub, config),
            service_logs: cached(backend, &cache, &pubsub, config),
            contractors: cached(backend, &cache, &pubsub, config),
            clients: cached(backend, &cache, &pubsub, config),
            projects: cached(backend, &cache, &pubsub, config),
            time_entries: cached(backend, &cache, &pubsub, config),
            invoices: cached(backend, &cache, &pubsub, config),
            pubsub,
            event_counter: Arc::new(AtomicU64::new(1)),
            event_history: Arc::new(RwLock::new(VecDeque::new())),
            event_history_max_size: config.event_history_max_size,
            active_listeners: Arc::new(RwLock::new(HashSet::new())),
            live_tx,
            shutdown_tx,
            request_timeout: config.request_timeout(),
        }
    }

    /// The date used for due-date and overdue checks.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Typed access to the repository of `T`.
    pub fn repository<T: Stored>(&self) -> &Arc<dyn Repository<T>> {
        T::repository(self)
    }

    /// Returns whether a record of `kind` with `id` exists.
    pub async fn exists(&self, kind: RecordKind, id: Uuid) -> Result<bool, RepositoryError> {
        with_repository!(self, kind, repo => repo.get(id).await.map(|r| r.is_some()))
    }

    /// Fails with `InvalidData` when any referenced record is missing.
    pub async fn check_references<T: Record>(&self, record: &T) -> Result<(), RepositoryError> {
        for (kind, id) in record.references() {
            if !self.exists(kind, id).await? {
                return Err(RepositoryError::missing_reference(kind, id));
            }
        }
        Ok(())
    }

    /// Deletes a record and, depth-first, every record owned by it.
    pub fn delete_cascade(
        &self,
        kind: RecordKind,
        id: Uuid,
    ) -> Pin<Box<dyn Future<Output = Result<(), RepositoryError>> + Send + '_>> {
        Box::pin(async move {
            for child in kind.children() {
                let child_ids = with_repository!(self, child, repo => repo
                    .list(Some(id))
                    .await
                    .map(|records| records.iter().map(Record::id).collect::<Vec<_>>()))?;

                for child_id in child_ids {
                    self.delete_cascade(child, child_id).await?;
                }
            }

            for referrer in kind.referrers() {
                self.clear_references(referrer, kind, id).await?;
            }

            with_repository!(self, kind, repo => repo.delete(id).await)?;
            tracing::debug!(%kind, %id, "Deleted record");
            Ok(())
        })
    }

    /// Unlinks every `referrer` record that points at the `target` record.
    async fn clear_references(
        &self,
        referrer: RecordKind,
        target: RecordKind,
        id: Uuid,
    ) -> Result<(), RepositoryError> {
        with_repository!(self, referrer, repo => {
            for mut record in repo.list(None).await? {
                if record.clear_reference(target, id) {
                    record.touch(Utc::now());
                    repo.update(&record).await?;
                    tracing::debug!(
                        kind = %referrer,
                        id = %record.id(),
                        %target,
                        "Cleared reference"
                    );
                }
            }
        });
        Ok(())
    }

    /// Loads demo data through the cached repositories.
    pub async fn seed(&self, data: &SeedData) -> Result<(), RepositoryError> {
        async fn create_all<T: Record>(
            repo: &Arc<dyn Repository<T>>,
            records: &[T],
        ) -> Result<(), RepositoryError> {
            for record in records {
                repo.create(record).await?;
            }
            Ok(())
        }

        // Parents before children.
        create_all(&self.vehicles, &data.vehicles).await?;
        create_all(&self.fill_ups, &data.fill_ups).await?;
        create_all(&self.trips, &data.trips).await?;
        create_all(&self.contractors, &data.contractors).await?;
        create_all(&self.maintenance_tasks, &data.tasks).await?;
        create_all(&self.service_logs, &data.service_logs).await?;
        create_all(&self.clients, &data.clients).await?;
        create_all(&self.projects, &data.projects).await?;
        create_all(&self.time_entries, &data.time_entries).await?;
        create_all(&self.invoices, &data.invoices).await?;

        tracing::info!(records = data.len(), "Seeded demo data");
        Ok(())
    }

    /// Get the oldest event ID in the history.
    ///
    /// Returns 0 if history is empty.
    pub fn oldest_event_id(&self) -> u64 {
        self.event_history
            .read()
            .ok()
            .and_then(|h| h.front().map(|e| e.id))
            .unwrap_or(0)
    }

    /// Number of events currently kept in history.
    pub fn event_history_len(&self) -> usize {
        self.event_history.read().map(|h| h.len()).unwrap_or(0)
    }

    /// Get events of the given kinds since a given event ID.
    pub fn get_events_since(&self, kinds: &[RecordKind], since_id: u64) -> Vec<StoredEvent> {
        self.event_history
            .read()
            .ok()
            .map(|history| {
                history
                    .iter()
                    .filter(|e| e.id > since_id && kinds.contains(&e.event.kind))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Store an event in the local event history and forward it to live
    /// SSE streams. Returns the assigned event ID.
    pub fn store_event(&self, event: ChangeEvent) -> u64 {
        let id = self.event_counter.fetch_add(1, Ordering::SeqCst);
        let stored = StoredEvent { id, event };

        tracing::trace!(event_id = id, kind = %stored.event.kind, "Storing event in history");

        if let Ok(mut history) = self.event_history.write() {
            history.push_back(stored.clone());

            // Trim old events if history is too large
            while history.len() > self.event_history_max_size {
                history.pop_front();
            }
        }

        // No receivers just means no SSE client is connected.
        let _ = self.live_tx.send(stored);
        id
    }

    /// Subscribe to events as they are added to history.
    pub fn subscribe_live(&self) -> broadcast::Receiver<StoredEvent> {
        self.live_tx.subscribe()
    }

    /// Ensures an event listener is running for the given kind.
    ///
    /// If a listener is already running, this is a no-op. Otherwise it
    /// subscribes to the pub/sub before returning, then spawns a background
    /// task that feeds the local event history.
    pub async fn ensure_event_listener(&self, kind: RecordKind) {
        // Check if listener already exists
        if let Ok(listeners) = self.active_listeners.read() {
            if listeners.contains(&kind) {
                return;
            }
        }

        // Register this listener
        match self.active_listeners.write() {
            Ok(mut listeners) => {
                // Double-check after acquiring write lock
                if !listeners.insert(kind) {
                    return;
                }
            }
            Err(_) => {
                tracing::error!(%kind, "Listener registry lock poisoned");
                return;
            }
        }

        let mut receiver = match self.pubsub.subscribe(kind).await {
            Ok(r) => r,
            Err(err) => {
                tracing::error!(%kind, error = %err, "Failed to subscribe to change events");
                self.remove_listener(kind);
                return;
            }
        };

        let state = self.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            tracing::debug!(%kind, "Event listener started");

            loop {
                tokio::select! {
                    result = receiver.recv() => {
                        match result {
                            Ok(event) => {
                                state.store_event(event);
                            }
                            Err(broadcast::error::RecvError::Lagged(n)) => {
                                tracing::warn!(%kind, lagged = n, "Event listener lagged");
                            }
                            Err(broadcast::error::RecvError::Closed) => {
                                tracing::info!(%kind, "Event channel closed");
                                break;
                            }
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::debug!(%kind, "Event listener shutting down");
                        break;
                    }
                }
            }

            state.remove_listener(kind);
        });
    }

    /// Starts listeners for every kind so history is complete from startup.
    pub async fn start_event_listeners(&self) {
        for kind in RecordKind::ALL {
            self.ensure_event_listener(kind).await;
        }
    }

    fn remove_listener(&self, kind: RecordKind) {
        if let Ok(mut listeners) = self.active_listeners.write() {
            listeners.remove(&kind);
        }
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all SSE connections and event listeners to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

/// A record type whose repository lives in [`AppState`].
pub trait Stored: Record {
    fn repository(state: &AppState) -> &Arc<dyn Repository<Self>>;
}

macro_rules! impl_stored {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl Stored for $ty {
                fn repository(state: &AppState) -> &Arc<dyn Repository<Self>> {
                    &state.$field
                }
            }
        )*
    };
}

impl_stored! {
    Vehicle => vehicles,
    FillUp => fill_ups,
    Trip => trips,
    MaintenanceTask => maintenance_tasks,
    ServiceLog => service_logs,
    Contractor => contractors,
    Client => clients,
    Project => projects,
    TimeEntry => time_entries,
    Invoice => invoices,
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::{MemoryCache, MemoryPubSub};
    use crate::storage::InMemoryRepository;

    /// Fresh `HashMap` storage per kind.
    pub(super) struct InMemoryBackend;

    impl StorageBackend for InMemoryBackend {
        fn repository<T: Record>(&self) -> Arc<dyn Repository<T>> {
            Arc::new(InMemoryRepository::<T>::new())
        }
    }

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries)?);
            let memory_pubsub = Arc::new(MemoryPubSub::new());

            Ok(Self::build(
                &InMemoryBackend,
                memory_cache,
                memory_pubsub,
                config,
            ))
        }
    }
}

#[cfg(all(feature = "sqlite", feature = "memory"))]
mod sqlite_memory {
    use super::*;
    use crate::cache::{MemoryCache, MemoryPubSub};
    use crate::storage::{open_connection, SqliteRepository};

    /// Repositories sharing one SQLite connection.
    pub(super) struct SqliteBackend(pub(super) tokio_rusqlite::Connection);

    impl StorageBackend for SqliteBackend {
        fn repository<T: Record>(&self) -> Arc<dyn Repository<T>> {
            Arc::new(SqliteRepository::<T>::new(self.0.clone()))
        }
    }

    impl AppState {
        /// Creates AppState with SQLite storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let conn = open_connection(&config.sqlite_path).await?;
            tracing::info!(path = %config.sqlite_path, "Opened SQLite database");

            let memory_cache = Arc::new(MemoryCache::new(config.cache_max_entries)?);
            let memory_pubsub = Arc::new(MemoryPubSub::new());

            Ok(Self::build(
                &SqliteBackend(conn),
                memory_cache,
                memory_pubsub,
                config,
            ))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================
