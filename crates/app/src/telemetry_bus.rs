//! In-process telemetry bus: the latest sensor reading plus one delivery
//! queue per streaming client.
//!
//! A single ingestion adapter calls [`TelemetryBus::ingest`]; any number of
//! readers take snapshots or drain their own queue. Every reading ingested
//! while a client is registered lands in that client's queue exactly once,
//! in ingest order. Queues are unbounded, so a slow client only grows its
//! own backlog and never holds up ingestion or other clients.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::{Mutex as AsyncMutex, mpsc};

use domus_domain::error::UnavailableError;
use domus_domain::id::ClientId;
use domus_domain::sensor::SensorReading;

use crate::ports::TelemetrySink;

/// Outcome of waiting on a client queue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delivery {
    Reading(SensorReading),
    /// Nothing arrived within the timeout.
    Timeout,
    /// The client was cancelled or never registered.
    Closed,
}

type SharedReceiver = Arc<AsyncMutex<mpsc::UnboundedReceiver<SensorReading>>>;

struct ClientQueue {
    sender: mpsc::UnboundedSender<SensorReading>,
    receiver: SharedReceiver,
}

#[derive(Default)]
struct ClientRegistry {
    queues: Mutex<HashMap<ClientId, ClientQueue>>,
}

impl ClientRegistry {
    fn queues(&self) -> MutexGuard<'_, HashMap<ClientId, ClientQueue>> {
        self.queues.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self) -> ClientId {
        let id = ClientId::new();
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue = ClientQueue {
            sender,
            receiver: Arc::new(AsyncMutex::new(receiver)),
        };
        self.queues().insert(id, queue);
        id
    }

    fn remove(&self, id: ClientId) -> bool {
        self.queues().remove(&id).is_some()
    }

    fn clear(&self) -> usize {
        let mut queues = self.queues();
        let count = queues.len();
        queues.clear();
        count
    }

    fn receiver(&self, id: ClientId) -> Option<SharedReceiver> {
        self.queues().get(&id).map(|queue| Arc::clone(&queue.receiver))
    }

    async fn poll(&self, id: ClientId, timeout: Duration) -> Delivery {
        let Some(receiver) = self.receiver(id) else {
            return Delivery::Closed;
        };
        let waiting = async move {
            let mut receiver = receiver.lock().await;
            receiver.recv().await
        };
        match tokio::time::timeout(timeout, waiting).await {
            Ok(Some(reading)) => Delivery::Reading(reading),
            Ok(None) => Delivery::Closed,
            Err(_) => Delivery::Timeout,
        }
    }
}

/// Shared telemetry state, safe to use from many tasks at once.
pub struct TelemetryBus {
    latest: Mutex<Option<SensorReading>>,
    clients: Arc<ClientRegistry>,
}

impl Default for TelemetryBus {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryBus {
    #[must_use]
    pub fn new() -> Self {
        Self {
            latest: Mutex::new(None),
            clients: Arc::new(ClientRegistry::default()),
        }
    }

    fn latest_slot(&self) -> MutexGuard<'_, Option<SensorReading>> {
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `reading` as the latest one and append it to every registered
    /// client queue. Never blocks on readers.
    pub fn ingest(&self, reading: SensorReading) {
        // The registry lock is held across the update so a client registering
        // concurrently either sees this reading in its queue or not at all.
        let queues = self.clients.queues();
        *self.latest_slot() = Some(reading);
        for (id, queue) in queues.iter() {
            if queue.sender.send(reading).is_err() {
                tracing::debug!(client = %id, "client queue receiver gone");
            }
        }
        tracing::debug!(clients = queues.len(), "sensor reading ingested");
    }

    /// The most recently ingested reading, if any.
    #[must_use]
    pub fn latest(&self) -> Option<SensorReading> {
        *self.latest_slot()
    }

    /// The latest reading, or an error when nothing has been ingested yet.
    ///
    /// # Errors
    ///
    /// Returns [`UnavailableError::NoTelemetry`] before the first ingest.
    pub fn require_latest(&self) -> Result<SensorReading, UnavailableError> {
        self.latest().ok_or(UnavailableError::NoTelemetry)
    }

    /// The latest reading, or [`SensorReading::zeroed`] before the first ingest.
    #[must_use]
    pub fn snapshot_or_zeroed(&self) -> SensorReading {
        self.latest().unwrap_or_else(SensorReading::zeroed)
    }

    /// The latest reading, or [`SensorReading::conversation_defaults`] before
    /// the first ingest.
    #[must_use]
    pub fn snapshot_or_defaults(&self) -> SensorReading {
        self.latest()
            .unwrap_or_else(SensorReading::conversation_defaults)
    }

    /// Register a new client with an empty queue. Readings ingested before
    /// this call are not delivered to it.
    #[must_use]
    pub fn register(&self) -> ClientId {
        let id = self.clients.register();
        tracing::debug!(client = %id, "telemetry client registered");
        id
    }

    /// Register a client whose queue is released when the returned handle
    /// is dropped.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            id: self.register(),
            registry: Arc::clone(&self.clients),
        }
    }

    /// Deregister `client`. A pending [`next`](Self::next) on it returns
    /// `None` promptly. Returns `false` if the client was unknown.
    pub fn cancel(&self, client: ClientId) -> bool {
        let removed = self.clients.remove(client);
        if removed {
            tracing::debug!(%client, "telemetry client cancelled");
        }
        removed
    }

    /// Deregister every client, ending all pending waits and streams.
    /// Returns how many clients were registered.
    pub fn close_all(&self) -> usize {
        let closed = self.clients.clear();
        tracing::debug!(closed, "all telemetry clients closed");
        closed
    }

    /// Wait up to `timeout` for the next reading queued for `client`.
    ///
    /// Returns `None` on timeout, after cancellation, or for an unknown
    /// client.
    pub async fn next(&self, client: ClientId, timeout: Duration) -> Option<SensorReading> {
        match self.poll(client, timeout).await {
            Delivery::Reading(reading) => Some(reading),
            Delivery::Timeout | Delivery::Closed => None,
        }
    }

    /// Like [`next`](Self::next) but tells a timeout apart from a closed queue.
    pub async fn poll(&self, client: ClientId, timeout: Duration) -> Delivery {
        self.clients.poll(client, timeout).await
    }

    #[must_use]
    pub fn client_count(&self) -> usize {
        self.clients.queues().len()
    }
}

impl TelemetrySink for TelemetryBus {
    fn ingest(&self, reading: SensorReading) {
        Self::ingest(self, reading);
    }
}

/// A registered client that deregisters itself on drop.
pub struct Subscription {
    id: ClientId,
    registry: Arc<ClientRegistry>,
}

impl Subscription {
    #[must_use]
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Wait up to `timeout` for the next reading queued for this client.
    pub async fn poll(&self, timeout: Duration) -> Delivery {
        self.registry.poll(self.id, timeout).await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.remove(self.id) {
            tracing::debug!(client = %self.id, "telemetry subscription released");
        }
    }
}
