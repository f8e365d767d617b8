//! In-memory service registry
//!
//! DashMap-backed registry for single-process wiring and tests. Providers
//! register and deregister under capability keys; every mutation pushes the
//! fresh listing to the key's subscribers.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::{Listing, Provider, ServiceRegistry};
use crate::capability::CapabilityKey;
use crate::types::Result;

/// In-process registry with concurrent access
#[derive(Default)]
pub struct InMemoryRegistry {
    /// Current providers per capability key
    entries: DashMap<CapabilityKey, Listing>,
    /// Change-notification sinks per capability key
    subscribers: DashMap<CapabilityKey, Vec<mpsc::Sender<Listing>>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under a capability key and notify subscribers
    pub async fn register(&self, key: CapabilityKey, provider: Arc<dyn Provider>) {
        info!(key = %key, provider = %provider.id(), "Provider registered");
        let listing = {
            let mut entry = self.entries.entry(key.clone()).or_default();
            entry.push(provider);
            entry.value().clone()
        };
        self.notify(&key, listing).await;
    }

    /// Remove a provider by id and notify subscribers
    pub async fn deregister(&self, key: &CapabilityKey, provider_id: &str) {
        let listing = {
            let mut entry = match self.entries.get_mut(key) {
                Some(e) => e,
                None => return,
            };
            let before = entry.len();
            entry.retain(|p| p.id() != provider_id);
            if entry.len() == before {
                return;
            }
            entry.value().clone()
        };
        info!(key = %key, provider = %provider_id, "Provider deregistered");
        self.notify(key, listing).await;
    }

    /// Number of providers currently advertising a key
    pub fn provider_count(&self, key: &CapabilityKey) -> usize {
        self.entries.get(key).map(|e| e.len()).unwrap_or(0)
    }

    async fn notify(&self, key: &CapabilityKey, listing: Listing) {
        let sinks = match self.subscribers.get(key) {
            Some(s) => s.value().clone(),
            None => return,
        };
        for sink in sinks {
            // A lagging subscriber misses this notification; the next
            // mutation carries the full listing again.
            if sink.try_send(listing.clone()).is_err() {
                debug!(key = %key, "Dropped registry notification (sink full or closed)");
            }
        }
    }
}

#[async_trait]
impl ServiceRegistry for InMemoryRegistry {
    async fn find(&self, key: &CapabilityKey) -> Result<Listing> {
        Ok(self
            .entries
            .get(key)
            .map(|e| e.value().clone())
            .unwrap_or_default())
    }

    async fn subscribe(&self, key: &CapabilityKey, sink: mpsc::Sender<Listing>) {
        // The snapshot is read and sent while the subscribers entry is
        // held: a register racing this call either finished before (its
        // provider is in the snapshot) or must wait for the guard (its
        // notification arrives after the snapshot it supersedes). Either
        // way the subscriber never misses a mutation and never sees a
        // stale listing last.
        let mut sinks = self.subscribers.entry(key.clone()).or_default();
        let current = self
            .entries
            .get(key)
            .map(|e| e.value().clone())
            .unwrap_or_default();
        let _ = sink.try_send(current);
        sinks.push(sink);
    }
}
