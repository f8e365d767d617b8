//! The coordinator's sequential message loop
//!
//! One task drains one queue. Remote asks (discovery queries, provider
//! requests) run in spawned tasks bounded by the round-trip timeout and
//! re-enter the queue as continuations, so the loop itself never blocks on
//! the network. Remote failures are absorbed: the pipeline for that command
//! simply stops, and the caller's own bounded wait reports the miss.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use rand::seq::SliceRandom;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{Command, Msg};
use crate::capability::CapabilityKey;
use crate::registry::{Listing, ServiceRegistry};

pub(crate) struct Engine {
    registry: Arc<dyn ServiceRegistry>,
    /// Re-entry point for continuations; weak so the engine can stop once
    /// every external handle is dropped
    tx: mpsc::WeakSender<Msg>,
    request_timeout: Duration,
    /// Callers blocked until the primary capability is first observed
    boot_waiters: Vec<oneshot::Sender<()>>,
    /// Whether the last availability notification was non-empty
    primary_available: bool,
}

impl Engine {
    pub(crate) fn new(
        registry: Arc<dyn ServiceRegistry>,
        tx: mpsc::WeakSender<Msg>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            tx,
            request_timeout,
            boot_waiters: Vec::new(),
            primary_available: false,
        }
    }

    pub(crate) async fn run(mut self, mut rx: mpsc::Receiver<Msg>) {
        while let Some(msg) = rx.recv().await {
            self.handle(msg);
        }
        debug!("Coordinator engine stopped (queue closed)");
    }

    fn handle(&mut self, msg: Msg) {
        match msg {
            Msg::Submit(command) => self.on_submit(command),
            Msg::Discovered {
                id,
                key,
                listing,
                payload,
                reply,
            } => self.on_discovered(id, key, listing, payload, reply),
            Msg::Completed {
                id,
                key,
                response,
                reply,
            } => self.on_completed(id, key, response, reply),
            Msg::Availability { provider_count } => self.on_availability(provider_count),
            Msg::WaitReady(waiter) => self.on_wait_ready(waiter),
        }
    }

    /// Step 1: issue the discovery query.
    ///
    /// The continuation fires regardless of outcome; a failed or timed-out
    /// query carries an empty listing forward.
    fn on_submit(&self, command: Command) {
        let Command {
            id,
            key,
            payload,
            reply,
        } = command;
        debug!(id = %id, key = %key, "Discovering providers");

        let Some(tx) = self.tx.upgrade() else { return };
        let registry = Arc::clone(&self.registry);
        let timeout = self.request_timeout;

        tokio::spawn(async move {
            let listing = match tokio::time::timeout(timeout, registry.find(&key)).await {
                Ok(Ok(listing)) => listing,
                Ok(Err(e)) => {
                    warn!(id = %id, key = %key, error = %e, "Discovery query failed");
                    Vec::new()
                }
                Err(_) => {
                    warn!(id = %id, key = %key, "Discovery query timed out");
                    Vec::new()
                }
            };
            let _ = tx
                .send(Msg::Discovered {
                    id,
                    key,
                    listing,
                    payload,
                    reply,
                })
                .await;
        });
    }

    /// Step 2: pick one provider and route the request to it.
    fn on_discovered(
        &self,
        id: Uuid,
        key: CapabilityKey,
        listing: Listing,
        payload: Bytes,
        reply: oneshot::Sender<Bytes>,
    ) {
        let Some(provider) = listing.choose(&mut rand::thread_rng()).cloned() else {
            debug!(id = %id, key = %key, "No provider available");
            // An absent provider must look the same to the caller as a
            // silent one, so the reply stays open until the round-trip
            // window has passed.
            park_reply(reply, self.request_timeout);
            return;
        };

        debug!(id = %id, key = %key, provider = %provider.id(), "Routing request");

        let Some(tx) = self.tx.upgrade() else { return };
        let timeout = self.request_timeout;

        tokio::spawn(async move {
            match tokio::time::timeout(timeout, provider.request(payload)).await {
                Ok(Ok(response)) => {
                    let _ = tx
                        .send(Msg::Completed {
                            id,
                            key,
                            response,
                            reply,
                        })
                        .await;
                }
                Ok(Err(e)) => {
                    warn!(id = %id, key = %key, provider = %provider.id(), error = %e, "Provider request failed");
                }
                Err(_) => {
                    warn!(id = %id, key = %key, provider = %provider.id(), "Provider request timed out");
                }
            }
        });
    }

    /// Step 3: hand the response back to the caller.
    fn on_completed(
        &self,
        id: Uuid,
        key: CapabilityKey,
        response: Bytes,
        reply: oneshot::Sender<Bytes>,
    ) {
        if reply.send(response).is_err() {
            debug!(id = %id, key = %key, "Caller gave up before the reply arrived");
        }
    }

    /// Availability notification for the primary capability.
    ///
    /// Non-empty: release every queued boot waiter exactly once. Empty: the
    /// waiters keep accumulating, but the flag flips so newly registered
    /// waiters also wait for recovery.
    fn on_availability(&mut self, provider_count: usize) {
        if provider_count == 0 {
            self.primary_available = false;
            debug!("Primary capability has no providers");
            return;
        }

        self.primary_available = true;
        if !self.boot_waiters.is_empty() {
            info!(
                providers = provider_count,
                waiters = self.boot_waiters.len(),
                "Primary capability visible; releasing boot waiters"
            );
            for waiter in self.boot_waiters.drain(..) {
                let _ = waiter.send(());
            }
        }
    }

    /// Register a boot waiter, releasing it immediately when the primary
    /// capability is already visible.
    fn on_wait_ready(&mut self, waiter: oneshot::Sender<()>) {
        if self.primary_available {
            let _ = waiter.send(());
        } else {
            self.boot_waiters.push(waiter);
        }
    }
}

/// Hold a reply channel open for the given window, then drop it
fn park_reply(reply: oneshot::Sender<Bytes>, hold: Duration) {
    tokio::spawn(async move {
        tokio::time::sleep(hold).await;
        drop(reply);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{Capability, Realm};
    use crate::config::ConnectorConfig;
    use crate::coordinator::Connector;
    use crate::registry::InMemoryRegistry;

    #[tokio::test]
    async fn test_submit_with_empty_registry_delivers_nothing_early() {
        let registry = Arc::new(InMemoryRegistry::new());
        let config = ConnectorConfig::new("main").with_timeout(Duration::from_millis(200));
        let connector = Connector::start(config, registry).await;

        let key = Capability::GetCurrencies.key(&Realm::new("main"));
        let rx = connector
            .submit(key, Bytes::from_static(b"{}"))
            .await
            .unwrap();

        // The reply channel must stay open for the round-trip window even
        // though no provider exists.
        let early = tokio::time::timeout(Duration::from_millis(100), rx).await;
        assert!(early.is_err(), "reply resolved before the window elapsed");
    }

    #[tokio::test]
    async fn test_wait_ready_times_out_without_providers() {
        let registry = Arc::new(InMemoryRegistry::new());
        let config = ConnectorConfig::new("main");
        let connector = Connector::start(config, registry).await;

        assert!(!connector.wait_ready(Duration::from_millis(100)).await);
    }
}
