//! Connector coordinator
//!
//! The routing core: a single engine task that owns all in-flight
//! discovery/routing state and processes one message at a time, in arrival
//! order. Commands, discovery continuations, provider replies, availability
//! notifications, and boot-waiter registrations all travel through the same
//! bounded queue, so no per-command locks are needed — each command's
//! payload and reply channel are private to its own pipeline.

mod command;
mod engine;

pub(crate) use command::{Command, Msg};

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::sync::{mpsc, oneshot};
use tracing::info;
use uuid::Uuid;

use crate::capability::CapabilityKey;
use crate::config::ConnectorConfig;
use crate::registry::ServiceRegistry;
use crate::types::{GatehouseError, Result};

use engine::Engine;

/// Handle to a running coordinator engine
///
/// Cheap to clone; all clones feed the same engine task. Dropping every
/// clone shuts the engine down once in-flight pipelines drain.
#[derive(Clone)]
pub struct Connector {
    tx: mpsc::Sender<Msg>,
    config: ConnectorConfig,
}

impl Connector {
    /// Start the coordinator engine and subscribe to availability
    /// notifications for the primary capability.
    pub async fn start(config: ConnectorConfig, registry: Arc<dyn ServiceRegistry>) -> Self {
        let (tx, rx) = mpsc::channel(config.queue_size);

        let primary_key = config.primary.key(&config.realm);
        let (avail_tx, mut avail_rx) = mpsc::channel(16);
        registry.subscribe(&primary_key, avail_tx).await;

        // Forward registry notifications into the engine's own queue. The
        // weak sender lets the engine shut down when every handle is gone.
        let weak = tx.downgrade();
        tokio::spawn(async move {
            while let Some(listing) = avail_rx.recv().await {
                let Some(tx) = weak.upgrade() else { break };
                let msg = Msg::Availability {
                    provider_count: listing.len(),
                };
                if tx.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let engine = Engine::new(registry, tx.downgrade(), config.request_timeout);
        tokio::spawn(engine.run(rx));

        info!(realm = %config.realm, primary = %primary_key, "Connector started");
        Self { tx, config }
    }

    /// Submit a command and return the single-use reply channel.
    ///
    /// At most one response is ever delivered through the receiver; a
    /// command whose pipeline stalls (no provider, remote timeout) delivers
    /// nothing, and the caller's own bounded wait surfaces the failure.
    pub async fn submit(
        &self,
        key: CapabilityKey,
        payload: Bytes,
    ) -> Result<oneshot::Receiver<Bytes>> {
        let (reply, reply_rx) = oneshot::channel();
        let command = Command {
            id: Uuid::new_v4(),
            key,
            payload,
            reply,
        };
        self.tx
            .send(Msg::Submit(command))
            .await
            .map_err(|_| GatehouseError::Shutdown)?;
        Ok(reply_rx)
    }

    /// Block until the primary capability has been observed at least once,
    /// or the timeout elapses. Returns whether the barrier was released.
    ///
    /// Registration is routed through the engine's queue and checks current
    /// availability synchronously, so a waiter arriving after the primary
    /// capability is already visible is released immediately.
    pub async fn wait_ready(&self, timeout: Duration) -> bool {
        let (tx, rx) = oneshot::channel();
        if self.tx.send(Msg::WaitReady(tx)).await.is_err() {
            return false;
        }
        matches!(tokio::time::timeout(timeout, rx).await, Ok(Ok(())))
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }
}
