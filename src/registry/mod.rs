//! Service registry seam
//!
//! The registry answers "who currently provides capability K?" and pushes
//! continuous change notifications for subscribed keys. How providers
//! publish themselves is the registry's business, not the connector's;
//! everything here is specified at the interface.

mod memory;

pub use memory::InMemoryRegistry;

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;

use crate::capability::CapabilityKey;
use crate::types::Result;

/// Set of providers currently advertising a capability key, possibly empty
pub type Listing = Vec<Arc<dyn Provider>>;

/// A remote entity able to answer requests for a capability
///
/// Payloads and responses are opaque bytes at this seam; the connector only
/// forwards them. The caller bounds the wait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier for logging
    fn id(&self) -> &str;

    /// Issue one request and wait for the provider's answer
    async fn request(&self, payload: Bytes) -> Result<Bytes>;
}

/// Discovery interface the coordinator depends on
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// Resolve the current listing for a capability key
    async fn find(&self, key: &CapabilityKey) -> Result<Listing>;

    /// Subscribe to listing changes for one capability key.
    ///
    /// The current listing is delivered immediately, then again on every
    /// change. Notifications are dropped if the sink cannot keep up.
    async fn subscribe(&self, key: &CapabilityKey, sink: mpsc::Sender<Listing>);
}
