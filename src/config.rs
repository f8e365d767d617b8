//! Connector configuration

use std::time::Duration;

use crate::capability::{Capability, Realm};

/// Default round-trip timeout for discovery and routed requests
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Default depth of the coordinator's message queue
pub const DEFAULT_QUEUE_SIZE: usize = 1024;

/// Configuration for a [`Connector`](crate::Connector)
///
/// The realm is the only required value; everything else has working
/// defaults.
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// Realm embedded in every capability key this connector manages
    pub realm: Realm,
    /// Bound applied to discovery queries, routed requests, and façade waits
    pub request_timeout: Duration,
    /// Maximum queued coordinator messages
    pub queue_size: usize,
    /// Capability whose visibility signals "the remote system is reachable"
    pub primary: Capability,
}

impl ConnectorConfig {
    pub fn new(realm: impl Into<Realm>) -> Self {
        Self {
            realm: realm.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            queue_size: DEFAULT_QUEUE_SIZE,
            primary: Capability::GetCurrencies,
        }
    }

    /// Set the round-trip timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the coordinator queue depth
    pub fn with_queue_size(mut self, size: usize) -> Self {
        self.queue_size = size;
        self
    }

    /// Set the primary capability gating the boot barrier
    pub fn with_primary(mut self, primary: Capability) -> Self {
        self.primary = primary;
        self
    }
}

impl From<&str> for ConnectorConfig {
    fn from(realm: &str) -> Self {
        Self::new(realm)
    }
}
