//! Coordinator message kinds
//!
//! The engine is a state machine over message kinds, not named states:
//! what is "in flight" is exactly the set of continuations still waiting to
//! re-enter the queue. Each continuation carries the original payload and
//! reply channel forward, so no separate correlation table exists.

use bytes::Bytes;
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::capability::CapabilityKey;
use crate::registry::Listing;

/// An outbound intent: capability key, opaque payload, reply channel
pub(crate) struct Command {
    /// Correlation id for log lines across the pipeline steps
    pub id: Uuid,
    pub key: CapabilityKey,
    pub payload: Bytes,
    /// Single-use; at most one response is ever sent through it
    pub reply: oneshot::Sender<Bytes>,
}

/// Everything the engine processes, in arrival order
pub(crate) enum Msg {
    /// A fresh command from a caller
    Submit(Command),
    /// Discovery finished (errors and timeouts carry an empty listing)
    Discovered {
        id: Uuid,
        key: CapabilityKey,
        listing: Listing,
        payload: Bytes,
        reply: oneshot::Sender<Bytes>,
    },
    /// A routed provider answered
    Completed {
        id: Uuid,
        key: CapabilityKey,
        response: Bytes,
        reply: oneshot::Sender<Bytes>,
    },
    /// Availability notification for the primary capability
    Availability { provider_count: usize },
    /// A caller wants to block until the primary capability is visible
    WaitReady(oneshot::Sender<()>),
}
