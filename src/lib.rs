//! Gatehouse - client-side connector for realm-scoped service providers
//!
//! Gatehouse lets application code submit typed requests (read balances,
//! list tracked addresses, fetch transfers, register new addresses) to a
//! set of remote providers reachable inside a cluster, without knowing
//! which physical instance will answer.
//!
//! ## Components
//!
//! - **Capability**: realm-scoped keys naming a class of request
//! - **Registry**: the discovery seam — who currently provides a capability?
//! - **Coordinator**: the routing core; discovers a live provider, issues
//!   the request, and correlates the reply back to the caller
//! - **Client**: per-capability blocking façade with timeout sentinels
//! - **Domain**: JSON envelopes for the capability payloads

pub mod capability;
pub mod client;
pub mod config;
pub mod coordinator;
pub mod domain;
pub mod registry;
pub mod types;

pub use capability::{Capability, CapabilityKey, Realm};
pub use client::GatehouseClient;
pub use config::ConnectorConfig;
pub use coordinator::Connector;
pub use registry::{InMemoryRegistry, Listing, Provider, ServiceRegistry};
pub use types::{GatehouseError, Result};
