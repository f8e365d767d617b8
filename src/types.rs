//! Shared error and result types

use thiserror::Error;

/// Errors surfaced by the connector and its collaborators.
///
/// `Registry` and `Provider` are the variants implementors of the
/// discovery seams return; the coordinator absorbs both as routing
/// misses rather than propagating them.
#[derive(Debug, Error)]
pub enum GatehouseError {
    /// Service registry lookup or subscription failed
    #[error("registry error: {0}")]
    Registry(String),

    /// A provider rejected or failed a routed request
    #[error("provider error: {0}")]
    Provider(String),

    /// The connector's engine task is no longer running
    #[error("connector is shut down")]
    Shutdown,
}

pub type Result<T> = std::result::Result<T, GatehouseError>;
