//! Capability keys
//!
//! A capability names a class of request a provider can answer, scoped by
//! the realm string so that independent deployments (e.g. different
//! networks) never cross-talk. Keys carry no behavior; they are lookup
//! tokens, derived deterministically from the realm.

use std::fmt;

/// Namespace string isolating one deployment's capability keys
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Realm(String);

impl Realm {
    pub fn new(realm: impl Into<String>) -> Self {
        Self(realm.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Realm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Realm {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Classes of request the connector can route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    GetCurrencies,
    GetTrackedAddresses,
    AddTrackedAddress,
    GetBalances,
    GetTransfers,
}

impl Capability {
    /// Wire name of the request class
    pub fn request_type(&self) -> &'static str {
        match self {
            Capability::GetCurrencies => "getCurrencies",
            Capability::GetTrackedAddresses => "getTrackedAddresses",
            Capability::AddTrackedAddress => "addTrackedAddress",
            Capability::GetBalances => "getBalances",
            Capability::GetTransfers => "getTransfers",
        }
    }

    /// Derive the capability key for a realm.
    ///
    /// Pure: the same realm always yields the same key across restarts.
    pub fn key(&self, realm: &Realm) -> CapabilityKey {
        CapabilityKey {
            capability: *self,
            realm: realm.clone(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.request_type())
    }
}

/// Key under which providers advertise: request class + realm
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapabilityKey {
    capability: Capability,
    realm: Realm,
}

impl CapabilityKey {
    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn realm(&self) -> &Realm {
        &self.realm
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.capability.request_type(), self.realm)
    }
}
