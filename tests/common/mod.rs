//! Shared test doubles: providers with canned, echoed, or withheld answers
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;

use tokio::sync::mpsc;

use gatehouse::domain::{GetTransfersRequest, GetTransfersResponse, Transfer};
use gatehouse::{CapabilityKey, GatehouseError, Listing, Provider, Result, ServiceRegistry};

/// Install a test log subscriber (no-op if one is already set)
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// Provider that answers every request with the same JSON body
pub struct CannedProvider {
    id: String,
    response: Bytes,
}

impl CannedProvider {
    pub fn new(id: &str, response: &impl Serialize) -> Arc<dyn Provider> {
        Arc::new(Self {
            id: id.to_string(),
            response: serde_json::to_vec(response).unwrap().into(),
        })
    }
}

#[async_trait]
impl Provider for CannedProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn request(&self, _payload: Bytes) -> Result<Bytes> {
        Ok(self.response.clone())
    }
}

/// Provider that never answers
pub struct HangingProvider {
    id: String,
}

impl HangingProvider {
    pub fn new(id: &str) -> Arc<dyn Provider> {
        Arc::new(Self { id: id.to_string() })
    }
}

#[async_trait]
impl Provider for HangingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn request(&self, _payload: Bytes) -> Result<Bytes> {
        std::future::pending().await
    }
}

/// Provider that rejects every request
pub struct FailingProvider {
    id: String,
}

impl FailingProvider {
    pub fn new(id: &str) -> Arc<dyn Provider> {
        Arc::new(Self { id: id.to_string() })
    }
}

#[async_trait]
impl Provider for FailingProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn request(&self, _payload: Bytes) -> Result<Bytes> {
        Err(GatehouseError::Provider(format!(
            "{} refused the request",
            self.id
        )))
    }
}

/// Registry whose lookups always fail; subscriptions see an empty listing
pub struct FailingRegistry;

#[async_trait]
impl ServiceRegistry for FailingRegistry {
    async fn find(&self, key: &CapabilityKey) -> Result<Listing> {
        Err(GatehouseError::Registry(format!("lookup for {key} failed")))
    }

    async fn subscribe(&self, _key: &CapabilityKey, sink: mpsc::Sender<Listing>) {
        let _ = sink.send(Vec::new()).await;
    }
}

/// Provider that answers a transfers query with one transfer echoing the
/// queried sender, so each command's reply is traceable to its own payload
pub struct TransferEchoProvider {
    id: String,
}

impl TransferEchoProvider {
    pub fn new(id: &str) -> Arc<dyn Provider> {
        Arc::new(Self { id: id.to_string() })
    }
}

#[async_trait]
impl Provider for TransferEchoProvider {
    fn id(&self) -> &str {
        &self.id
    }

    async fn request(&self, payload: Bytes) -> Result<Bytes> {
        let request: GetTransfersRequest = serde_json::from_slice(&payload).unwrap();
        let sender = request.sender.unwrap_or_default();
        let response = GetTransfersResponse {
            transfers: vec![Transfer {
                from: sender,
                to: "0x0000000000000000000000000000000000000000".to_string(),
                currency_key: String::new(),
                amount: "1".to_string(),
                tx_hash: format!("0x{}", self.id),
                block_number: 1,
            }],
        };
        Ok(serde_json::to_vec(&response).unwrap().into())
    }
}
