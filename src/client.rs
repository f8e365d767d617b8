//! Caller-facing façade
//!
//! Turns one asynchronous command round trip into a call that waits up to
//! the configured timeout and returns either the domain value or the
//! capability's "unavailable" sentinel (`None`). Ordinary remote failure —
//! no provider, slow provider, cancelled wait — never surfaces as an
//! error. Safe to call concurrently; every call owns a private
//! command/reply pair.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::capability::Capability;
use crate::coordinator::Connector;
use crate::domain::{
    is_valid_address, AddTrackedAddressRequest, AddTrackedAddressResponse, BalanceFact, Currency,
    GetBalancesRequest, GetBalancesResponse, GetCurrenciesRequest, GetCurrenciesResponse,
    GetTrackedAddressesRequest, GetTrackedAddressesResponse, GetTransfersRequest,
    GetTransfersResponse, StartTrackingMode, TrackedAddress, Transfer,
};

/// Per-capability client over a running [`Connector`]
#[derive(Clone)]
pub struct GatehouseClient {
    connector: Connector,
}

impl GatehouseClient {
    pub fn new(connector: Connector) -> Self {
        Self { connector }
    }

    /// Block until the primary capability is visible, or the timeout
    /// elapses
    pub async fn wait_ready(&self, timeout: Duration) -> bool {
        self.connector.wait_ready(timeout).await
    }

    /// List the currencies the remote system tracks.
    ///
    /// `None` means the capability was unavailable within the timeout.
    pub async fn get_currencies(
        &self,
        filter_currency_keys: Option<Vec<String>>,
    ) -> Option<Vec<Currency>> {
        let request = GetCurrenciesRequest {
            filter_currency_keys,
        };
        let response: GetCurrenciesResponse = self
            .round_trip(Capability::GetCurrencies, &request)
            .await?;
        Some(response.currencies)
    }

    /// List the addresses the remote system tracks.
    ///
    /// `None` means no known addresses could be obtained in time.
    pub async fn get_tracked_addresses(&self) -> Option<Vec<TrackedAddress>> {
        let request = GetTrackedAddressesRequest {
            include_comment: true,
            include_synced_from: true,
        };
        let response: GetTrackedAddressesResponse = self
            .round_trip(Capability::GetTrackedAddresses, &request)
            .await?;
        Some(response.addresses)
    }

    /// Ask the remote system to start tracking an address.
    ///
    /// Returns whether the tracker accepted it, or `None` when the
    /// operation was unavailable. A malformed address is rejected locally
    /// without submitting anything.
    pub async fn add_tracked_address(
        &self,
        address: &str,
        start: StartTrackingMode,
        comment: Option<String>,
    ) -> Option<bool> {
        if !is_valid_address(address) {
            warn!(address = %address, "Rejecting malformed address");
            return None;
        }
        let request = AddTrackedAddressRequest {
            address: address.to_string(),
            start,
            comment,
        };
        let response: AddTrackedAddressResponse = self
            .round_trip(Capability::AddTrackedAddress, &request)
            .await?;
        Some(response.added)
    }

    /// Read the balances of one tracked address.
    pub async fn get_balances(
        &self,
        address: &str,
        filter_currency_keys: Option<Vec<String>>,
        confirmations: u64,
    ) -> Option<Vec<BalanceFact>> {
        if !is_valid_address(address) {
            warn!(address = %address, "Rejecting malformed address");
            return None;
        }
        let request = GetBalancesRequest {
            address: address.to_string(),
            filter_currency_keys,
            confirmations,
        };
        let response: GetBalancesResponse =
            self.round_trip(Capability::GetBalances, &request).await?;
        Some(response.balances)
    }

    /// Fetch transfers matching a filter.
    ///
    /// The filter must name a sender, a receiver, or both; any address it
    /// names must be well-formed.
    pub async fn get_transfers(&self, filter: GetTransfersRequest) -> Option<Vec<Transfer>> {
        if filter.sender.is_none() && filter.receiver.is_none() {
            warn!("Rejecting transfers query naming neither sender nor receiver");
            return None;
        }
        for address in [&filter.sender, &filter.receiver].into_iter().flatten() {
            if !is_valid_address(address) {
                warn!(address = %address, "Rejecting malformed address");
                return None;
            }
        }
        let response: GetTransfersResponse =
            self.round_trip(Capability::GetTransfers, &filter).await?;
        Some(response.transfers)
    }

    /// One command round trip: encode, submit, wait bounded, decode.
    ///
    /// Timeout and cancelled waits collapse to `None`. An undecodable
    /// response is a wiring defect, not an operational failure, and panics
    /// rather than being silently absorbed.
    async fn round_trip<Req, Resp>(&self, capability: Capability, request: &Req) -> Option<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let key = capability.key(&self.connector.config().realm);
        let timeout = self.connector.config().request_timeout;

        let payload = match serde_json::to_vec(request) {
            Ok(bytes) => bytes,
            Err(e) => panic!("request envelope for {key} could not be encoded: {e}"),
        };

        let reply = match self.connector.submit(key.clone(), payload.into()).await {
            Ok(rx) => rx,
            Err(e) => {
                warn!(key = %key, error = %e, "Could not submit command");
                return None;
            }
        };

        match tokio::time::timeout(timeout, reply).await {
            Ok(Ok(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(response) => Some(response),
                Err(e) => panic!("response envelope for {key} could not be decoded: {e}"),
            },
            Ok(Err(_)) => {
                warn!(key = %key, "Wait for reply was cancelled");
                None
            }
            Err(_) => {
                warn!(key = %key, "Request timed out");
                None
            }
        }
    }
}
