//! Capability payload and response envelopes
//!
//! JSON shapes exchanged with providers. The coordinator never looks
//! inside these; only the façade encodes and decodes them. Amounts travel
//! as decimal strings so no precision is lost in transit.

use serde::{Deserialize, Serialize};

// =============================================================================
// Domain values
// =============================================================================

/// Kind of currency a provider tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyType {
    Eth,
    Erc20,
}

/// A currency known to the remote system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    pub currency_type: CurrencyType,
    /// Lookup key: empty string for the base currency, contract address
    /// for tokens
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

/// An address the remote system tracks for balance/transfer history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedAddress {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Block the tracker started syncing this address from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synced_from: Option<u64>,
}

/// Balance of one currency at one address, as of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceFact {
    pub currency_key: String,
    /// Decimal string
    pub amount: String,
    pub block_number: u64,
}

/// One observed transfer of a currency between two addresses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub currency_key: String,
    /// Decimal string
    pub amount: String,
    pub tx_hash: String,
    pub block_number: u64,
}

/// Where tracking of a newly added address should begin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "block")]
pub enum StartTrackingMode {
    /// From a specific block number
    FromBlock(u64),
    /// From the latest block the tracker already knows
    LatestKnownBlock,
}

// =============================================================================
// Request/response envelopes
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCurrenciesRequest {
    /// Restrict the answer to these currency keys; `None` means all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_currency_keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCurrenciesResponse {
    pub currencies: Vec<Currency>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTrackedAddressesRequest {
    #[serde(default)]
    pub include_comment: bool,
    #[serde(default)]
    pub include_synced_from: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTrackedAddressesResponse {
    pub addresses: Vec<TrackedAddress>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackedAddressRequest {
    pub address: String,
    #[serde(flatten)]
    pub start: StartTrackingMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTrackedAddressResponse {
    /// Whether the tracker accepted the address (false: already tracked)
    pub added: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBalancesRequest {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_currency_keys: Option<Vec<String>>,
    /// Blocks that must have passed before a balance fact counts
    #[serde(default)]
    pub confirmations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetBalancesResponse {
    pub balances: Vec<BalanceFact>,
}

/// Filter for transfer queries. At least one of `sender`/`receiver` must be
/// set; the façade enforces this before submitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransfersRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_block: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_currency_keys: Option<Vec<String>>,
    #[serde(default)]
    pub confirmations: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTransfersResponse {
    pub transfers: Vec<Transfer>,
}

// =============================================================================
// Validation
// =============================================================================

/// Check the 0x-prefixed 40-hex-digit address form
pub fn is_valid_address(s: &str) -> bool {
    let Some(hex) = s.strip_prefix("0x") else {
        return false;
    };
    hex.len() == 40 && hex.chars().all(|c| c.is_ascii_hexdigit())
}
