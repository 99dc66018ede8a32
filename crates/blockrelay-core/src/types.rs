//! Domain types returned by the RPC client.
//!
//! Hex quantities from the node are already decoded here: `number` and
//! `timestamp` are plain integers. Transaction `value` stays a hex string
//! because wei amounts routinely exceed 64 bits.

use serde::Serialize;

// ==============================================================================
// Block
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub number: u64,
    pub hash: String,
    pub parent_hash: String,
    /// Seconds since the Unix epoch.
    pub timestamp: u64,
    pub transactions: Vec<Transaction>,
}

// ==============================================================================
// Transaction
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    /// `None` for contract-creation transactions.
    pub to: Option<String>,
    /// Transferred amount in wei, as a `0x`-prefixed hex string.
    pub value: String,
}
