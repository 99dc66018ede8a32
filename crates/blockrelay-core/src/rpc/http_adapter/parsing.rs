use serde::Deserialize;

use crate::error::CoreError;
use crate::hex_quantity;
use crate::types::{Block, Transaction};

// Wire shape of an `eth_getBlockByNumber` result with full transactions.
// Quantities stay strings here and go through `hex_quantity` afterwards.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockResponse {
    number: String,
    hash: String,
    parent_hash: String,
    timestamp: String,
    transactions: Vec<TransactionResponse>,
}

#[derive(Deserialize)]
struct TransactionResponse {
    hash: String,
    from: String,
    #[serde(default)]
    to: Option<String>,
    value: String,
}

pub(super) fn parse_block_number_result(
    method: &str,
    raw: serde_json::Value,
) -> Result<u64, CoreError> {
    match raw {
        serde_json::Value::String(quantity) => decode_quantity("block number", &quantity),
        other => Err(CoreError::Decode {
            method: method.to_owned(),
            message: format!("expected hex quantity string, got: {other}"),
        }),
    }
}

/// Nodes signal an unknown block with a `null` result, and some return an
/// object with an empty hash instead.
pub(super) fn is_missing_block(raw: &serde_json::Value) -> bool {
    match raw {
        serde_json::Value::Null => true,
        serde_json::Value::Object(fields) => match fields.get("hash") {
            None | Some(serde_json::Value::Null) => true,
            Some(serde_json::Value::String(hash)) => hash.is_empty(),
            Some(_) => false,
        },
        _ => false,
    }
}

pub(super) fn parse_block_result(method: &str, raw: serde_json::Value) -> Result<Block, CoreError> {
    let response: BlockResponse = serde_json::from_value(raw).map_err(|e| CoreError::Decode {
        method: method.to_owned(),
        message: e.to_string(),
    })?;

    Ok(Block {
        number: decode_quantity("number", &response.number)?,
        hash: response.hash,
        parent_hash: response.parent_hash,
        timestamp: decode_quantity("timestamp", &response.timestamp)?,
        transactions: response
            .transactions
            .into_iter()
            .map(|tx| Transaction {
                hash: tx.hash,
                from: tx.from,
                to: tx.to,
                value: tx.value,
            })
            .collect(),
    })
}

fn decode_quantity(field: &'static str, value: &str) -> Result<u64, CoreError> {
    hex_quantity::decode(value).map_err(|source| CoreError::Format { field, source })
}
