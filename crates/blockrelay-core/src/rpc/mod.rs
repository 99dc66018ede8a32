//! Ethereum JSON-RPC abstraction layer.
//!
//! Defines the [`BlockchainRpc`] trait and provides an HTTP JSON-RPC
//! implementation ([`HttpRpcClient`]).

mod http_adapter;

pub use http_adapter::{HttpRpcClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};

use async_trait::async_trait;

use crate::error::CoreError;
use crate::types::Block;

/// The read-only node queries blockrelay needs.
///
/// Each call either returns a fully populated value or exactly one
/// classified [`CoreError`]; implementations never retry.
#[async_trait]
pub trait BlockchainRpc: Send + Sync {
    /// Number of the most recent block (`eth_blockNumber`).
    async fn get_block_number(&self) -> Result<u64, CoreError>;

    /// Block `number` with full transaction objects (`eth_getBlockByNumber`).
    ///
    /// Returns [`CoreError::BlockNotFound`] when the node reports no such
    /// block through an empty result.
    async fn get_block_by_number(&self, number: u64) -> Result<Block, CoreError>;
}
