//! Native JSON-RPC client for Ethereum-compatible endpoints.
//!
//! Implements [`BlockchainRpc`](super::BlockchainRpc) over HTTP POST using
//! `reqwest`, with a bounded per-request timeout and a pooled connection.

mod client;
mod connection;
mod parsing;
mod protocol;

pub use client::{HttpRpcClient, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT};
