pub mod error;
pub mod hex_quantity;
pub mod rpc;
pub mod types;

pub use error::{CoreError, ErrorKind, RpcError};
pub use types::{Block, Transaction};
