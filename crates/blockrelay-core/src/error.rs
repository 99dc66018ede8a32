use crate::hex_quantity::HexError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("invalid {method} result: {message}")]
    Decode { method: String, message: String },

    #[error("invalid {field}: {source}")]
    Format {
        field: &'static str,
        #[source]
        source: HexError,
    },

    #[error("block {0} not found")]
    BlockNotFound(u64),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    #[error("{method} transport failure: {source}")]
    Transport {
        method: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} returned HTTP {status}: {body}")]
    HttpStatus {
        method: String,
        status: u16,
        body: String,
    },

    #[error("malformed {method} response: {message}")]
    InvalidResponse { method: String, message: String },

    #[error("JSON-RPC error {code} from {method}: {message}")]
    ServerError {
        method: String,
        code: i64,
        message: String,
    },
}

/// Coarse classification of a [`CoreError`], for callers that need to
/// branch on the failure class (e.g. HTTP status mapping).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failure, timeout, or non-2xx HTTP status.
    Transport,
    /// The body was not a well-formed JSON-RPC response envelope.
    Protocol,
    /// The node answered with a JSON-RPC error object.
    Remote,
    /// The result did not have the expected shape.
    Decode,
    /// A hex quantity in the result was malformed.
    Format,
    /// The node has no block with the requested number.
    NotFound,
    /// The client was built with an invalid endpoint or timeout.
    Config,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rpc(RpcError::Transport { .. } | RpcError::HttpStatus { .. }) => {
                ErrorKind::Transport
            }
            Self::Rpc(RpcError::InvalidResponse { .. }) => ErrorKind::Protocol,
            Self::Rpc(RpcError::ServerError { .. }) => ErrorKind::Remote,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Format { .. } => ErrorKind::Format,
            Self::BlockNotFound(_) => ErrorKind::NotFound,
            Self::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}
