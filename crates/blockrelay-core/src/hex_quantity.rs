//! Codec for Ethereum JSON-RPC hex quantities.
//!
//! Nodes encode numeric values as `"0x"`-prefixed hexadecimal strings.
//! [`decode`] accepts any such string whose value fits in a `u64`
//! (digits are case-insensitive, leading zeros are tolerated);
//! [`encode`] always produces the canonical minimal lowercase form, with
//! `"0x0"` for zero.

const PREFIX: &str = "0x";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexError {
    #[error("expected 0x-prefixed hex quantity, got `{0}`")]
    MissingPrefix(String),

    #[error("hex quantity `{0}` has no digits")]
    Empty(String),

    #[error("invalid hex digit in `{0}`")]
    InvalidDigit(String),

    #[error("hex quantity `{0}` does not fit in 64 bits")]
    Overflow(String),
}

/// Decode a `"0x..."` quantity into a `u64`.
pub fn decode(s: &str) -> Result<u64, HexError> {
    let digits = s
        .strip_prefix(PREFIX)
        .ok_or_else(|| HexError::MissingPrefix(s.to_owned()))?;
    if digits.is_empty() {
        return Err(HexError::Empty(s.to_owned()));
    }
    // `from_str_radix` tolerates a leading `+`, so validate digits first.
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(HexError::InvalidDigit(s.to_owned()));
    }
    u64::from_str_radix(digits, 16).map_err(|_| HexError::Overflow(s.to_owned()))
}

/// Encode a `u64` as a canonical `"0x..."` quantity.
pub fn encode(n: u64) -> String {
    format!("{PREFIX}{n:x}")
}
