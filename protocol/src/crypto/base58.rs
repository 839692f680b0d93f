//! Prefixed Base58 encoding for BitShares public keys.
//!
//! A key string is the network prefix followed by the Base58 (Bitcoin
//! alphabet) encoding of `key || ripemd160(key)[..4]`:
//!
//! ```text
//! BTS6MRyAjQq8ud7hVNYcfnVPJqcVpscN5So8BhtHuGYqET5GDW5CV
//! ^^^ prefix  ^^^^^^^^^^^^^ base58(33-byte key + 4-byte checksum)
//! ```
//!
//! Unlike Bitcoin's Base58Check the checksum is a single RIPEMD-160, not a
//! double SHA-256.

use thiserror::Error;

use super::hash::ripemd160;
use crate::config::PUBLIC_KEY_CHECKSUM_LENGTH;

/// Errors produced while decoding a prefixed Base58 string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base58Error {
    #[error("expected prefix '{expected}'")]
    MissingPrefix { expected: String },

    #[error("invalid base58: {0}")]
    InvalidEncoding(String),

    #[error("data too short for checksum")]
    TooShort,

    #[error("checksum mismatch")]
    ChecksumMismatch,
}

/// Encode raw bytes as Base58 (Bitcoin alphabet).
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_string()
}

/// Decode a Base58 (Bitcoin alphabet) string.
pub fn decode(s: &str) -> Result<Vec<u8>, Base58Error> {
    bs58::decode(s)
        .with_alphabet(bs58::Alphabet::BITCOIN)
        .into_vec()
        .map_err(|e| Base58Error::InvalidEncoding(e.to_string()))
}

/// Encode `payload` with its RIPEMD-160 checksum and a leading prefix.
pub fn check_encode(prefix: &str, payload: &[u8]) -> String {
    let checksum = ripemd160(payload);
    let mut data = Vec::with_capacity(payload.len() + PUBLIC_KEY_CHECKSUM_LENGTH);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..PUBLIC_KEY_CHECKSUM_LENGTH]);
    format!("{}{}", prefix, encode(&data))
}

/// Strip `prefix`, decode, and verify the trailing 4-byte checksum.
///
/// Returns the payload without the checksum.
pub fn check_decode(prefix: &str, s: &str) -> Result<Vec<u8>, Base58Error> {
    let body = s.strip_prefix(prefix).ok_or_else(|| Base58Error::MissingPrefix {
        expected: prefix.to_string(),
    })?;
    let decoded = decode(body)?;
    if decoded.len() < PUBLIC_KEY_CHECKSUM_LENGTH {
        return Err(Base58Error::TooShort);
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - PUBLIC_KEY_CHECKSUM_LENGTH);
    if checksum != &ripemd160(payload)[..PUBLIC_KEY_CHECKSUM_LENGTH] {
        return Err(Base58Error::ChecksumMismatch);
    }
    Ok(payload.to_vec())
}
