//! Public keys as they appear inside operations.
//!
//! The host can send a key either as the usual `BTS…` string or as 33 raw
//! bytes in hex. Both end up as the same validated compressed point.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::config::{ADDRESS_LENGTH, DEFAULT_ADDRESS_PREFIX, PUBLIC_KEY_LENGTH};
use crate::crypto::{base58, hash::key_address, keys};
use crate::encoding::{Encode, Parse, ParseError, Sink};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyDescription {
    /// Prefixed base58 form, e.g. `BTS6MRyAjQq8…`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compressed: Option<String>,
    /// Hex of the 33-byte compressed point.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

impl PublicKeyDescription {
    pub fn compressed(key: impl Into<String>) -> Self {
        Self {
            compressed: Some(key.into()),
            raw: None,
        }
    }

    pub fn raw(hex_key: impl Into<String>) -> Self {
        Self {
            compressed: None,
            raw: Some(hex_key.into()),
        }
    }
}

/// A validated compressed secp256k1 public key.
///
/// Ordered by [`PublicKey::address`], which is how the network sorts keys
/// inside an authority.
#[derive(Debug, Clone)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
    readable: String,
}

impl PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        let bytes = keys::parse_compressed(bytes).map_err(|e| ParseError::invalid(e.to_string()))?;
        Ok(Self {
            bytes,
            readable: base58::check_encode(DEFAULT_ADDRESS_PREFIX, &bytes),
        })
    }

    pub fn from_base58(text: &str) -> Result<Self, ParseError> {
        let payload = base58::check_decode(DEFAULT_ADDRESS_PREFIX, text)
            .map_err(|e| ParseError::invalid(format!("public key {}: {}", text, e)))?;
        let bytes =
            keys::parse_compressed(&payload).map_err(|e| ParseError::invalid(e.to_string()))?;
        Ok(Self {
            bytes,
            readable: text.to_string(),
        })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// `ripemd160(sha512(key))`.
    pub fn address(&self) -> [u8; ADDRESS_LENGTH] {
        key_address(&self.bytes)
    }
}

impl Parse for PublicKey {
    type Description = PublicKeyDescription;

    fn parse(description: Option<&PublicKeyDescription>) -> Result<Self, ParseError> {
        let description = description.ok_or_else(ParseError::missing)?;
        match (&description.compressed, &description.raw) {
            (Some(text), _) => Self::from_base58(text),
            (None, Some(raw)) => {
                let bytes = hex::decode(raw)
                    .map_err(|e| ParseError::invalid(format!("raw public key: {}", e)))?;
                Self::from_bytes(&bytes)
            }
            (None, None) => Err(ParseError::invalid(
                "public key given neither in compressed nor raw form",
            )),
        }
    }
}

impl Encode for PublicKey {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put(&self.bytes);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for PublicKey {}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl Ord for PublicKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.address()
            .cmp(&other.address())
            .then_with(|| self.bytes.cmp(&other.bytes))
    }
}

impl PartialOrd for PublicKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
