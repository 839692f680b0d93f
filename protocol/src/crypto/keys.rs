//! # Key Management
//!
//! secp256k1 key handling for BitShares accounts.
//!
//! The private key type is a thin wrapper around `k256::ecdsa::SigningKey`,
//! which zeroizes its scalar on drop. Keys live only as long as the request
//! that derived them.
//!
//! Key bytes are never logged. If you add logging to this module, log the
//! public half or nothing.

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;
use thiserror::Error;

use super::base58;
use crate::config::PUBLIC_KEY_LENGTH;

/// Errors that can occur during key operations.
///
/// Intentionally vague about secret material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
}

/// A secp256k1 private key bound to one derivation path.
///
/// Does not implement `Serialize` or `Clone`: exporting a key must be an
/// explicit call to [`PrivateKey::to_bytes`].
pub struct PrivateKey {
    signing_key: SigningKey,
}

impl PrivateKey {
    /// Reconstruct a private key from a 32-byte big-endian scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        // `from_slice` left-pads short input.
        if bytes.len() != 32 {
            return Err(KeyError::InvalidSecretKey);
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Reconstruct a private key from a hex-encoded scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str).map_err(|_| KeyError::InvalidSecretKey)?;
        Self::from_bytes(&bytes)
    }

    /// The 33-byte compressed public key.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        let point = self.signing_key.verifying_key().as_affine().to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Export the raw 32-byte scalar. Handle with care.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes().into()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl From<SigningKey> for PrivateKey {
    fn from(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &hex::encode(self.public_key()))
            .finish_non_exhaustive()
    }
}

/// Validate that `bytes` is a compressed secp256k1 point and return it as an
/// array.
pub fn parse_compressed(bytes: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH], KeyError> {
    if bytes.len() != PUBLIC_KEY_LENGTH {
        return Err(KeyError::InvalidPublicKey(format!(
            "expected {} bytes, got {}",
            PUBLIC_KEY_LENGTH,
            bytes.len()
        )));
    }
    if bytes[0] != 0x02 && bytes[0] != 0x03 {
        return Err(KeyError::InvalidPublicKey(
            "not a compressed point".to_string(),
        ));
    }
    VerifyingKey::from_sec1_bytes(bytes)
        .map_err(|_| KeyError::InvalidPublicKey("point is not on the curve".to_string()))?;

    let mut out = [0u8; PUBLIC_KEY_LENGTH];
    out.copy_from_slice(bytes);
    Ok(out)
}

/// Render a public key in the network's base58 form.
///
/// Accepts a 33-byte compressed key or a 65-byte uncompressed one
/// (`0x04 || x || y`), which is compressed first.
pub fn compress(pub_key: &[u8], prefix: &str) -> Result<String, KeyError> {
    let compressed: Vec<u8> = match pub_key {
        [0x04, rest @ ..] if rest.len() == 64 => {
            let head = if rest[63] & 0x01 == 1 { 0x03 } else { 0x02 };
            let mut out = Vec::with_capacity(PUBLIC_KEY_LENGTH);
            out.push(head);
            out.extend_from_slice(&rest[..32]);
            out
        }
        [0x02 | 0x03, ..] if pub_key.len() == PUBLIC_KEY_LENGTH => pub_key.to_vec(),
        _ => return Err(KeyError::InvalidPublicKey("invalid public key".to_string())),
    };
    Ok(base58::check_encode(prefix, &compressed))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "a5a105ba48c67edb6bd30f72f6e1ff5307af23893430d30d2c48aa7a0e0a746d";
    const PUBLIC: &str = "0352144c2e443b7f06dce14fe5d5657e45d35b6d2caf8a552e539fd88ea1916f5e";

    #[test]
    fn public_key_from_secret() {
        let key = PrivateKey::from_hex(SECRET).unwrap();
        assert_eq!(hex::encode(key.public_key()), PUBLIC);
        assert_eq!(hex::encode(key.to_bytes()), SECRET);
    }

    #[test]
    fn zero_scalar_is_rejected() {
        assert_eq!(
            PrivateKey::from_bytes(&[0u8; 32]).unwrap_err(),
            KeyError::InvalidSecretKey
        );
    }

    #[test]
    fn secret_must_be_exactly_32_bytes() {
        for len in [0, 24, 31, 33] {
            assert_eq!(
                PrivateKey::from_bytes(&vec![1u8; len]).unwrap_err(),
                KeyError::InvalidSecretKey,
                "{len}-byte secret"
            );
        }
        assert!(PrivateKey::from_hex(&SECRET[2..]).is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let key = PrivateKey::from_hex(SECRET).unwrap();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(SECRET));
        assert!(rendered.contains(PUBLIC));
    }

    #[test]
    fn compress_compressed_key() {
        let raw = hex::decode(PUBLIC).unwrap();
        assert_eq!(
            compress(&raw, "BTS").unwrap(),
            "BTS7TP8oMkfCuzQWGTfYvBvkQ2nqYj69yRxsg4RQxtsthtTKZHnXT"
        );
    }

    #[test]
    fn compress_uncompressed_key() {
        let key = PrivateKey::from_hex(SECRET).unwrap();
        let uncompressed = key
            .signing_key()
            .verifying_key()
            .as_affine()
            .to_encoded_point(false);
        assert_eq!(
            compress(uncompressed.as_bytes(), "BTS").unwrap(),
            "BTS7TP8oMkfCuzQWGTfYvBvkQ2nqYj69yRxsg4RQxtsthtTKZHnXT"
        );
    }

    #[test]
    fn compress_rejects_garbage() {
        assert!(compress(&[0x05; 33], "BTS").is_err());
        assert!(compress(&[0x02; 10], "BTS").is_err());
    }

    #[test]
    fn parse_compressed_checks_curve() {
        let raw = hex::decode(PUBLIC).unwrap();
        assert!(parse_compressed(&raw).is_ok());

        let mut off_curve = [0xffu8; 33];
        off_curve[0] = 0x02;
        assert!(parse_compressed(&off_curve).is_err());
        assert!(parse_compressed(&raw[..32]).is_err());
    }
}
