//! # Hashing Utilities
//!
//! The three hash functions BitShares needs and nothing more:
//!
//! - **SHA-256** for transaction digests (`sha256(chain_id || tx)`).
//! - **SHA-512** as the first stage of key addresses.
//! - **RIPEMD-160** for key addresses and the base58 key checksum.
//!
//! All of them are thin wrappers over the RustCrypto implementations.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

use crate::config::ADDRESS_LENGTH;

/// Compute the SHA-256 hash of the input data.
///
/// # Example
///
/// ```
/// use bitshares_protocol::crypto::hash::sha256;
///
/// let hash = sha256(b"BitShares");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-512 hash of the input data.
pub fn sha512(data: &[u8]) -> [u8; 64] {
    let mut hasher = Sha512::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 64];
    output.copy_from_slice(&result);
    output
}

/// Compute the RIPEMD-160 hash of the input data.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 20];
    output.copy_from_slice(&result);
    output
}

/// Compute the address of a public key: `RIPEMD-160(SHA-512(key))`.
///
/// Graphene chains order keys inside an authority by this value, so it is
/// part of the canonical encoding and not just a display helper.
pub fn key_address(key: &[u8]) -> [u8; ADDRESS_LENGTH] {
    ripemd160(&sha512(key))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"abc")),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha512_known_vector() {
        assert_eq!(
            hex::encode(&sha512(b"abc")[..16]),
            "ddaf35a193617abacc417349ae204131"
        );
    }

    #[test]
    fn ripemd160_known_vector() {
        assert_eq!(
            hex::encode(ripemd160(b"a")),
            "0bdc9d2d256b3ee9daae347be6f4dc835a467ffe"
        );
    }

    #[test]
    fn key_address_matches_network() {
        let key = hex::decode(
            "02fe8cc11cc8251de6977636b55c1ab8a9d12b0b26154ac78e56e7c4257d8bcf69",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key_address(&key)),
            "455b0daa80a21b698cf93fa16788239951d86e24"
        );
    }
}
