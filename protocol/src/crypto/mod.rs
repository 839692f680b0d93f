//! # Cryptographic Primitives
//!
//! Everything the signing core needs from cryptography, and nothing else:
//!
//! - **SHA-256** for the transaction digest.
//! - **SHA-512 + RIPEMD-160** for key addresses and key string checksums.
//! - **Base58** (Bitcoin alphabet) for the `BTS…` key strings.
//! - **secp256k1 ECDSA** for compact recoverable signatures.
//!
//! ## A note on "rolling your own crypto"
//!
//! We don't. Every function here wraps a RustCrypto implementation
//! (`sha2`, `ripemd`, `k256`) or `bs58`. The only logic we own is the
//! network's framing: the checksum layout of key strings and the canonical
//! signature rule.

pub mod base58;
pub mod hash;
pub mod keys;
pub mod signatures;

use thiserror::Error;

pub use base58::Base58Error;
pub use hash::{key_address, ripemd160, sha256, sha512};
pub use keys::{KeyError, PrivateKey};
pub use signatures::{sign_canonical, CompactSignature, SignatureError};

/// Any failure raised by the crypto layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Base58(#[from] Base58Error),

    #[error(transparent)]
    Signature(#[from] SignatureError),
}
