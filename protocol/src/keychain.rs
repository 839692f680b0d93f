//! # Key Derivation
//!
//! BitShares keys follow SLIP-0048: `m/48'/1'/role'/account'/key'`, every
//! component hardened. The role is owner (`0'`), active (`1'`) or memo
//! (`3'`).
//!
//! The [`Keychain`] trait is the seam between the signing pipeline and
//! wherever keys actually live. [`HdKeychain`] is the in-process
//! implementation: plain BIP-32 over a seed, restricted to hardened
//! children since no valid path needs anything else.
//!
//! ```text
//! master:  I = HMAC-SHA512("Bitcoin seed", seed)        k = I_L, c = I_R
//! child i: I = HMAC-SHA512(c, 0x00 || k || ser32(i))    k' = I_L + k (mod n), c' = I_R
//! ```

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::ff::PrimeField;
use k256::{FieldBytes, Scalar};
use serde::{Deserialize, Serialize};
use sha2::Sha512;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

use crate::config::{
    BITSHARES_NETWORK, HARDENED, ROLE_ACTIVE, ROLE_MEMO, ROLE_OWNER, SLIP48_PATH_LENGTH,
    SLIP48_PURPOSE,
};
use crate::crypto::PrivateKey;

type HmacSha512 = Hmac<Sha512>;

const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";
const MIN_SEED_LENGTH: usize = 16;
const MAX_SEED_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeychainError {
    #[error("seed must be {MIN_SEED_LENGTH} to {MAX_SEED_LENGTH} bytes, got {0}")]
    InvalidSeed(usize),

    #[error("path component {0} is not hardened")]
    NonHardened(u32),

    #[error("derivation produced an invalid key at component {0}")]
    InvalidChild(u32),

    #[error("invalid derivation path '{0}'")]
    InvalidPath(String),

    #[error("keychain unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Derivation Paths
// ---------------------------------------------------------------------------

/// A BIP-32 path as a list of child indices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn new(components: Vec<u32>) -> Self {
        Self(components)
    }

    /// `m/48'/1'/role'/account'/key'`.
    pub fn slip48(role: u32, account: u32, key: u32) -> Self {
        Self(vec![
            SLIP48_PURPOSE,
            BITSHARES_NETWORK,
            role | HARDENED,
            account | HARDENED,
            key | HARDENED,
        ])
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_slip48(&self) -> bool {
        validate_slip48(&self.0)
    }
}

/// Returns `true` if `path` is a complete SLIP-0048 BitShares path.
pub fn validate_slip48(path: &[u32]) -> bool {
    if path.len() != SLIP48_PATH_LENGTH {
        return false;
    }
    let [purpose, network, role, account, key] = path else {
        return false;
    };
    *purpose == SLIP48_PURPOSE
        && *network == BITSHARES_NETWORK
        && matches!(*role, ROLE_OWNER | ROLE_ACTIVE | ROLE_MEMO)
        && *account >= HARDENED
        && *key >= HARDENED
}

impl From<Vec<u32>> for DerivationPath {
    fn from(components: Vec<u32>) -> Self {
        Self(components)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for index in &self.0 {
            if index & HARDENED != 0 {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = KeychainError;

    /// Parses `m/48'/1'/0'/0'/0'`. `h` is accepted in place of `'`.
    fn from_str(text: &str) -> Result<Self, KeychainError> {
        let bad = || KeychainError::InvalidPath(text.to_string());
        let mut parts = text.split('/');
        if parts.next() != Some("m") {
            return Err(bad());
        }
        parts
            .map(|part| {
                let (digits, hardened) = match part.strip_suffix(&['\'', 'h'][..]) {
                    Some(digits) => (digits, true),
                    None => (part, false),
                };
                let index: u32 = digits.parse().map_err(|_| bad())?;
                if index >= HARDENED {
                    return Err(bad());
                }
                Ok(if hardened { index | HARDENED } else { index })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(DerivationPath)
    }
}

// ---------------------------------------------------------------------------
// Keychain
// ---------------------------------------------------------------------------

/// Source of private keys for a derivation path.
///
/// Implementations may suspend, e.g. to talk to secure hardware. The
/// returned key is owned by the caller and dropped at the end of the
/// request.
#[async_trait]
pub trait Keychain: Send + Sync {
    async fn derive(&self, path: &DerivationPath) -> Result<PrivateKey, KeychainError>;
}

/// BIP-32 keychain over an in-memory seed. Hardened derivation only.
pub struct HdKeychain {
    master_key: SigningKey,
    master_chain_code: [u8; 32],
}

impl HdKeychain {
    pub fn from_seed(seed: &[u8]) -> Result<Self, KeychainError> {
        if !(MIN_SEED_LENGTH..=MAX_SEED_LENGTH).contains(&seed.len()) {
            return Err(KeychainError::InvalidSeed(seed.len()));
        }
        let (master_key, master_chain_code) = split_hmac(MASTER_HMAC_KEY, &[seed])
            .and_then(|(il, ir)| Some((SigningKey::from_slice(&il).ok()?, ir)))
            .ok_or(KeychainError::InvalidSeed(seed.len()))?;
        Ok(Self {
            master_key,
            master_chain_code,
        })
    }

    pub fn from_hex_seed(seed: &str) -> Result<Self, KeychainError> {
        let bytes = hex::decode(seed).map_err(|_| KeychainError::InvalidSeed(seed.len() / 2))?;
        Self::from_seed(&bytes)
    }

    fn derive_sync(&self, path: &DerivationPath) -> Result<PrivateKey, KeychainError> {
        let mut key = self.master_key.clone();
        let mut chain_code = self.master_chain_code;

        for &index in path.components() {
            if index & HARDENED == 0 {
                return Err(KeychainError::NonHardened(index));
            }
            let parent_bytes = key.to_bytes();
            let index_bytes = index.to_be_bytes();
            let data: [&[u8]; 3] = [&[0u8], &parent_bytes[..], &index_bytes];
            let (il, ir) =
                split_hmac(&chain_code, &data).ok_or(KeychainError::InvalidChild(index))?;

            let tweak: Option<Scalar> = Scalar::from_repr(FieldBytes::from(il)).into();
            let tweak = tweak.ok_or(KeychainError::InvalidChild(index))?;
            let parent: Scalar = **key.as_nonzero_scalar();
            let child = tweak + parent;
            if bool::from(child.is_zero()) {
                return Err(KeychainError::InvalidChild(index));
            }

            key = SigningKey::from_bytes(&child.to_bytes())
                .map_err(|_| KeychainError::InvalidChild(index))?;
            chain_code = ir;
        }

        Ok(PrivateKey::from(key))
    }
}

/// `HMAC-SHA512(key, parts...)` split into its left and right halves.
fn split_hmac(key: &[u8], parts: &[&[u8]]) -> Option<([u8; 32], [u8; 32])> {
    let mut mac = HmacSha512::new_from_slice(key).ok()?;
    for part in parts {
        mac.update(part);
    }
    let out = mac.finalize().into_bytes();
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&out[..32]);
    right.copy_from_slice(&out[32..]);
    Some((left, right))
}

#[async_trait]
impl Keychain for HdKeychain {
    async fn derive(&self, path: &DerivationPath) -> Result<PrivateKey, KeychainError> {
        let key = self.derive_sync(path)?;
        debug!(path = %path, "derived key");
        Ok(key)
    }
}

impl fmt::Debug for HdKeychain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HdKeychain").finish_non_exhaustive()
    }
}
