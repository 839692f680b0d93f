//! # Signing Pipelines
//!
//! The two requests a host can make:
//!
//! - [`sign_tx`]: validate the path, derive the key, parse the transaction,
//!   ask the user, hash, sign.
//! - [`get_public_key`]: validate the path, derive the key, optionally show
//!   it, return it.
//!
//! Both are `async` only because the collaborators are: the keychain may
//! live in secure hardware and the confirmer waits on a human. Neither
//! pipeline keeps state between requests.
//!
//! A user saying "no" is an outcome, not an error. Errors are split into
//! data errors (the request was wrong, see [`SignError::is_data_error`])
//! and failures of the device itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{DEFAULT_ADDRESS_PREFIX, PUBLIC_KEY_LENGTH};
use crate::crypto::keys::compress;
use crate::crypto::{sign_canonical, CryptoError};
use crate::encoding::{Parse, ParseError};
use crate::keychain::{DerivationPath, Keychain, KeychainError};
use crate::transaction::layout::{public_key_screen, sign_tx_screens};
use crate::transaction::{Screen, SignTx, SignTxRequest};

/// The user's answer to one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Approved,
    Declined,
}

/// Shows a screen and waits for the user.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, screen: &Screen) -> Confirmation;
}

#[derive(Debug, Error)]
pub enum SignError {
    #[error("derivation path is missing")]
    MissingPath,

    #[error("invalid derivation path {0}")]
    InvalidPath(DerivationPath),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("key derivation failed: {0}")]
    Keychain(#[from] KeychainError),

    #[error("crypto failure: {0}")]
    Crypto(#[from] CryptoError),
}

impl SignError {
    /// `true` when the request itself was at fault, as opposed to the
    /// keychain or signer.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            SignError::MissingPath | SignError::InvalidPath(_) | SignError::Parse(_)
        )
    }
}

// ---------------------------------------------------------------------------
// sign_tx
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedTransaction {
    /// Hex of the 65-byte compact signature.
    pub signature: String,
    /// `sha256(chain_id || tx)`, the value that was signed.
    #[serde(with = "hex_digest")]
    pub digest: [u8; 32],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutcome {
    Signed(SignedTransaction),
    Declined,
}

/// Run the full signing pipeline for one request.
///
/// Nothing is hashed or signed unless every confirmation screen was
/// approved. The derived key is dropped before this returns.
pub async fn sign_tx<K, C>(
    request: &SignTxRequest,
    keychain: &K,
    confirmer: &C,
) -> Result<SignOutcome, SignError>
where
    K: Keychain + ?Sized,
    C: Confirmer + ?Sized,
{
    let path = DerivationPath::from(request.address_n.clone());
    if !path.is_slip48() {
        warn!(path = %path, "rejecting sign request with invalid path");
        return Err(SignError::InvalidPath(path));
    }

    let key = keychain.derive(&path).await?;

    let sign_tx = SignTx::parse(Some(&request.sign_tx)).map_err(|e| {
        warn!(error = %e, "transaction description rejected");
        e
    })?;
    info!(
        network = %sign_tx.chain_id.network_name(),
        operations = sign_tx.tx.operations.len(),
        "parsed transaction"
    );

    for screen in sign_tx_screens(&sign_tx) {
        if confirmer.confirm(&screen).await == Confirmation::Declined {
            info!(screen = %screen.header, "user declined transaction");
            return Ok(SignOutcome::Declined);
        }
    }

    let digest = sign_tx.digest();
    debug!(digest = %hex::encode(digest), "transaction digest");

    let signature = sign_canonical(&key, &digest).map_err(CryptoError::from)?;
    info!(path = %path, "transaction signed");

    Ok(SignOutcome::Signed(SignedTransaction {
        signature: signature.to_hex(),
        digest,
    }))
}

// ---------------------------------------------------------------------------
// get_public_key
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetPublicKeyRequest {
    #[serde(default)]
    pub address_n: Vec<u32>,
    #[serde(default)]
    pub show_display: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicKeyReply {
    /// `BTS…` form.
    pub compressed: String,
    #[serde(with = "hex_key")]
    pub raw: [u8; PUBLIC_KEY_LENGTH],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicKeyOutcome {
    Key(PublicKeyReply),
    Declined,
}

pub async fn get_public_key<K, C>(
    request: &GetPublicKeyRequest,
    keychain: &K,
    confirmer: &C,
) -> Result<PublicKeyOutcome, SignError>
where
    K: Keychain + ?Sized,
    C: Confirmer + ?Sized,
{
    if request.address_n.is_empty() {
        return Err(SignError::MissingPath);
    }
    let path = DerivationPath::from(request.address_n.clone());
    if !path.is_slip48() {
        warn!(path = %path, "rejecting public key request with invalid path");
        return Err(SignError::InvalidPath(path));
    }

    let raw = keychain.derive(&path).await?.public_key();
    let compressed = compress(&raw, DEFAULT_ADDRESS_PREFIX).map_err(CryptoError::from)?;

    if request.show_display
        && confirmer.confirm(&public_key_screen(&compressed)).await == Confirmation::Declined
    {
        info!(path = %path, "user declined public key display");
        return Ok(PublicKeyOutcome::Declined);
    }

    debug!(path = %path, key = %compressed, "public key exported");
    Ok(PublicKeyOutcome::Key(PublicKeyReply { compressed, raw }))
}

mod hex_digest {
    use serde::Serializer;

    pub fn serialize<S: Serializer>(digest: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(digest))
    }
}

mod hex_key {
    use serde::Serializer;

    use crate::config::PUBLIC_KEY_LENGTH;

    pub fn serialize<S: Serializer>(
        key: &[u8; PUBLIC_KEY_LENGTH],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keychain::HdKeychain;
    use std::sync::Mutex;

    const SEED: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    /// Approves the first `approve` screens, then declines.
    struct Scripted {
        approve: usize,
        seen: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn approving(approve: usize) -> Self {
            Self {
                approve,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn headers(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Confirmer for Scripted {
        async fn confirm(&self, screen: &Screen) -> Confirmation {
            let mut seen = self.seen.lock().unwrap();
            seen.push(screen.header.clone());
            if seen.len() <= self.approve {
                Confirmation::Approved
            } else {
                Confirmation::Declined
            }
        }
    }

    struct Offline;

    #[async_trait]
    impl Keychain for Offline {
        async fn derive(&self, _path: &DerivationPath) -> Result<crate::crypto::PrivateKey, KeychainError> {
            Err(KeychainError::Unavailable("locked".into()))
        }
    }

    fn request() -> SignTxRequest {
        SignTxRequest::from_json(
            r#"{
                "address_n": [2147483696, 2147483649, 2147483649, 2147483648, 2147483648],
                "chain_id": "4018d7844c78f6a6c41c6a552b898022310fc5dec06da467ee7905a8dad512c8",
                "tx": {
                    "header": { "ref_block_num": 64476, "ref_block_prefix": 1034601640, "expiration": 1580302522 },
                    "operations": [{
                        "operation_name": "limit_order_cancel",
                        "fee": { "amount": 0, "asset_id": "1.3.0" },
                        "limit_order_cancel": { "fee_paying_account": "1.2.104", "order": "1.7.51840" }
                    }]
                }
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn decline_on_summary_stops_everything() {
        let keychain = HdKeychain::from_hex_seed(SEED).unwrap();
        let confirmer = Scripted::approving(0);
        let outcome = sign_tx(&request(), &keychain, &confirmer).await.unwrap();
        assert_eq!(outcome, SignOutcome::Declined);
        assert_eq!(confirmer.headers(), vec!["Sign transaction"]);
    }

    #[tokio::test]
    async fn decline_on_operation_screen() {
        let keychain = HdKeychain::from_hex_seed(SEED).unwrap();
        let confirmer = Scripted::approving(1);
        let outcome = sign_tx(&request(), &keychain, &confirmer).await.unwrap();
        assert_eq!(outcome, SignOutcome::Declined);
        assert_eq!(
            confirmer.headers(),
            vec!["Sign transaction", "limit order cancel"]
        );
    }

    #[tokio::test]
    async fn keychain_failure_is_not_a_data_error() {
        let err = sign_tx(&request(), &Offline, &Scripted::approving(10))
            .await
            .unwrap_err();
        assert!(matches!(err, SignError::Keychain(_)));
        assert!(!err.is_data_error());
    }

    #[tokio::test]
    async fn invalid_path_is_checked_before_derivation() {
        let mut request = request();
        request.address_n.truncate(3);
        let err = sign_tx(&request, &Offline, &Scripted::approving(10))
            .await
            .unwrap_err();
        assert!(matches!(err, SignError::InvalidPath(_)));
        assert!(err.is_data_error());
    }

    #[tokio::test]
    async fn public_key_without_display_skips_confirmer() {
        let keychain = HdKeychain::from_hex_seed(SEED).unwrap();
        let confirmer = Scripted::approving(0);
        let request = GetPublicKeyRequest {
            address_n: DerivationPath::slip48(0, 0, 0).components().to_vec(),
            show_display: false,
        };
        let outcome = get_public_key(&request, &keychain, &confirmer).await.unwrap();
        let PublicKeyOutcome::Key(reply) = outcome else {
            panic!("expected a key");
        };
        assert_eq!(reply.compressed, "BTS7TP8oMkfCuzQWGTfYvBvkQ2nqYj69yRxsg4RQxtsthtTKZHnXT");
        assert!(confirmer.headers().is_empty());
    }

    #[tokio::test]
    async fn public_key_requires_path() {
        let err = get_public_key(&GetPublicKeyRequest::default(), &Offline, &Scripted::approving(1))
            .await
            .unwrap_err();
        assert!(matches!(err, SignError::MissingPath));
        assert_eq!(err.to_string(), "derivation path is missing");
    }

    #[test]
    fn signed_transaction_serializes_hex() {
        let signed = SignedTransaction {
            signature: "1f".into(),
            digest: [0xab; 32],
        };
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["digest"], "ab".repeat(32));
    }
}
