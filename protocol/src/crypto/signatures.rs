//! # Digital Signatures
//!
//! Compact, recoverable secp256k1 signatures in the form Graphene nodes
//! accept.
//!
//! A signature is 65 bytes: a header byte `27 + 4 + recovery_id` (the `+4`
//! flags a compressed public key) followed by `r` and `s`. Nodes reject
//! signatures whose `r` or `s` is not "canonical": the 32-byte big-endian
//! value must not have its top bit set, and must not start with a zero byte
//! unless the following byte has its top bit set. About one signature in
//! four fails that test, so signing loops until it finds one that passes.
//!
//! The first attempt uses the RFC 6979 deterministic nonce, so a digest
//! signed by the same key produces the same signature in the common case.
//! Retries mix fresh randomness from `OsRng` into the nonce.

use k256::ecdsa::signature::hazmat::{PrehashSigner, RandomizedPrehashSigner};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::debug;

use super::keys::PrivateKey;
use crate::config::{MAX_SIGNING_ATTEMPTS, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Header offset for recoverable signatures over compressed keys.
const COMPACT_HEADER_BASE: u8 = 27 + 4;

/// Errors during signature operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("signing failed: {0}")]
    Signing(String),

    #[error("no canonical signature found after {0} attempts")]
    NoCanonicalSignature(usize),

    #[error("invalid signature bytes: expected {SIGNATURE_LENGTH} bytes")]
    InvalidSignatureBytes,

    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// A 65-byte compact recoverable signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompactSignature([u8; SIGNATURE_LENGTH]);

impl CompactSignature {
    /// Wrap 65 raw signature bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignatureError> {
        let array: [u8; SIGNATURE_LENGTH] = bytes
            .try_into()
            .map_err(|_| SignatureError::InvalidSignatureBytes)?;
        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    /// Hex encoding, the form handed back to the host.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns `true` if both `r` and `s` pass the canonical test.
    pub fn is_canonical(&self) -> bool {
        is_canonical(&self.0[1..])
    }

    /// Recover the compressed public key that produced this signature.
    pub fn recover(&self, digest: &[u8; 32]) -> Result<[u8; PUBLIC_KEY_LENGTH], SignatureError> {
        let recovery_byte = self.0[0]
            .checked_sub(COMPACT_HEADER_BASE)
            .ok_or(SignatureError::RecoveryFailed)?;
        let recovery_id =
            RecoveryId::from_byte(recovery_byte).ok_or(SignatureError::RecoveryFailed)?;
        let signature =
            Signature::from_slice(&self.0[1..]).map_err(|_| SignatureError::RecoveryFailed)?;
        let key = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|_| SignatureError::RecoveryFailed)?;

        let point = key.as_affine().to_encoded_point(true);
        let mut out = [0u8; PUBLIC_KEY_LENGTH];
        out.copy_from_slice(point.as_bytes());
        Ok(out)
    }
}

impl std::fmt::Debug for CompactSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompactSignature({})", self.to_hex())
    }
}

/// Sign a 32-byte digest, returning the first canonical signature found.
///
/// # Errors
///
/// [`SignatureError::Signing`] if the underlying primitive fails, and
/// [`SignatureError::NoCanonicalSignature`] if every attempt up to
/// [`MAX_SIGNING_ATTEMPTS`] was rejected. Neither happens with a valid key.
pub fn sign_canonical(
    key: &PrivateKey,
    digest: &[u8; 32],
) -> Result<CompactSignature, SignatureError> {
    let signing_key = key.signing_key();

    for attempt in 0..MAX_SIGNING_ATTEMPTS {
        let signature: Signature = if attempt == 0 {
            signing_key.sign_prehash(digest)
        } else {
            signing_key.sign_prehash_with_rng(&mut OsRng, digest)
        }
        .map_err(|e| SignatureError::Signing(e.to_string()))?;

        let rs = signature.to_bytes();
        if !is_canonical(&rs) {
            debug!(attempt, "signature not canonical, retrying");
            continue;
        }

        let recovery_id =
            RecoveryId::trial_recovery_from_prehash(signing_key.verifying_key(), digest, &signature)
                .map_err(|e| SignatureError::Signing(e.to_string()))?;

        let mut out = [0u8; SIGNATURE_LENGTH];
        out[0] = COMPACT_HEADER_BASE + recovery_id.to_byte();
        out[1..].copy_from_slice(&rs);
        return Ok(CompactSignature(out));
    }

    Err(SignatureError::NoCanonicalSignature(MAX_SIGNING_ATTEMPTS))
}

/// Canonical test over the 64-byte `r || s` concatenation.
fn is_canonical(rs: &[u8]) -> bool {
    let half_ok = |h: &[u8]| h[0] & 0x80 == 0 && !(h[0] == 0 && h[1] & 0x80 == 0);
    rs.len() == 64 && half_ok(&rs[..32]) && half_ok(&rs[32..])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::sha256;
    use k256::ecdsa::signature::hazmat::PrehashVerifier;

    const SECRET: &str = "ef7e499f4bfa43ce54ce2d5a641bc1ca3873469dd9c67b5aead8a47ac7b8071e";

    fn key() -> PrivateKey {
        PrivateKey::from_hex(SECRET).unwrap()
    }

    #[test]
    fn signature_is_canonical_and_65_bytes() {
        for i in 0u8..16 {
            let digest = sha256(&[i]);
            let sig = sign_canonical(&key(), &digest).unwrap();
            assert_eq!(sig.as_bytes().len(), 65);
            assert!(sig.is_canonical());
            assert!((31..=34).contains(&sig.as_bytes()[0]));
        }
    }

    #[test]
    fn signature_recovers_signer() {
        let digest = sha256(b"transfer 1.3.0");
        let sig = sign_canonical(&key(), &digest).unwrap();
        assert_eq!(sig.recover(&digest).unwrap(), key().public_key());
    }

    #[test]
    fn signature_verifies_with_k256() {
        let digest = sha256(b"limit order");
        let sig = sign_canonical(&key(), &digest).unwrap();
        let signature = Signature::from_slice(&sig.as_bytes()[1..]).unwrap();
        let verifying = VerifyingKey::from_sec1_bytes(&key().public_key()).unwrap();
        assert!(verifying.verify_prehash(&digest, &signature).is_ok());
    }

    #[test]
    fn canonical_rule_edges() {
        let mut rs = [0x01u8; 64];
        assert!(is_canonical(&rs));

        rs[0] = 0x80;
        assert!(!is_canonical(&rs), "top bit of r set");

        rs[0] = 0x00;
        rs[1] = 0x7f;
        assert!(!is_canonical(&rs), "leading zero of r without high next byte");

        rs[1] = 0x80;
        assert!(is_canonical(&rs));

        rs[32] = 0xff;
        assert!(!is_canonical(&rs), "top bit of s set");
    }

    #[test]
    fn from_bytes_checks_length() {
        assert_eq!(
            CompactSignature::from_bytes(&[0u8; 64]),
            Err(SignatureError::InvalidSignatureBytes)
        );
        assert!(CompactSignature::from_bytes(&[0u8; 65]).is_ok());
    }

    #[test]
    fn recover_rejects_bad_header() {
        let sig = CompactSignature::from_bytes(&[0u8; 65]).unwrap();
        assert_eq!(sig.recover(&[0u8; 32]), Err(SignatureError::RecoveryFailed));
    }
}
