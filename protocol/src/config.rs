//! # Protocol Configuration & Constants
//!
//! Every magic number the signing core depends on lives here: network
//! prefixes, chain identifiers, the SLIP-0048 derivation scheme and the
//! page sizes used when rendering confirmation screens.
//!
//! These values are dictated by the BitShares network. Changing one of them
//! does not change the network, it only makes our signatures useless.

// ---------------------------------------------------------------------------
// Network Identifiers
// ---------------------------------------------------------------------------

/// Chain id of the BitShares mainnet, hex-encoded.
pub const CHAIN_ID_MAINNET: &str =
    "4018d7844c78f6a6c41c6a552b898022310fc5dec06da467ee7905a8dad512c8";

/// Chain id of the public BitShares testnet, hex-encoded.
pub const CHAIN_ID_TESTNET: &str =
    "39f5e2ede1f8bc1a3a54a7914414e3779e33193f1f5693510e73cb7a87617447";

/// Public key prefix used on mainnet (`BTS6MRyAjQq8...`).
pub const DEFAULT_ADDRESS_PREFIX: &str = "BTS";

/// Public key prefix used on the public testnet.
pub const TESTNET_ADDRESS_PREFIX: &str = "TEST";

/// Length of a decoded chain id in bytes. Chain ids are SHA-256 digests.
pub const CHAIN_ID_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Key Parameters
// ---------------------------------------------------------------------------

/// Compressed secp256k1 public keys are always 33 bytes.
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// Base58 key strings carry a 4-byte RIPEMD-160 checksum after the key.
pub const PUBLIC_KEY_CHECKSUM_LENGTH: usize = 4;

/// Length of a key address, `ripemd160(sha512(key))`.
pub const ADDRESS_LENGTH: usize = 20;

/// Compact recoverable signatures: one header byte plus `r` and `s`.
pub const SIGNATURE_LENGTH: usize = 65;

/// Upper bound on re-signing attempts while searching for a canonical
/// signature. Each attempt has roughly a 1/4 chance of failing the check,
/// so hitting this bound means the signer is broken.
pub const MAX_SIGNING_ATTEMPTS: usize = 64;

// ---------------------------------------------------------------------------
// Derivation Paths (SLIP-0048)
// ---------------------------------------------------------------------------

/// High bit marking a hardened BIP-32 path component.
pub const HARDENED: u32 = 0x8000_0000;

/// SLIP-0048 purpose, `48'`.
pub const SLIP48_PURPOSE: u32 = 48 | HARDENED;

/// SLIP-0048 network index assigned to BitShares, `1'`.
pub const BITSHARES_NETWORK: u32 = 1 | HARDENED;

/// Owner role, `0'`.
pub const ROLE_OWNER: u32 = HARDENED;

/// Active role, `1'`.
pub const ROLE_ACTIVE: u32 = 1 | HARDENED;

/// Memo role, `3'`.
pub const ROLE_MEMO: u32 = 3 | HARDENED;

/// Number of components in a SLIP-0048 path.
pub const SLIP48_PATH_LENGTH: usize = 5;

// ---------------------------------------------------------------------------
// Confirmation Layout
// ---------------------------------------------------------------------------

/// Lines per page on the "Sign transaction" summary screen.
pub const SUMMARY_PER_PAGE: usize = 5;

/// Header of the summary screen.
pub const SUMMARY_HEADER: &str = "Sign transaction";

/// Header of the public key screen.
pub const PUBLIC_KEY_HEADER: &str = "Confirm public key";

// ---------------------------------------------------------------------------
// Utility
// ---------------------------------------------------------------------------

/// Returns the public key prefix for a known chain id.
/// Returns `None` for unrecognized chains; we don't guess.
pub fn address_prefix_for_chain(chain_id: &str) -> Option<&'static str> {
    match chain_id.to_ascii_lowercase().as_str() {
        CHAIN_ID_MAINNET => Some(DEFAULT_ADDRESS_PREFIX),
        CHAIN_ID_TESTNET => Some(TESTNET_ADDRESS_PREFIX),
        _ => None,
    }
}

/// Returns a friendly name for a chain id, mainly for logging.
/// Unknown chains get a shortened id.
pub fn network_name(chain_id: &str) -> String {
    match address_prefix_for_chain(chain_id) {
        Some(DEFAULT_ADDRESS_PREFIX) => "mainnet".to_string(),
        Some(_) => "testnet".to_string(),
        None => {
            let short: String = chain_id.chars().take(8).collect();
            format!("unknown({})", short)
        }
    }
}
