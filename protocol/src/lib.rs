//! # BitShares Protocol: Signing Core
//!
//! Everything a signing device needs to turn a host's JSON description of a
//! BitShares transaction into a signature the chain will accept, and nothing
//! it doesn't. No networking, no broadcasting, no wallet state.
//!
//! The hard part is not the ECDSA. It's producing *exactly* the bytes the
//! graphene node will hash: field order, varint widths, sorted authority
//! maps, presence flags. Get one byte wrong and the node rejects the
//! transaction with an unhelpful "missing required active authority".
//!
//! ## Architecture
//!
//! - **encoding**: The `Parse`/`Encode` machinery and the primitive
//!   encoders. Errors carry the path of the offending field.
//! - **types**: Object ids, vote ids, public keys, assets, memos and
//!   authorities.
//! - **operations**: The supported operation set and its registry.
//! - **transaction**: Header, transaction, the signed envelope and the
//!   confirmation screens built from it.
//! - **crypto**: Hashes, base58, secp256k1 keys, canonical signatures.
//! - **keychain**: SLIP-48 paths and hardened BIP-32 derivation.
//! - **app**: The `sign_tx` and `get_public_key` pipelines.
//! - **config**: Chain ids, prefixes and display constants.
//! - **logging**: `tracing` subscriber setup for hosts.
//!
//! ## Design Philosophy
//!
//! 1. The description is untrusted. Every field is validated before a single
//!    byte is written, and every error says *where* it happened.
//! 2. Nothing is signed that the user has not seen.
//! 3. Keys never show up in logs.

pub mod app;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod keychain;
pub mod logging;
pub mod operations;
pub mod transaction;
pub mod types;

pub use app::{
    get_public_key, sign_tx, Confirmation, Confirmer, GetPublicKeyRequest, PublicKeyOutcome,
    PublicKeyReply, SignError, SignOutcome, SignedTransaction,
};
pub use encoding::{Encode, Parse, ParseError};
pub use keychain::{DerivationPath, HdKeychain, Keychain, KeychainError};
pub use operations::{Operation, OperationKind};
pub use transaction::{Screen, ScreenKind, SignTx, SignTxRequest, Transaction};
