//! # Domain Value Types
//!
//! The BitShares-specific leaves and small composites that operations are
//! built from.
//!
//! ```text
//! chain.rs       ChainId, EmptyExtension
//! ids.rs         ObjectId (1.2.15), VoteId (1:0)
//! public_key.rs  PublicKey (BTS… or raw hex)
//! asset.rs       Asset, Memo
//! account.rs     authorities, Permission, AccountOptions
//! ```

pub mod account;
pub mod asset;
pub mod chain;
pub mod ids;
pub mod public_key;

pub use account::{
    AccountAuthority, AccountAuthorityDescription, AccountOptions, AccountOptionsDescription,
    AddressAuthority, AddressAuthorityDescription, ByKeyAddress, KeyAuthority,
    KeyAuthorityDescription, Permission, PermissionDescription,
};
pub use asset::{Asset, AssetDescription, Memo, MemoDescription};
pub use chain::{ChainId, EmptyExtension, NoExtensions};
pub use ids::{ObjectId, VoteId};
pub use public_key::{PublicKey, PublicKeyDescription};
