//! Account authorities and options.
//!
//! A [`Permission`] is a weighted threshold over three kinds of authority:
//! other accounts, public keys and legacy addresses. The network requires
//! key authorities in ascending order of key address, so `key_auths` is a
//! [`SortedArray`] and callers may send them in any order.

use crate::encoding::{composite, Array, Bytes, SortKey, SortedArray, Uint16, Uint32};

use super::{EmptyExtension, ObjectId, PublicKey, VoteId};

composite! {
    pub struct AccountAuthority => AccountAuthorityDescription {
        account: ObjectId,
        weight: Uint16,
    }
}

composite! {
    pub struct KeyAuthority => KeyAuthorityDescription {
        key: PublicKey,
        weight: Uint16,
    }
}

composite! {
    pub struct AddressAuthority => AddressAuthorityDescription {
        address: Bytes,
        weight: Uint16,
    }
}

/// Orders key authorities by the address of their key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByKeyAddress;

impl SortKey<KeyAuthority> for ByKeyAddress {
    type Key = PublicKey;

    fn key(item: &KeyAuthority) -> PublicKey {
        item.key.clone()
    }
}

composite! {
    pub struct Permission => PermissionDescription {
        weight_threshold: Uint32,
        account_auths: Array<AccountAuthority>,
        key_auths: SortedArray<KeyAuthority, ByKeyAddress>,
        address_auths: Array<AddressAuthority>,
    }
}

impl Permission {
    /// Label/value pairs for the confirmation screen, e.g.
    /// `["owner key 1", "BTS6pb…"]`, flattened into one list.
    pub fn listing(&self, role: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for (idx, auth) in self.account_auths.iter().enumerate() {
            lines.push(format!("{} account {}", role, idx + 1));
            lines.push(auth.account.to_string());
        }
        for (idx, auth) in self.key_auths.iter().enumerate() {
            lines.push(format!("{} key {}", role, idx + 1));
            lines.push(auth.key.to_string());
        }
        for (idx, auth) in self.address_auths.iter().enumerate() {
            lines.push(format!("{} address {}", role, idx + 1));
            lines.push(auth.address.to_string());
        }
        lines
    }
}

composite! {
    pub struct AccountOptions => AccountOptionsDescription {
        memo_key: PublicKey,
        voting_account: ObjectId,
        num_witness: Uint16,
        num_committee: Uint16,
        votes: Array<VoteId>,
        extensions: EmptyExtension,
    }
}
