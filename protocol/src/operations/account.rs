use crate::encoding::{composite, Optional, Text, Uint16};
use crate::types::{AccountOptions, EmptyExtension, ObjectId, Permission};

composite! {
    /// Register a new account. `referrer_percent` is in hundredths of a
    /// percent.
    pub struct AccountCreate => AccountCreateDescription {
        registrar: ObjectId,
        referrer: ObjectId,
        referrer_percent: Uint16,
        name: Text,
        owner: Permission,
        active: Permission,
        options: AccountOptions,
        extensions: EmptyExtension,
    }
}

impl AccountCreate {
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec!["name".to_string(), self.name.to_string()];
        fields.extend(self.owner.listing("owner"));
        fields.extend(self.active.listing("active"));
        fields
    }
}

composite! {
    /// Replace any of an account's owner authority, active authority or
    /// options. Absent parts are left unchanged on chain.
    pub struct AccountUpdate => AccountUpdateDescription {
        account: ObjectId,
        owner: Optional<Permission>,
        active: Optional<Permission>,
        new_options: Optional<AccountOptions>,
        extensions: EmptyExtension,
    }
}

impl AccountUpdate {
    pub fn fields(&self) -> Vec<String> {
        let mut fields = vec!["account".to_string(), self.account.to_string()];
        if let Some(owner) = self.owner.as_ref() {
            fields.extend(owner.listing("owner"));
        }
        if let Some(active) = self.active.as_ref() {
            fields.extend(active.listing("active"));
        }
        fields
    }
}
