use crate::encoding::{composite, Optional};
use crate::types::{Asset, EmptyExtension, Memo, ObjectId};

composite! {
    /// Move an amount of an asset from one account to another, optionally
    /// with an encrypted memo.
    pub struct Transfer => TransferDescription {
        sender: ObjectId,
        receiver: ObjectId,
        amount: Asset,
        memo: Optional<Memo>,
        extensions: EmptyExtension,
    }
}

impl Transfer {
    pub fn fields(&self) -> Vec<String> {
        vec![
            "from:".to_string(),
            self.sender.to_string(),
            "to:".to_string(),
            self.receiver.to_string(),
            "amount:".to_string(),
            self.amount.amount.to_string(),
            "asset:".to_string(),
            self.amount.asset_id.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Encode, Parse, ParseError};
    use crate::types::AssetDescription;

    fn description() -> TransferDescription {
        TransferDescription {
            sender: Some("1.2.100".into()),
            receiver: Some("1.2.101".into()),
            amount: Some(AssetDescription {
                amount: Some(1234567),
                asset_id: Some("1.3.0".into()),
            }),
            memo: None,
            extensions: None,
        }
    }

    #[test]
    fn transfer_without_memo() {
        let transfer = Transfer::parse(Some(&description())).unwrap();
        assert_eq!(
            hex::encode(transfer.to_bytes()),
            "646587d6120000000000000000"
        );
    }

    #[test]
    fn fields_for_confirmation() {
        let transfer = Transfer::parse(Some(&description())).unwrap();
        assert_eq!(
            transfer.fields(),
            vec!["from:", "1.2.100", "to:", "1.2.101", "amount:", "1234567", "asset:", "1.3.0"]
        );
    }

    #[test]
    fn missing_receiver() {
        let mut description = description();
        description.receiver = None;
        let err = Transfer::parse(Some(&description)).unwrap_err();
        assert_eq!(err, ParseError::missing().within("receiver"));
    }
}
