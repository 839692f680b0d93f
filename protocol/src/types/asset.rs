use crate::encoding::{composite, Bytes, Uint64};

use super::{ObjectId, PublicKey};

composite! {
    /// An amount of some asset, in the asset's smallest unit.
    pub struct Asset => AssetDescription {
        amount: Uint64,
        asset_id: ObjectId,
    }
}

composite! {
    /// An encrypted transfer memo. The message is already ciphertext; this
    /// crate never decrypts or encrypts it.
    pub struct Memo => MemoDescription {
        sender: PublicKey,
        receiver: PublicKey,
        nonce: Uint64,
        message: Bytes,
    }
}
