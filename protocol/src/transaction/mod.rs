//! # Transaction Module
//!
//! The top of the encoding tree: header, operations, and the chain id that
//! is hashed in front of them.
//!
//! ## Architecture
//!
//! ```text
//! header.rs  TransactionHeader (ref block, expiration)
//! mod.rs     Transaction, SignTx, SignTxRequest
//! layout.rs  confirmation screens built from a parsed SignTx
//! ```
//!
//! ## Digest
//!
//! The signed digest is `sha256(chain_id || tx)`, where `tx` is the
//! canonical serialization of [`Transaction`]. Nothing is buffered: the
//! tree writes straight into a [`HashWriter`].

pub mod header;
pub mod layout;

use serde::{Deserialize, Serialize};

use crate::encoding::{composite, Encode, HashWriter, NonEmptyArray};
use crate::operations::{Operation, OperationKind};
use crate::types::{ChainId, EmptyExtension};

pub use header::{Expiration, ExpirationDescription, TransactionHeader, TransactionHeaderDescription};
pub use layout::{paginate, Screen, ScreenKind};

composite! {
    /// A transaction carries at least one operation.
    pub struct Transaction => TransactionDescription {
        header: TransactionHeader,
        operations: NonEmptyArray<Operation>,
        extensions: EmptyExtension,
    }
}

impl Transaction {
    pub fn operation_kinds(&self) -> impl Iterator<Item = OperationKind> + '_ {
        self.operations.iter().map(Operation::kind)
    }
}

composite! {
    /// What actually gets hashed and signed.
    pub struct SignTx => SignTxDescription {
        chain_id: ChainId,
        tx: Transaction,
    }
}

impl SignTx {
    /// `sha256(chain_id || tx)`.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = HashWriter::new();
        self.write(&mut hasher);
        hasher.finalize()
    }
}

/// A signing request as received from the host: the key path plus the
/// transaction description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignTxRequest {
    #[serde(default)]
    pub address_n: Vec<u32>,
    #[serde(flatten)]
    pub sign_tx: SignTxDescription,
}

impl SignTxRequest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
