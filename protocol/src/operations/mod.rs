//! # Operations
//!
//! A transaction carries a list of operations. Each one is written as its
//! numeric id, the fee, then the payload for that operation type.
//!
//! The set of supported operations is closed. The host names the operation
//! in `operation_name` and fills the field of the same name; any other name
//! is rejected as unsupported instead of being skipped, because silently
//! dropping an operation would change what gets signed.
//!
//! | Name                 | Id | Payload              | Lines per page |
//! |----------------------|----|----------------------|----------------|
//! | `transfer`           | 0  | [`Transfer`]         | 4              |
//! | `limit_order_create` | 1  | [`LimitOrderCreate`] | 4              |
//! | `limit_order_cancel` | 2  | [`LimitOrderCancel`] | 2              |
//! | `account_create`     | 5  | [`AccountCreate`]    | 2              |
//! | `account_update`     | 6  | [`AccountUpdate`]    | 2              |

pub mod account;
pub mod limit_order;
pub mod transfer;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding::{Encode, Parse, ParseError, Sink};
use crate::types::{Asset, AssetDescription};

pub use account::{AccountCreate, AccountCreateDescription, AccountUpdate, AccountUpdateDescription};
pub use limit_order::{
    LimitOrderCancel, LimitOrderCancelDescription, LimitOrderCreate, LimitOrderCreateDescription,
};
pub use transfer::{Transfer, TransferDescription};

/// Every operation this crate can sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Transfer,
    LimitOrderCreate,
    LimitOrderCancel,
    AccountCreate,
    AccountUpdate,
}

/// Name, wire id and confirmation page size for each operation.
const REGISTRY: [(OperationKind, &str, u8, usize); 5] = [
    (OperationKind::Transfer, "transfer", 0, 4),
    (OperationKind::LimitOrderCreate, "limit_order_create", 1, 4),
    (OperationKind::LimitOrderCancel, "limit_order_cancel", 2, 2),
    (OperationKind::AccountCreate, "account_create", 5, 2),
    (OperationKind::AccountUpdate, "account_update", 6, 2),
];

impl OperationKind {
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(_, n, _, _)| *n == name)
            .map(|(kind, _, _, _)| *kind)
    }

    pub fn all() -> impl Iterator<Item = OperationKind> {
        REGISTRY.iter().map(|(kind, _, _, _)| *kind)
    }

    fn entry(self) -> &'static (OperationKind, &'static str, u8, usize) {
        // Every variant has exactly one registry row.
        match self {
            OperationKind::Transfer => &REGISTRY[0],
            OperationKind::LimitOrderCreate => &REGISTRY[1],
            OperationKind::LimitOrderCancel => &REGISTRY[2],
            OperationKind::AccountCreate => &REGISTRY[3],
            OperationKind::AccountUpdate => &REGISTRY[4],
        }
    }

    pub fn name(self) -> &'static str {
        self.entry().1
    }

    pub fn id(self) -> u8 {
        self.entry().2
    }

    /// Lines per confirmation page for this operation's screen.
    pub fn per_page(self) -> usize {
        self.entry().3
    }

    /// The name with underscores replaced, for screen headers.
    pub fn display_name(self) -> String {
        self.name().replace('_', " ")
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host-facing operation. Only the payload named by `operation_name` is
/// looked at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<AssetDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<TransferDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_order_create: Option<LimitOrderCreateDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_order_cancel: Option<LimitOrderCancelDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_create: Option<AccountCreateDescription>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_update: Option<AccountUpdateDescription>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationPayload {
    Transfer(Transfer),
    LimitOrderCreate(LimitOrderCreate),
    LimitOrderCancel(LimitOrderCancel),
    AccountCreate(AccountCreate),
    AccountUpdate(AccountUpdate),
}

impl OperationPayload {
    fn parse(kind: OperationKind, description: &OperationDescription) -> Result<Self, ParseError> {
        Ok(match kind {
            OperationKind::Transfer => {
                OperationPayload::Transfer(Transfer::parse(description.transfer.as_ref())?)
            }
            OperationKind::LimitOrderCreate => OperationPayload::LimitOrderCreate(
                LimitOrderCreate::parse(description.limit_order_create.as_ref())?,
            ),
            OperationKind::LimitOrderCancel => OperationPayload::LimitOrderCancel(
                LimitOrderCancel::parse(description.limit_order_cancel.as_ref())?,
            ),
            OperationKind::AccountCreate => OperationPayload::AccountCreate(
                AccountCreate::parse(description.account_create.as_ref())?,
            ),
            OperationKind::AccountUpdate => OperationPayload::AccountUpdate(
                AccountUpdate::parse(description.account_update.as_ref())?,
            ),
        })
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            OperationPayload::Transfer(_) => OperationKind::Transfer,
            OperationPayload::LimitOrderCreate(_) => OperationKind::LimitOrderCreate,
            OperationPayload::LimitOrderCancel(_) => OperationKind::LimitOrderCancel,
            OperationPayload::AccountCreate(_) => OperationKind::AccountCreate,
            OperationPayload::AccountUpdate(_) => OperationKind::AccountUpdate,
        }
    }

    /// Label/value lines shown when confirming this operation.
    pub fn fields(&self) -> Vec<String> {
        match self {
            OperationPayload::Transfer(op) => op.fields(),
            OperationPayload::LimitOrderCreate(op) => op.fields(),
            OperationPayload::LimitOrderCancel(op) => op.fields(),
            OperationPayload::AccountCreate(op) => op.fields(),
            OperationPayload::AccountUpdate(op) => op.fields(),
        }
    }
}

impl Encode for OperationPayload {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        match self {
            OperationPayload::Transfer(op) => op.write(sink),
            OperationPayload::LimitOrderCreate(op) => op.write(sink),
            OperationPayload::LimitOrderCancel(op) => op.write(sink),
            OperationPayload::AccountCreate(op) => op.write(sink),
            OperationPayload::AccountUpdate(op) => op.write(sink),
        }
    }
}

/// A parsed operation: fee plus exactly one payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub fee: Asset,
    pub payload: OperationPayload,
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        self.payload.kind()
    }

    pub fn fields(&self) -> Vec<String> {
        self.payload.fields()
    }
}

impl Parse for Operation {
    type Description = OperationDescription;

    fn parse(description: Option<&OperationDescription>) -> Result<Self, ParseError> {
        let description = description.ok_or_else(ParseError::missing)?;
        let name = description
            .operation_name
            .as_deref()
            .ok_or_else(|| ParseError::missing().within("operation_name"))?;
        let kind = OperationKind::from_name(name).ok_or_else(|| ParseError::unsupported(name))?;

        let fee = Asset::parse(description.fee.as_ref()).map_err(|e| e.within("fee"))?;
        let payload =
            OperationPayload::parse(kind, description).map_err(|e| e.within(kind.name()))?;
        Ok(Operation { fee, payload })
    }
}

impl Encode for Operation {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put_u8(self.kind().id());
        self.fee.write(sink);
        self.payload.write(sink);
    }
}
