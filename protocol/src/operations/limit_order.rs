use crate::encoding::{composite, Bool, Uint32};
use crate::types::{Asset, EmptyExtension, ObjectId};

composite! {
    /// Offer `amount_to_sell` for at least `min_to_receive` until
    /// `expiration` (unix seconds).
    pub struct LimitOrderCreate => LimitOrderCreateDescription {
        seller: ObjectId,
        amount_to_sell: Asset,
        min_to_receive: Asset,
        expiration: Uint32,
        fill_or_kill: Bool,
        extensions: EmptyExtension,
    }
}

impl LimitOrderCreate {
    /// Units sold per unit received, or `None` if nothing is to be received.
    pub fn price(&self) -> Option<f64> {
        let receive = self.min_to_receive.amount.0;
        if receive == 0 {
            return None;
        }
        Some(self.amount_to_sell.amount.0 as f64 / receive as f64)
    }

    pub fn fields(&self) -> Vec<String> {
        let price = self
            .price()
            .map(|p| format!("{:.5}", p))
            .unwrap_or_else(|| "-".to_string());
        vec![
            "asset to sell:".to_string(),
            self.amount_to_sell.asset_id.to_string(),
            "asset to receive:".to_string(),
            self.min_to_receive.asset_id.to_string(),
            "amount to sell:".to_string(),
            self.amount_to_sell.amount.to_string(),
            "price:".to_string(),
            price,
        ]
    }
}

composite! {
    pub struct LimitOrderCancel => LimitOrderCancelDescription {
        fee_paying_account: ObjectId,
        order: ObjectId,
        extensions: EmptyExtension,
    }
}

impl LimitOrderCancel {
    pub fn fields(&self) -> Vec<String> {
        vec!["order:".to_string(), self.order.to_string()]
    }
}
