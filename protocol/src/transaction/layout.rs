//! Confirmation screens.
//!
//! This module only decides *what* the user is asked to confirm: headers
//! and lines, split into pages. Drawing them is the confirmer's job.

use serde::Serialize;

use super::SignTx;
use crate::config::{PUBLIC_KEY_HEADER, SUMMARY_HEADER, SUMMARY_PER_PAGE};
use crate::operations::Operation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenKind {
    /// Overview of every operation in the transaction.
    Summary,
    /// Details of one operation.
    Operation,
    /// A public key to compare against another device.
    PublicKey,
}

/// One confirmation prompt: a header and one or more pages of lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Screen {
    pub kind: ScreenKind,
    pub header: String,
    pub pages: Vec<Vec<String>>,
    /// Confirming this screen completes the request.
    pub final_step: bool,
}

impl Screen {
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flatten().map(String::as_str)
    }
}

/// Split `fields` into pages of at most `per_page` lines.
pub fn paginate(kind: ScreenKind, header: &str, fields: &[String], per_page: usize) -> Screen {
    Screen {
        kind,
        header: header.to_string(),
        pages: fields.chunks(per_page.max(1)).map(<[String]>::to_vec).collect(),
        final_step: false,
    }
}

/// "You are about to sign:" followed by each operation name.
pub fn summary_screen(sign_tx: &SignTx) -> Screen {
    let mut fields = vec!["You are about to sign:".to_string()];
    fields.extend(sign_tx.tx.operation_kinds().map(|kind| kind.display_name()));
    paginate(ScreenKind::Summary, SUMMARY_HEADER, &fields, SUMMARY_PER_PAGE)
}

pub fn operation_screen(operation: &Operation) -> Screen {
    let kind = operation.kind();
    paginate(
        ScreenKind::Operation,
        &kind.display_name(),
        &operation.fields(),
        kind.per_page(),
    )
}

/// The summary, then one screen per operation. The last screen completes
/// the request.
pub fn sign_tx_screens(sign_tx: &SignTx) -> Vec<Screen> {
    let mut screens = vec![summary_screen(sign_tx)];
    screens.extend(sign_tx.tx.operations.iter().map(operation_screen));
    if let Some(last) = screens.last_mut() {
        last.final_step = true;
    }
    screens
}

pub fn public_key_screen(public_key: &str) -> Screen {
    let mut screen = paginate(
        ScreenKind::PublicKey,
        PUBLIC_KEY_HEADER,
        &[public_key.to_string()],
        1,
    );
    screen.final_step = true;
    screen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Parse;
    use crate::transaction::SignTxRequest;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sign_tx(operations: &str) -> SignTx {
        let json = format!(
            r#"{{
                "chain_id": "4018d7844c78f6a6c41c6a552b898022310fc5dec06da467ee7905a8dad512c8",
                "tx": {{
                    "header": {{ "ref_block_num": 1, "ref_block_prefix": 2, "expiration": 3 }},
                    "operations": [{}]
                }}
            }}"#,
            operations
        );
        let request = SignTxRequest::from_json(&json).unwrap();
        SignTx::parse(Some(&request.sign_tx)).unwrap()
    }

    const CANCEL: &str = r#"{
        "operation_name": "limit_order_cancel",
        "fee": { "amount": 0, "asset_id": "1.3.0" },
        "limit_order_cancel": { "fee_paying_account": "1.2.104", "order": "1.7.51840" }
    }"#;

    const TRANSFER: &str = r#"{
        "operation_name": "transfer",
        "fee": { "amount": 1, "asset_id": "1.3.0" },
        "transfer": {
            "sender": "1.2.100",
            "receiver": "1.2.101",
            "amount": { "amount": 5, "asset_id": "1.3.121" }
        }
    }"#;

    #[test]
    fn paginate_chunks_fields() {
        let screen = paginate(
            ScreenKind::Operation,
            "h",
            &strings(&["a", "b", "c", "d", "e"]),
            2,
        );
        assert_eq!(screen.pages.len(), 3);
        assert_eq!(screen.pages[2], strings(&["e"]));
        assert_eq!(screen.lines().count(), 5);
    }

    #[test]
    fn summary_lists_operation_names() {
        let tx = sign_tx(&format!("{},{}", TRANSFER, CANCEL));
        let screen = summary_screen(&tx);
        assert_eq!(screen.header, "Sign transaction");
        assert_eq!(
            screen.pages,
            vec![strings(&[
                "You are about to sign:",
                "transfer",
                "limit order cancel"
            ])]
        );
    }

    #[test]
    fn summary_pages_hold_five_lines() {
        let many = vec![CANCEL; 6].join(",");
        let screen = summary_screen(&sign_tx(&many));
        assert_eq!(screen.pages.len(), 2);
        assert_eq!(screen.pages[0].len(), 5);
        assert_eq!(screen.pages[1].len(), 2);
    }

    #[test]
    fn transfer_screen_uses_four_lines_per_page() {
        let tx = sign_tx(TRANSFER);
        let screen = operation_screen(&tx.tx.operations.0[0]);
        assert_eq!(screen.header, "transfer");
        assert_eq!(
            screen.pages,
            vec![
                strings(&["from:", "1.2.100", "to:", "1.2.101"]),
                strings(&["amount:", "5", "asset:", "1.3.121"]),
            ]
        );
    }

    #[test]
    fn only_last_screen_is_final() {
        let tx = sign_tx(&format!("{},{}", TRANSFER, CANCEL));
        let screens = sign_tx_screens(&tx);
        assert_eq!(screens.len(), 3);
        assert_eq!(screens[0].kind, ScreenKind::Summary);
        assert_eq!(screens[2].header, "limit order cancel");
        let finals: Vec<bool> = screens.iter().map(|s| s.final_step).collect();
        assert_eq!(finals, vec![false, false, true]);
    }

    #[test]
    fn public_key_screen_shows_key() {
        let screen = public_key_screen("BTS7TP8oMkfCuzQWGTfYvBvkQ2nqYj69yRxsg4RQxtsthtTKZHnXT");
        assert_eq!(screen.header, "Confirm public key");
        assert_eq!(screen.kind, ScreenKind::PublicKey);
        assert!(screen.final_step);
        assert_eq!(screen.pages.len(), 1);
    }
}
