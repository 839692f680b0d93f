//! Transaction header: TaPoS reference and expiration.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::encoding::{composite, Encode, Parse, ParseError, Sink, Uint16, Uint32};

/// Expiration as the host may send it: unix seconds, or a UTC timestamp
/// such as `2020-01-29T13:02:02`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpirationDescription {
    Seconds(u32),
    Timestamp(String),
}

impl From<u32> for ExpirationDescription {
    fn from(seconds: u32) -> Self {
        ExpirationDescription::Seconds(seconds)
    }
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Expiration in unix seconds, written as a 32-bit little-endian integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Expiration(pub u32);

impl Expiration {
    fn from_timestamp(text: &str) -> Result<Self, ParseError> {
        let trimmed = text.strip_suffix('Z').unwrap_or(text);
        let naive = NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
            .map_err(|e| ParseError::invalid(format!("expiration '{}': {}", text, e)))?;
        u32::try_from(naive.and_utc().timestamp())
            .map(Expiration)
            .map_err(|_| ParseError::invalid(format!("expiration '{}' out of range", text)))
    }
}

impl Parse for Expiration {
    type Description = ExpirationDescription;

    fn parse(description: Option<&ExpirationDescription>) -> Result<Self, ParseError> {
        match description.ok_or_else(ParseError::missing)? {
            ExpirationDescription::Seconds(seconds) => Ok(Expiration(*seconds)),
            ExpirationDescription::Timestamp(text) => Self::from_timestamp(text),
        }
    }
}

impl Encode for Expiration {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put(&self.0.to_le_bytes());
    }
}

impl fmt::Display for Expiration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

composite! {
    /// `ref_block_num` and `ref_block_prefix` pin the transaction to a
    /// recent block so it cannot be replayed on a fork.
    pub struct TransactionHeader => TransactionHeaderDescription {
        ref_block_num: Uint16,
        ref_block_prefix: Uint32,
        expiration: Expiration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(expiration: ExpirationDescription) -> Result<TransactionHeader, ParseError> {
        TransactionHeader::parse(Some(&TransactionHeaderDescription {
            ref_block_num: Some(64476),
            ref_block_prefix: Some(1034601640),
            expiration: Some(expiration),
        }))
    }

    #[test]
    fn header_layout() {
        let parsed = header(ExpirationDescription::Seconds(1580302522)).unwrap();
        assert_eq!(hex::encode(parsed.to_bytes()), "dcfba8c4aa3dba80315e");
    }

    #[test]
    fn timestamp_expiration_matches_seconds() {
        let from_text = header(ExpirationDescription::Timestamp("2020-01-29T12:55:22".into())).unwrap();
        assert_eq!(from_text.expiration, Expiration(1580302522));

        let with_zone = header(ExpirationDescription::Timestamp("2020-01-29T12:55:22Z".into())).unwrap();
        assert_eq!(with_zone.expiration, Expiration(1580302522));
    }

    #[test]
    fn bad_timestamp_is_invalid() {
        let err = header(ExpirationDescription::Timestamp("tomorrow".into())).unwrap_err();
        assert!(matches!(err, ParseError::InvalidValue { .. }));
        assert_eq!(err.path().segments(), &["expiration"]);

        let too_late = header(ExpirationDescription::Timestamp("2150-01-01T00:00:00".into()));
        assert!(too_late.is_err());
    }

    #[test]
    fn expiration_deserializes_from_number_or_string() {
        let seconds: ExpirationDescription = serde_json::from_str("1580302522").unwrap();
        assert_eq!(seconds, ExpirationDescription::Seconds(1580302522));
        let text: ExpirationDescription = serde_json::from_str("\"2020-01-29T12:55:22\"").unwrap();
        assert_eq!(text, ExpirationDescription::Timestamp("2020-01-29T12:55:22".into()));
    }
}
