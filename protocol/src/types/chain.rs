//! Chain identifier and the empty extension marker.

use serde::de::IgnoredAny;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::config::{self, CHAIN_ID_LENGTH};
use crate::encoding::{Encode, Parse, ParseError, Sink};

/// The 32-byte chain id, hashed in front of every transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId([u8; CHAIN_ID_LENGTH]);

impl ChainId {
    pub fn as_bytes(&self) -> &[u8; CHAIN_ID_LENGTH] {
        &self.0
    }

    /// `mainnet`, `testnet` or a shortened id for anything else.
    pub fn network_name(&self) -> String {
        config::network_name(&self.to_string())
    }
}

impl Parse for ChainId {
    type Description = String;

    fn parse(description: Option<&String>) -> Result<Self, ParseError> {
        let text = description.ok_or_else(ParseError::missing)?;
        let bytes =
            hex::decode(text).map_err(|e| ParseError::invalid(format!("chain id: {}", e)))?;
        let array: [u8; CHAIN_ID_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
            ParseError::invalid(format!(
                "chain id must be {} bytes, got {}",
                CHAIN_ID_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(ChainId(array))
    }
}

impl Encode for ChainId {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put(&self.0);
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

/// Whatever the host sent as `extensions`. The content is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoExtensions;

impl<'de> Deserialize<'de> for NoExtensions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoExtensions)
    }
}

impl Serialize for NoExtensions {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_seq(Some(0))?.end()
    }
}

/// An extension list that is always empty on the wire: one zero byte.
///
/// Never fails to parse, even when absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyExtension;

impl Parse for EmptyExtension {
    type Description = NoExtensions;

    fn parse(_description: Option<&NoExtensions>) -> Result<Self, ParseError> {
        Ok(EmptyExtension)
    }
}

impl Encode for EmptyExtension {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put_u8(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CHAIN_ID_MAINNET;

    #[test]
    fn chain_id_written_verbatim() {
        let id = ChainId::parse(Some(&CHAIN_ID_MAINNET.to_string())).unwrap();
        assert_eq!(hex::encode(id.to_bytes()), CHAIN_ID_MAINNET);
        assert_eq!(id.to_string(), CHAIN_ID_MAINNET);
        assert_eq!(id.network_name(), "mainnet");
    }

    #[test]
    fn chain_id_length_is_checked() {
        let short = ChainId::parse(Some(&"4018d784".to_string())).unwrap_err();
        assert!(matches!(short, ParseError::InvalidValue { .. }));
        let not_hex = ChainId::parse(Some(&"zz".repeat(32))).unwrap_err();
        assert!(matches!(not_hex, ParseError::InvalidValue { .. }));
        assert_eq!(ChainId::parse(None), Err(ParseError::missing()));
    }

    #[test]
    fn empty_extension_is_one_zero_byte() {
        assert_eq!(EmptyExtension::parse(None).unwrap().to_bytes(), vec![0]);
    }

    #[test]
    fn extensions_accept_any_json() {
        for json in ["[]", "[1, 2]", "{}", "null", "\"x\""] {
            let parsed: NoExtensions = serde_json::from_str(json).unwrap();
            assert_eq!(parsed, NoExtensions);
        }
        assert_eq!(serde_json::to_string(&NoExtensions).unwrap(), "[]");
    }
}
