//! Object and vote identifiers.

use std::fmt;

use crate::encoding::{write_varint, Encode, Parse, ParseError, Sink};

/// A chain object id such as `1.2.15` (`space.type.instance`).
///
/// Only the instance is serialized; the space and type are implied by the
/// field the id appears in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectId {
    space: u64,
    kind: u64,
    instance: u64,
    readable: String,
}

impl ObjectId {
    pub fn space(&self) -> u64 {
        self.space
    }

    pub fn kind(&self) -> u64 {
        self.kind
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }
}

impl std::str::FromStr for ObjectId {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, ParseError> {
        let bad = || ParseError::invalid(format!("object id '{}' is not space.type.instance", text));
        let parts: Vec<&str> = text.split('.').collect();
        let [space, kind, instance] = parts.as_slice() else {
            return Err(bad());
        };
        let number = |part: &str| part.parse::<u64>().map_err(|_| bad());
        Ok(ObjectId {
            space: number(*space)?,
            kind: number(*kind)?,
            instance: number(*instance)?,
            readable: text.to_string(),
        })
    }
}

impl Parse for ObjectId {
    type Description = String;

    fn parse(description: Option<&String>) -> Result<Self, ParseError> {
        description.ok_or_else(ParseError::missing)?.parse()
    }
}

impl Encode for ObjectId {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        write_varint(sink, self.instance);
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable)
    }
}

/// Largest vote instance that fits in the 24 bits above the type byte.
const VOTE_INSTANCE_LIMIT: u32 = 1 << 24;

/// A vote id `type:instance`, packed as `(type & 0xff) | instance << 8`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VoteId {
    packed: u32,
    readable: String,
}

impl VoteId {
    pub fn vote_type(&self) -> u8 {
        (self.packed & 0xff) as u8
    }

    pub fn instance(&self) -> u32 {
        self.packed >> 8
    }

    pub fn packed(&self) -> u32 {
        self.packed
    }
}

impl std::str::FromStr for VoteId {
    type Err = ParseError;

    fn from_str(text: &str) -> Result<Self, ParseError> {
        let bad = |why: &str| ParseError::invalid(format!("vote id '{}': {}", text, why));
        let (vote_type, instance) = text.split_once(':').ok_or_else(|| bad("expected type:instance"))?;
        let vote_type: u32 = vote_type.parse().map_err(|_| bad("type must be a number"))?;
        let instance: u32 = instance
            .parse()
            .ok()
            .filter(|i| *i < VOTE_INSTANCE_LIMIT)
            .ok_or_else(|| bad("instance must be a number below 2^24"))?;
        Ok(VoteId {
            packed: (vote_type & 0xff) | instance << 8,
            readable: text.to_string(),
        })
    }
}

impl Parse for VoteId {
    type Description = String;

    fn parse(description: Option<&String>) -> Result<Self, ParseError> {
        description.ok_or_else(ParseError::missing)?.parse()
    }
}

impl Encode for VoteId {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put(&self.packed.to_le_bytes());
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.readable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(text: &str) -> Result<ObjectId, ParseError> {
        ObjectId::parse(Some(&text.to_string()))
    }

    fn vote(text: &str) -> Result<VoteId, ParseError> {
        VoteId::parse(Some(&text.to_string()))
    }

    #[test]
    fn object_id_writes_instance_varint() {
        let id = object("1.2.96086").unwrap();
        assert_eq!(id.instance(), 96086);
        assert_eq!(id.space(), 1);
        assert_eq!(id.kind(), 2);
        assert_eq!(id.to_bytes(), vec![0xd6, 0xee, 0x05]);
        assert_eq!(id.to_string(), "1.2.96086");
    }

    #[test]
    fn object_id_shape_is_checked() {
        for bad in ["1.2", "1.2.3.4", "1.2.x", "", "a.b.c", "1..3"] {
            assert!(
                matches!(object(bad), Err(ParseError::InvalidValue { .. })),
                "{bad} should be rejected"
            );
        }
        assert_eq!(ObjectId::parse(None), Err(ParseError::missing()));
    }

    #[test]
    fn vote_id_packs_type_and_instance() {
        let id = vote("1:0").unwrap();
        assert_eq!(id.to_bytes(), vec![1, 0, 0, 0]);

        let id = vote("0:16").unwrap();
        assert_eq!(id.packed(), 16 << 8);
        assert_eq!(id.vote_type(), 0);
        assert_eq!(id.instance(), 16);
        assert_eq!(id.to_string(), "0:16");
    }

    #[test]
    fn vote_type_keeps_low_byte() {
        let id = vote("257:3").unwrap();
        assert_eq!(id.vote_type(), 1);
        assert_eq!(id.instance(), 3);
        assert_eq!(id.to_bytes(), vec![1, 3, 0, 0]);
        assert_eq!(id.to_string(), "257:3");

        assert_eq!(vote("256:0").unwrap().packed(), 0);
    }

    #[test]
    fn vote_id_bounds() {
        assert!(vote("255:16777215").is_ok());
        assert!(vote("1:16777216").is_err());
        assert!(vote("1-0").is_err());
        assert!(vote("-1:0").is_err());
        assert!(vote("x:1").is_err());
    }
}
