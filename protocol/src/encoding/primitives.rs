//! # Primitive Encoders
//!
//! Leaf values of the encoding tree. Every leaf rejects an absent
//! description with [`ParseError::MissingField`]; the enclosing composite
//! adds the field name.
//!
//! | Type     | Description | Wire form                                 |
//! |----------|-------------|-------------------------------------------|
//! | `Uint8`  | `u8`        | 1 byte                                    |
//! | `Uint16` | `u16`       | 2 bytes little-endian                     |
//! | `Uint32` | `u32`       | 4 bytes little-endian                     |
//! | `Uint64` | `u64`       | 8 bytes little-endian                     |
//! | `Bool`   | `bool`      | 1 byte, 0 or 1                            |
//! | `VarInt` | `u64`       | base-128 groups, low first, high bit = more |
//! | `Bytes`  | hex string  | varint length, raw bytes                  |
//! | `Text`   | string      | varint length, transcoded UTF-8 bytes     |

use std::fmt;

use super::{Encode, Parse, ParseError, Sink};

/// Append `value` as a base-128 varint.
pub fn write_varint<W: Sink + ?Sized>(sink: &mut W, mut value: u64) {
    while value >= 0x80 {
        sink.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    sink.put_u8(value as u8);
}

/// Apply the network's text escaping for control characters.
///
/// Code points 0-7, 11 and 14-31 become the literal text `u%04x`, backspace
/// becomes `b` and form feed becomes `f`. Tab, newline and carriage return
/// are kept. Everything else passes through unchanged.
pub fn unicodify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c as u32 {
            8 => out.push('b'),
            12 => out.push('f'),
            9 | 10 | 13 => out.push(c),
            o @ (0..=7 | 11 | 14..=31) => out.push_str(&format!("u{:04x}", o)),
            _ => out.push(c),
        }
    }
    out
}

macro_rules! fixed_width {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub $inner);

        impl Parse for $name {
            type Description = $inner;

            fn parse(description: Option<&$inner>) -> Result<Self, ParseError> {
                description.copied().map($name).ok_or_else(ParseError::missing)
            }
        }

        impl Encode for $name {
            fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
                sink.put(&self.0.to_le_bytes());
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

fixed_width!(Uint8, u8);
fixed_width!(Uint16, u16);
fixed_width!(Uint32, u32);
fixed_width!(
    /// Amounts, nonces and other 64-bit quantities.
    Uint64,
    u64
);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bool(pub bool);

impl Parse for Bool {
    type Description = bool;

    fn parse(description: Option<&bool>) -> Result<Self, ParseError> {
        description.copied().map(Bool).ok_or_else(ParseError::missing)
    }
}

impl Encode for Bool {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        sink.put_u8(u8::from(self.0));
    }
}

/// Variable-length unsigned integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarInt(pub u64);

impl Parse for VarInt {
    type Description = u64;

    fn parse(description: Option<&u64>) -> Result<Self, ParseError> {
        description.copied().map(VarInt).ok_or_else(ParseError::missing)
    }
}

impl Encode for VarInt {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        write_varint(sink, self.0);
    }
}

/// Opaque bytes, given as hex text in the description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bytes(pub Vec<u8>);

impl Parse for Bytes {
    type Description = String;

    fn parse(description: Option<&String>) -> Result<Self, ParseError> {
        let text = description.ok_or_else(ParseError::missing)?;
        hex::decode(text)
            .map(Bytes)
            .map_err(|e| ParseError::invalid(format!("not valid hex: {}", e)))
    }
}

impl Encode for Bytes {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        write_varint(sink, self.0.len() as u64);
        sink.put(&self.0);
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Human-readable text such as account names.
///
/// The length prefix counts the bytes of the escaped form, which is what
/// ends up on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text(pub String);

impl Parse for Text {
    type Description = String;

    fn parse(description: Option<&String>) -> Result<Self, ParseError> {
        description.cloned().map(Text).ok_or_else(ParseError::missing)
    }
}

impl Encode for Text {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        let escaped = unicodify(&self.0);
        write_varint(sink, escaped.len() as u64);
        sink.put(escaped.as_bytes());
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
