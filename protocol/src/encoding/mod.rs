//! # Canonical Encoding
//!
//! BitShares signs a fixed binary serialization of each transaction. This
//! module holds the machinery that turns an untrusted, possibly incomplete
//! description into that serialization.
//!
//! ## Two phases
//!
//! 1. **Parse**: a description (every field optional, straight from the
//!    host) is validated into a tree of concrete nodes. All checking happens
//!    here: missing fields, malformed ids, bad keys.
//! 2. **Write**: a parsed tree emits its bytes into a [`Sink`] in declared
//!    field order. Writing cannot fail.
//!
//! Parsing consumes a `&Description` and yields a different type, so an
//! already-parsed node cannot be parsed twice and an unparsed description
//! cannot be written.
//!
//! ## Building blocks
//!
//! ```text
//! sink.rs        Sink trait, Vec<u8> and HashWriter (streaming SHA-256)
//! primitives.rs  Uint8..Uint64, Bool, VarInt, Bytes, Text
//! wrappers.rs    Optional, Array, SortedArray
//! reader.rs      Reader for decoding primitives back
//! error.rs       ParseError and FieldPath
//! ```
//!
//! Composites are declared with the crate-internal `composite!` macro,
//! which generates the description struct, the parsed struct and both
//! traits from a single field list.

pub mod error;
pub mod primitives;
pub mod reader;
pub mod sink;
pub mod wrappers;

pub use error::{FieldPath, ParseError};
pub use primitives::{unicodify, write_varint, Bool, Bytes, Text, Uint16, Uint32, Uint64, Uint8, VarInt};
pub use reader::{ReadError, Reader};
pub use sink::{HashWriter, Sink};
pub use wrappers::{Array, NonEmptyArray, Optional, SortKey, SortedArray};

/// Validation from an untrusted description into an encodable node.
pub trait Parse: Sized {
    /// The host-facing form of this node.
    type Description;

    /// `None` means the field was absent from the enclosing description.
    fn parse(description: Option<&Self::Description>) -> Result<Self, ParseError>;
}

/// Canonical serialization of a parsed node.
pub trait Encode {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W);

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write(&mut out);
        out
    }
}

/// Declare a composite node.
///
/// ```ignore
/// composite! {
///     pub struct Asset => AssetDescription {
///         amount: Uint64,
///         asset_id: ObjectId,
///     }
/// }
/// ```
///
/// Fields are parsed and written in the order listed. A failing field has
/// its name prepended to the error path.
macro_rules! composite {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident => $desc:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        #[doc = concat!("Host-facing description of [`", stringify!($name), "`].")]
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        $vis struct $desc {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                pub $field: Option<<$ty as $crate::encoding::Parse>::Description>,
            )*
        }

        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $( $(#[$fmeta])* pub $field: $ty, )*
        }

        impl $crate::encoding::Parse for $name {
            type Description = $desc;

            fn parse(
                description: Option<&$desc>,
            ) -> Result<Self, $crate::encoding::ParseError> {
                let description =
                    description.ok_or_else($crate::encoding::ParseError::missing)?;
                Ok($name {
                    $(
                        $field: <$ty as $crate::encoding::Parse>::parse(
                            description.$field.as_ref(),
                        )
                        .map_err(|e| e.within(stringify!($field)))?,
                    )*
                })
            }
        }

        impl $crate::encoding::Encode for $name {
            fn write<W: $crate::encoding::Sink + ?Sized>(&self, sink: &mut W) {
                $( $crate::encoding::Encode::write(&self.$field, sink); )*
            }
        }
    };
}

pub(crate) use composite;
