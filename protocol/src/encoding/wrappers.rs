//! Wrappers that change how a child node is parsed and written.
//!
//! - [`Optional`]: absent is valid; written as a presence byte.
//! - [`Array`]: varint element count, then each element.
//! - [`NonEmptyArray`]: like `Array`, but absent or empty is rejected.
//! - [`SortedArray`]: like `Array`, but elements are put in canonical order
//!   at parse time so writing never has to sort.

use std::cmp::Ordering;
use std::marker::PhantomData;

use super::primitives::write_varint;
use super::{Encode, Parse, ParseError, Sink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optional<T>(pub Option<T>);

impl<T> Optional<T> {
    pub fn as_ref(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn is_some(&self) -> bool {
        self.0.is_some()
    }
}

impl<T: Parse> Parse for Optional<T> {
    type Description = T::Description;

    fn parse(description: Option<&T::Description>) -> Result<Self, ParseError> {
        match description {
            None => Ok(Optional(None)),
            Some(inner) => T::parse(Some(inner)).map(|node| Optional(Some(node))),
        }
    }
}

impl<T: Encode> Encode for Optional<T> {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        match &self.0 {
            None => sink.put_u8(0),
            Some(node) => {
                sink.put_u8(1);
                node.write(sink);
            }
        }
    }
}

/// A homogeneous sequence. An absent array parses as empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Array<T>(pub Vec<T>);

impl<T> Array<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_elements<T: Parse>(description: Option<&Vec<T::Description>>) -> Result<Vec<T>, ParseError> {
    description
        .map(|items| items.iter().map(|item| T::parse(Some(item))).collect())
        .unwrap_or_else(|| Ok(Vec::new()))
}

fn write_elements<T: Encode, W: Sink + ?Sized>(items: &[T], sink: &mut W) {
    write_varint(sink, items.len() as u64);
    for item in items {
        item.write(sink);
    }
}

impl<T: Parse> Parse for Array<T> {
    type Description = Vec<T::Description>;

    fn parse(description: Option<&Self::Description>) -> Result<Self, ParseError> {
        parse_elements(description).map(Array)
    }
}

impl<T: Encode> Encode for Array<T> {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        write_elements(&self.0, sink);
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A sequence that must hold at least one element. Written like [`Array`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyArray<T>(pub Vec<T>);

impl<T> NonEmptyArray<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&T> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.0.last()
    }
}

impl<T: Parse> Parse for NonEmptyArray<T> {
    type Description = Vec<T::Description>;

    fn parse(description: Option<&Self::Description>) -> Result<Self, ParseError> {
        let items = parse_elements(description)?;
        if items.is_empty() {
            return Err(ParseError::invalid("at least one element is required"));
        }
        Ok(NonEmptyArray(items))
    }
}

impl<T: Encode> Encode for NonEmptyArray<T> {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        write_elements(&self.0, sink);
    }
}

impl<'a, T> IntoIterator for &'a NonEmptyArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Extracts the ordering key for a [`SortedArray`].
pub trait SortKey<T> {
    type Key: Ord;

    /// Sort descending instead of ascending.
    const REVERSE: bool = false;

    fn key(item: &T) -> Self::Key;
}

/// An array whose elements are stably sorted by `K` at parse time.
/// Equal keys keep their input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedArray<T, K> {
    items: Vec<T>,
    _key: PhantomData<K>,
}

impl<T, K> SortedArray<T, K> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Parse, K: SortKey<T>> Parse for SortedArray<T, K> {
    type Description = Vec<T::Description>;

    fn parse(description: Option<&Self::Description>) -> Result<Self, ParseError> {
        let mut items = parse_elements::<T>(description)?;
        items.sort_by(|a, b| {
            let ordering: Ordering = K::key(a).cmp(&K::key(b));
            if K::REVERSE {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(SortedArray {
            items,
            _key: PhantomData,
        })
    }
}

impl<T: Encode, K> Encode for SortedArray<T, K> {
    fn write<W: Sink + ?Sized>(&self, sink: &mut W) {
        write_elements(&self.items, sink);
    }
}

impl<'a, T, K> IntoIterator for &'a SortedArray<T, K> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
