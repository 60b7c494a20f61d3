//! Container normalization shared by the diff, confirmation and merge engines.
//!
//! Both schemas and values are viewed as one of three shapes: a mapping, a
//! sequence, or a leaf. Sequences become positional maps keyed by
//! [`Key::Index`]; a homogeneous [`Schema::ListOf`] repeats its element
//! schema up to whatever length the other side has.

use std::collections::BTreeMap;

use crate::difference::{DiffEntry, DiffMode};
use crate::types::{Key, Schema};
use crate::value::Value;

/// Positions of a sequence-shaped node.
#[derive(Debug)]
pub enum Positions<'a, T> {
    /// Explicit elements; the length is fixed.
    Fixed(&'a [T]),
    /// One element repeated at every index; the length comes from elsewhere.
    Repeated(&'a T),
}

impl<T> Clone for Positions<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Positions<'_, T> {}

impl<'a, T> Positions<'a, T> {
    /// Fixed length, if known.
    pub fn fixed_len(&self) -> Option<usize> {
        match self {
            Positions::Fixed(items) => Some(items.len()),
            Positions::Repeated(_) => None,
        }
    }

    pub fn get(&self, index: usize) -> Option<&'a T> {
        match *self {
            Positions::Fixed(items) => items.get(index),
            Positions::Repeated(item) => Some(item),
        }
    }

    /// Positional map view. `target_len` sizes a repeated sequence and is
    /// ignored for fixed ones.
    pub fn expand(&self, target_len: usize) -> BTreeMap<Key, &'a T> {
        match *self {
            Positions::Fixed(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| (Key::Index(i), item))
                .collect(),
            Positions::Repeated(item) => (0..target_len).map(|i| (Key::Index(i), item)).collect(),
        }
    }
}

/// Normalized view of a node.
#[derive(Debug)]
pub enum Shape<'a, T> {
    Mapping(BTreeMap<Key, &'a T>),
    Sequence(Positions<'a, T>),
    Leaf,
}

/// Something the structural diff can walk: a schema or a value.
pub trait Structured: Sized {
    fn shape(&self) -> Shape<'_, Self>;

    /// What the diff records when this node has no counterpart.
    fn record(&self, mode: DiffMode) -> DiffEntry;
}

impl Structured for Schema {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Schema::Map(entries) => Shape::Mapping(
                entries
                    .iter()
                    .map(|(k, v)| (Key::Name(k.clone()), v))
                    .collect(),
            ),
            Schema::Seq(items) => Shape::Sequence(Positions::Fixed(items.as_slice())),
            Schema::ListOf(element) => Shape::Sequence(Positions::Repeated(&**element)),
            Schema::Any | Schema::Type(_) => Shape::Leaf,
        }
    }

    fn record(&self, mode: DiffMode) -> DiffEntry {
        match (mode, self.container_kind()) {
            (DiffMode::Unknown, Some(kind)) => DiffEntry::Container(kind),
            _ => DiffEntry::Expected(self.clone()),
        }
    }
}

impl Structured for Value {
    fn shape(&self) -> Shape<'_, Self> {
        match self {
            Value::Map(entries) => Shape::Mapping(
                entries
                    .iter()
                    .map(|(k, v)| (Key::Name(k.clone()), v))
                    .collect(),
            ),
            Value::List(items) => Shape::Sequence(Positions::Fixed(items.as_slice())),
            _ => Shape::Leaf,
        }
    }

    fn record(&self, mode: DiffMode) -> DiffEntry {
        match (mode, self.container_kind()) {
            (DiffMode::Unknown, Some(kind)) => DiffEntry::Container(kind),
            _ => DiffEntry::Value(self.clone()),
        }
    }
}
