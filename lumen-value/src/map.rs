// lumen-value - Array-backed maps
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Small immutable maps stored as a flat buffer of alternating keys and
//! values, scanned linearly with value equality.
//!
//! The buffer lives behind an `Rc`. Public operations return new maps; the
//! in-place builders [`ArrayMap::add`] and [`ArrayMap::set`] copy the buffer
//! first when it is shared, so a map that has been handed out never changes.

use std::fmt;
use std::rc::Rc;

use crate::capability::{Associative, Callable, Counted, Seqable, Sequential};
use crate::error::{Error, Result};
use crate::info::{Info, Meta};
use crate::object::{Object, write_limited};
use crate::seq::{ArraySeq, Seq};
use crate::vector::Vector;

/// Read access shared by map implementations.
pub trait Map: Counted + Seqable {
    type Iter<'a>: Iterator<Item = Pair<'a>>
    where
        Self: 'a;

    fn get(&self, key: &Object) -> Option<&Object>;

    fn contains_key(&self, key: &Object) -> bool {
        self.get(key).is_some()
    }

    /// A map without `key`. Content-equal to the receiver if `key` is absent.
    #[must_use]
    fn without(&self, key: &Object) -> Self
    where
        Self: Sized;

    /// Entries of `other` added over the receiver, `other` winning on
    /// collisions.
    #[must_use]
    fn merge(&self, other: &Self) -> Self
    where
        Self: Sized;

    fn keys(&self) -> Seq;

    fn vals(&self) -> Seq;

    fn iter(&self) -> Self::Iter<'_>;
}

/// One key/value entry borrowed from a map.
#[derive(Debug, Clone, Copy)]
pub struct Pair<'a> {
    pub key: &'a Object,
    pub value: &'a Object,
}

#[derive(Debug, Clone, Default)]
pub struct ArrayMap {
    arr: Rc<Vec<Object>>,
    info: Info,
}

impl ArrayMap {
    pub fn new() -> Self {
        ArrayMap::default()
    }

    /// Build from pairs; a repeated key keeps the last value.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Object, Object)>) -> Self {
        let mut map = ArrayMap::new();
        for (key, value) in pairs {
            map.set(key, value);
        }
        map
    }

    pub fn is_empty(&self) -> bool {
        self.arr.is_empty()
    }

    /// True when both maps share one buffer.
    pub fn ptr_eq(&self, other: &ArrayMap) -> bool {
        Rc::ptr_eq(&self.arr, &other.arr)
    }

    /// Offset of the entry for `key`. Comparing keys can realize lazy seqs;
    /// a failed realization is returned as the error.
    fn index_of(&self, key: &Object) -> Result<Option<usize>> {
        for i in (0..self.arr.len()).step_by(2) {
            if self.arr[i].equals(key)? {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    /// Offset of the entry for `key`, a failed comparison counting as a
    /// mismatch.
    fn find(&self, key: &Object) -> Option<usize> {
        (0..self.arr.len())
            .step_by(2)
            .find(|&i| &self.arr[i] == key)
    }

    /// The value under `key`, propagating comparison failures.
    pub fn try_get(&self, key: &Object) -> Result<Option<&Object>> {
        Ok(self.index_of(key)?.map(|i| &self.arr[i + 1]))
    }

    /// Overwrite the value under `key`, or append a new entry.
    pub fn set(&mut self, key: Object, value: Object) {
        match self.find(&key) {
            Some(i) => Rc::make_mut(&mut self.arr)[i + 1] = value,
            None => {
                let arr = Rc::make_mut(&mut self.arr);
                arr.push(key);
                arr.push(value);
            }
        }
    }

    /// Append a new entry. Returns false, leaving the map unchanged, when the
    /// key is already present.
    pub fn add(&mut self, key: Object, value: Object) -> Result<bool> {
        if self.index_of(&key)?.is_some() {
            return Ok(false);
        }
        let arr = Rc::make_mut(&mut self.arr);
        arr.push(key);
        arr.push(value);
        Ok(true)
    }

    /// Same entries, fresh metadata.
    fn detached(&self) -> ArrayMap {
        ArrayMap {
            arr: Rc::clone(&self.arr),
            info: Info::default(),
        }
    }

    #[must_use]
    pub fn assoc(&self, key: Object, value: Object) -> ArrayMap {
        let mut result = self.detached();
        result.set(key, value);
        result
    }

    /// Add a `[k v]` vector as an entry, or merge in another map.
    pub fn conj(&self, obj: &Object) -> Result<ArrayMap> {
        match obj {
            Object::Vector(v) => {
                if v.count() != 2 {
                    return Err(Error::InvalidArgument(
                        "Vector argument to map's conj must be a vector with two elements"
                            .to_string(),
                    ));
                }
                Ok(self.assoc(v.items()[0].clone(), v.items()[1].clone()))
            }
            Object::Map(m) => Ok(self.merge(m)),
            _ => Err(Error::InvalidArgument(
                "Argument to map's conj must be a vector with two elements or a map".to_string(),
            )),
        }
    }

    pub fn seq_entries(&self) -> ArrayMapSeq {
        ArrayMapSeq {
            map: self.detached(),
            index: 0,
            info: Info::default(),
        }
    }
}

impl Map for ArrayMap {
    type Iter<'a> = ArrayMapIter<'a>;

    fn get(&self, key: &Object) -> Option<&Object> {
        self.find(key).map(|i| &self.arr[i + 1])
    }

    fn without(&self, key: &Object) -> ArrayMap {
        let mut arr = Vec::with_capacity(self.arr.len());
        for pair in self.arr.chunks_exact(2) {
            if &pair[0] != key {
                arr.extend_from_slice(pair);
            }
        }
        ArrayMap {
            arr: Rc::new(arr),
            info: Info::default(),
        }
    }

    fn merge(&self, other: &ArrayMap) -> ArrayMap {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        let mut result = self.detached();
        for Pair { key, value } in other.iter() {
            result.set(key.clone(), value.clone());
        }
        result
    }

    fn keys(&self) -> Seq {
        ArraySeq::new(self.arr.iter().step_by(2).cloned().collect()).into()
    }

    fn vals(&self) -> Seq {
        ArraySeq::new(self.arr.iter().skip(1).step_by(2).cloned().collect()).into()
    }

    fn iter(&self) -> ArrayMapIter<'_> {
        ArrayMapIter {
            arr: &self.arr,
            current: 0,
        }
    }
}

impl Counted for ArrayMap {
    fn count(&self) -> usize {
        self.arr.len() / 2
    }
}

impl Seqable for ArrayMap {
    fn seq(&self) -> Seq {
        if self.is_empty() {
            Seq::empty()
        } else {
            Seq::MapEntries(self.seq_entries())
        }
    }
}

impl Associative for ArrayMap {
    fn assoc(&self, key: Object, value: Object) -> Result<Self> {
        Ok(ArrayMap::assoc(self, key, value))
    }

    fn entry_at(&self, key: &Object) -> Option<Vector> {
        self.find(key)
            .map(|i| Vector::pair(key.clone(), self.arr[i + 1].clone()))
    }
}

impl Meta for ArrayMap {
    fn info(&self) -> &Info {
        &self.info
    }

    fn with_info(&self, info: Info) -> Self {
        ArrayMap {
            arr: Rc::clone(&self.arr),
            info,
        }
    }
}

impl Callable for ArrayMap {
    /// `(m key)` or `(m key default)`.
    fn call(&self, args: &[Object]) -> Result<Object> {
        if args.is_empty() || args.len() > 2 {
            return Err(Error::arity_range("map", 1, 2, args.len()));
        }
        match self.try_get(&args[0])? {
            Some(value) => Ok(value.clone()),
            None => Ok(args.get(1).cloned().unwrap_or(Object::Nil)),
        }
    }
}

impl fmt::Display for ArrayMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match map_to_string(self, f.alternate()) {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "#<error: {}>", e),
        }
    }
}

/// Iterator over a map's entries in insertion order.
pub struct ArrayMapIter<'a> {
    arr: &'a [Object],
    current: usize,
}

impl<'a> Iterator for ArrayMapIter<'a> {
    type Item = Pair<'a>;

    fn next(&mut self) -> Option<Pair<'a>> {
        if self.current + 1 >= self.arr.len() {
            return None;
        }
        let pair = Pair {
            key: &self.arr[self.current],
            value: &self.arr[self.current + 1],
        };
        self.current += 2;
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.arr.len().saturating_sub(self.current) / 2;
        (remaining, Some(remaining))
    }
}

/// Seq of a map's entries, each yielded as a fresh `[k v]` vector.
#[derive(Clone)]
pub struct ArrayMapSeq {
    map: ArrayMap,
    index: usize,
    info: Info,
}

impl ArrayMapSeq {
    pub fn first(&self) -> Object {
        match self.map.arr.get(self.index..self.index + 2) {
            Some([key, value]) => Object::Vector(Vector::pair(key.clone(), value.clone())),
            _ => Object::Nil,
        }
    }

    pub fn rest(&self) -> Seq {
        if self.index + 2 < self.map.arr.len() {
            Seq::MapEntries(ArrayMapSeq {
                map: self.map.clone(),
                index: self.index + 2,
                info: Info::default(),
            })
        } else {
            Seq::empty()
        }
    }

    pub(crate) fn ptr_eq(&self, other: &ArrayMapSeq) -> bool {
        self.index == other.index && self.map.ptr_eq(&other.map)
    }
}

impl Counted for ArrayMapSeq {
    fn count(&self) -> usize {
        self.map.arr.len().saturating_sub(self.index) / 2
    }
}

impl Sequential for ArrayMapSeq {}

impl Meta for ArrayMapSeq {
    fn info(&self) -> &Info {
        &self.info
    }

    fn with_info(&self, info: Info) -> Self {
        ArrayMapSeq {
            map: self.map.clone(),
            index: self.index,
            info,
        }
    }
}

/// A seq over the raw `k1 v1 k2 v2 ...` buffer, sharing the map's storage.
pub fn array_seq_from_array_map(m: &ArrayMap) -> ArraySeq {
    ArraySeq::shared(Rc::clone(&m.arr), 0)
}

/// Maps are equal when they have the same count and every key of one maps
/// to an equal value in the other. Entry order is irrelevant.
pub fn map_equals(m: &ArrayMap, other: &Object) -> Result<bool> {
    let Object::Map(other) = other else {
        return Ok(false);
    };
    if m.ptr_eq(other) {
        return Ok(true);
    }
    if m.count() != other.count() {
        return Ok(false);
    }
    for Pair { key, value } in m.iter() {
        match other.get(key) {
            Some(found) => {
                if !found.equals(value)? {
                    return Ok(false);
                }
            }
            None => return Ok(false),
        }
    }
    Ok(true)
}

/// Render as `{k v, k v}`.
pub fn map_to_string(m: &ArrayMap, escape: bool) -> Result<String> {
    let mut out = String::from("{");
    write_limited(&mut out, m.iter().map(Ok), ", ", |out, pair| {
        pair.key.write_to(out, escape)?;
        out.push(' ');
        pair.value.write_to(out, escape)
    })?;
    out.push('}');
    Ok(out)
}

/// Merge two optional metadata maps, treating an absent map as empty.
pub fn safe_merge(m1: Option<&ArrayMap>, m2: Option<&ArrayMap>) -> Option<ArrayMap> {
    match (m1, m2) {
        (None, None) => None,
        (Some(m), None) | (None, Some(m)) => Some(m.clone()),
        (Some(m1), Some(m2)) => Some(m1.merge(m2)),
    }
}
