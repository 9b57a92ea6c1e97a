// lumen-value - The sequence abstraction
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Sequences: a uniform first/rest view over lists, arrays, vectors, map
//! entries and lazily produced values.
//!
//! [`Seq`] is a closed enum of the concrete views. Operations that may
//! realize a [`LazySeq`] return [`Result`], since the producer can fail.
//! Two seqs compare equal when they hold equal elements in the same order,
//! whatever their representation.

use std::fmt;
use std::rc::Rc;

use crate::capability::{Counted, Seqable, Sequential};
use crate::error::{Error, Result};
use crate::info::{Info, Meta};
use crate::lazy::LazySeq;
use crate::map::ArrayMapSeq;
use crate::object::{Object, write_limited};
use crate::vector::VectorSeq;

/// A possibly empty, possibly lazy sequence.
#[derive(Clone)]
pub enum Seq {
    Empty(EmptyList),
    Cons(ConsSeq),
    Array(ArraySeq),
    Vector(VectorSeq),
    Lazy(LazySeq),
    MapEntries(ArrayMapSeq),
}

impl Seq {
    /// The canonical empty list.
    pub fn empty() -> Seq {
        Seq::Empty(EmptyList::new())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Seq::Empty(_) => "EmptyList",
            Seq::Cons(_) => "ConsSeq",
            Seq::Array(_) => "ArraySeq",
            Seq::Vector(_) => "VectorSeq",
            Seq::Lazy(_) => "LazySeq",
            Seq::MapEntries(_) => "ArrayMapSeq",
        }
    }

    /// The first element, or `nil` when empty.
    pub fn first(&self) -> Result<Object> {
        match self {
            Seq::Empty(_) => Ok(Object::Nil),
            Seq::Cons(c) => Ok(c.first().clone()),
            Seq::Array(a) => Ok(a.first()),
            Seq::Vector(v) => Ok(v.first()),
            Seq::Lazy(l) => l.realize()?.first(),
            Seq::MapEntries(m) => Ok(m.first()),
        }
    }

    /// Everything after the first element. The rest of an empty or
    /// single-element seq is the empty list.
    pub fn rest(&self) -> Result<Seq> {
        match self {
            Seq::Empty(_) => Ok(Seq::empty()),
            Seq::Cons(c) => Ok(c.rest().clone()),
            Seq::Array(a) => Ok(a.rest()),
            Seq::Vector(v) => Ok(v.rest()),
            Seq::Lazy(l) => l.realize()?.rest(),
            Seq::MapEntries(m) => Ok(m.rest()),
        }
    }

    pub fn is_empty(&self) -> Result<bool> {
        match self {
            Seq::Empty(_) => Ok(true),
            Seq::Cons(_) => Ok(false),
            Seq::Array(a) => Ok(a.count() == 0),
            Seq::Vector(v) => Ok(v.count() == 0),
            Seq::Lazy(l) => l.realize()?.is_empty(),
            Seq::MapEntries(m) => Ok(m.count() == 0),
        }
    }

    /// Prepend `x`. Never inspects or realizes the receiver.
    #[must_use]
    pub fn cons(&self, x: Object) -> Seq {
        Seq::Cons(ConsSeq::new(x, self.clone()))
    }

    /// Element count if this view knows it without walking.
    pub fn counted(&self) -> Option<usize> {
        match self {
            Seq::Empty(e) => Some(e.count()),
            Seq::Array(a) => Some(a.count()),
            Seq::Vector(v) => Some(v.count()),
            Seq::MapEntries(m) => Some(m.count()),
            Seq::Cons(_) | Seq::Lazy(_) => None,
        }
    }

    pub fn count(&self) -> Result<usize> {
        seq_count(self)
    }

    pub fn nth(&self, n: i64) -> Result<Object> {
        seq_nth(self, n)
    }

    pub fn try_nth(&self, n: i64, default: Object) -> Result<Object> {
        seq_try_nth(self, n, default)
    }

    pub fn iter(&self) -> SeqIter {
        SeqIter {
            seq: Some(self.clone()),
        }
    }

    pub fn render(&self, escape: bool) -> Result<String> {
        seq_to_string(self, escape)
    }

    pub fn equals(&self, other: &Object) -> Result<bool> {
        is_seq_equal(self, other)
    }

    /// True when both seqs are the same view over the same storage.
    pub fn ptr_eq(&self, other: &Seq) -> bool {
        match (self, other) {
            (Seq::Empty(_), Seq::Empty(_)) => true,
            (Seq::Cons(a), Seq::Cons(b)) => Rc::ptr_eq(&a.cell, &b.cell),
            (Seq::Array(a), Seq::Array(b)) => Rc::ptr_eq(&a.arr, &b.arr) && a.index == b.index,
            (Seq::Vector(a), Seq::Vector(b)) => a.ptr_eq(b),
            (Seq::Lazy(a), Seq::Lazy(b)) => a.ptr_eq(b),
            (Seq::MapEntries(a), Seq::MapEntries(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Meta for Seq {
    fn info(&self) -> &Info {
        match self {
            Seq::Empty(s) => &s.info,
            Seq::Cons(s) => &s.info,
            Seq::Array(s) => &s.info,
            Seq::Vector(s) => s.info(),
            Seq::Lazy(s) => s.info(),
            Seq::MapEntries(s) => s.info(),
        }
    }

    fn with_info(&self, info: Info) -> Self {
        match self {
            Seq::Empty(_) => Seq::Empty(EmptyList { info }),
            Seq::Cons(s) => Seq::Cons(ConsSeq {
                cell: Rc::clone(&s.cell),
                info,
            }),
            Seq::Array(s) => Seq::Array(ArraySeq {
                arr: Rc::clone(&s.arr),
                index: s.index,
                info,
            }),
            Seq::Vector(s) => Seq::Vector(s.with_info(info)),
            Seq::Lazy(s) => Seq::Lazy(s.with_info(info)),
            Seq::MapEntries(s) => Seq::MapEntries(s.with_info(info)),
        }
    }
}

impl Seqable for Seq {
    fn seq(&self) -> Seq {
        self.clone()
    }
}

impl Sequential for Seq {}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match seq_to_string(self, f.alternate()) {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "#<error: {}>", e),
        }
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self)
    }
}

impl From<EmptyList> for Seq {
    fn from(s: EmptyList) -> Self {
        Seq::Empty(s)
    }
}

impl From<ConsSeq> for Seq {
    fn from(s: ConsSeq) -> Self {
        Seq::Cons(s)
    }
}

impl From<ArraySeq> for Seq {
    fn from(s: ArraySeq) -> Self {
        Seq::Array(s)
    }
}

impl From<VectorSeq> for Seq {
    fn from(s: VectorSeq) -> Self {
        Seq::Vector(s)
    }
}

impl From<LazySeq> for Seq {
    fn from(s: LazySeq) -> Self {
        Seq::Lazy(s)
    }
}

impl From<ArrayMapSeq> for Seq {
    fn from(s: ArrayMapSeq) -> Self {
        Seq::MapEntries(s)
    }
}

// ============================================================================
// Concrete views
// ============================================================================

/// The empty list, `()`.
#[derive(Clone, Default)]
pub struct EmptyList {
    info: Info,
}

impl EmptyList {
    pub fn new() -> Self {
        EmptyList::default()
    }
}

impl Counted for EmptyList {
    fn count(&self) -> usize {
        0
    }
}

struct ConsCell {
    first: Object,
    rest: Seq,
}

/// An eagerly held head in front of any other seq.
#[derive(Clone)]
pub struct ConsSeq {
    cell: Rc<ConsCell>,
    info: Info,
}

impl ConsSeq {
    pub fn new(first: Object, rest: Seq) -> Self {
        ConsSeq {
            cell: Rc::new(ConsCell { first, rest }),
            info: Info::default(),
        }
    }

    pub fn first(&self) -> &Object {
        &self.cell.first
    }

    pub fn rest(&self) -> &Seq {
        &self.cell.rest
    }
}

/// A view over a shared, immutable buffer starting at `index`.
///
/// `rest` is a new view over the same buffer; nothing is copied.
#[derive(Clone)]
pub struct ArraySeq {
    arr: Rc<Vec<Object>>,
    index: usize,
    info: Info,
}

impl ArraySeq {
    pub fn new(items: Vec<Object>) -> Self {
        ArraySeq::shared(Rc::new(items), 0)
    }

    pub(crate) fn shared(arr: Rc<Vec<Object>>, index: usize) -> Self {
        ArraySeq {
            arr,
            index,
            info: Info::default(),
        }
    }

    /// The whole backing buffer, including elements before `index`.
    pub fn buffer(&self) -> &Rc<Vec<Object>> {
        &self.arr
    }

    pub fn first(&self) -> Object {
        self.arr.get(self.index).cloned().unwrap_or(Object::Nil)
    }

    pub fn rest(&self) -> Seq {
        if self.index + 1 < self.arr.len() {
            Seq::Array(ArraySeq::shared(Rc::clone(&self.arr), self.index + 1))
        } else {
            Seq::empty()
        }
    }
}

impl Counted for ArraySeq {
    fn count(&self) -> usize {
        self.arr.len().saturating_sub(self.index)
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// Iterator over a seq's elements.
///
/// Yields `Err` once if realizing part of the seq fails, then stops.
pub struct SeqIter {
    seq: Option<Seq>,
}

fn step(seq: &Seq) -> Result<Option<(Object, Seq)>> {
    if seq.is_empty()? {
        return Ok(None);
    }
    Ok(Some((seq.first()?, seq.rest()?)))
}

impl Iterator for SeqIter {
    type Item = Result<Object>;

    fn next(&mut self) -> Option<Self::Item> {
        let seq = self.seq.take()?;
        match step(&seq) {
            Ok(Some((first, rest))) => {
                self.seq = Some(rest);
                Some(Ok(first))
            }
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

// ============================================================================
// Sequence algorithms
// ============================================================================

/// Pairwise comparison of two seqs; equal iff both end together and every
/// pair is equal.
pub fn seqs_equal(seq1: &Seq, seq2: &Seq) -> Result<bool> {
    let mut iter1 = seq1.iter();
    let mut iter2 = seq2.iter();
    loop {
        match (iter1.next(), iter2.next()) {
            (None, None) => return Ok(true),
            (Some(a), Some(b)) => {
                if !a?.equals(&b?)? {
                    return Ok(false);
                }
            }
            _ => return Ok(false),
        }
    }
}

/// Compare a seq with any value. Only sequential values can be equal to a
/// seq; the same view over the same storage is equal without walking.
pub fn is_seq_equal(seq: &Seq, other: &Object) -> Result<bool> {
    if let Object::Seq(other) = other {
        if seq.ptr_eq(other) {
            return Ok(true);
        }
    }
    if !other.is_sequential() {
        return Ok(false);
    }
    match other.seq() {
        Some(other) => seqs_equal(seq, &other),
        None => Ok(false),
    }
}

/// Walk the seq, finishing early on a tail that knows its own count.
pub fn seq_count(seq: &Seq) -> Result<usize> {
    let mut count = 0;
    let mut seq = seq.clone();
    loop {
        if let Some(n) = seq.counted() {
            return Ok(count + n);
        }
        if seq.is_empty()? {
            return Ok(count);
        }
        count += 1;
        seq = seq.rest()?;
    }
}

pub fn seq_nth(seq: &Seq, n: i64) -> Result<Object> {
    if n < 0 {
        return Err(Error::IndexOutOfRange {
            index: n,
            length: None,
        });
    }
    let mut walked: usize = 0;
    let mut seq = seq.clone();
    while !seq.is_empty()? {
        if walked as i64 == n {
            return seq.first();
        }
        seq = seq.rest()?;
        walked += 1;
    }
    Err(Error::IndexOutOfRange {
        index: n,
        length: Some(walked),
    })
}

/// Like [`seq_nth`], but returns `default` for an index out of range.
pub fn seq_try_nth(seq: &Seq, n: i64, default: Object) -> Result<Object> {
    match seq_nth(seq, n) {
        Err(Error::IndexOutOfRange { .. }) => Ok(default),
        other => other,
    }
}

/// Render as `(a b c)`, honouring the thread-local print length.
pub fn seq_to_string(seq: &Seq, escape: bool) -> Result<String> {
    let mut out = String::from("(");
    write_limited(&mut out, seq.iter(), " ", |out, item| {
        item.write_to(out, escape)
    })?;
    out.push(')');
    Ok(out)
}

/// Realize the whole seq into a vector.
pub fn to_vec(seq: &Seq) -> Result<Vec<Object>> {
    seq.iter().collect()
}

pub fn second(seq: &Seq) -> Result<Object> {
    seq.rest()?.first()
}

pub fn third(seq: &Seq) -> Result<Object> {
    seq.rest()?.rest()?.first()
}

pub fn fourth(seq: &Seq) -> Result<Object> {
    seq.rest()?.rest()?.rest()?.first()
}
