// lumen-value - Persistent vectors
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use crate::capability::{Associative, Callable, Counted, Seqable, Sequential};
use crate::error::{Error, Result};
use crate::info::{Info, Meta};
use crate::object::Object;
use crate::seq::{Seq, seqs_equal};

/// An indexed, persistent sequence of values backed by `im::Vector`.
#[derive(Clone, Default)]
pub struct Vector {
    items: im::Vector<Object>,
    info: Info,
}

impl Vector {
    pub fn new() -> Self {
        Vector::default()
    }

    pub fn from_vec(items: Vec<Object>) -> Self {
        Vector {
            items: items.into_iter().collect(),
            info: Info::default(),
        }
    }

    /// A two-element vector, as used for map entries.
    pub fn pair(key: Object, value: Object) -> Self {
        Vector::from_vec(vec![key, value])
    }

    pub fn items(&self) -> &im::Vector<Object> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Object> {
        self.items.get(index)
    }

    pub fn nth(&self, index: i64) -> Result<Object> {
        let i = self.checked_index(index)?;
        Ok(self.items[i].clone())
    }

    /// Append `x`, keeping metadata.
    #[must_use]
    pub fn conj(&self, x: Object) -> Vector {
        let mut items = self.items.clone();
        items.push_back(x);
        Vector {
            items,
            info: self.info.clone(),
        }
    }

    /// Replace the element at `index`; an index equal to the count appends.
    pub fn assoc_n(&self, index: i64, value: Object) -> Result<Vector> {
        if index == self.items.len() as i64 {
            return Ok(self.conj(value));
        }
        let i = self.checked_index(index)?;
        Ok(Vector {
            items: self.items.update(i, value),
            info: self.info.clone(),
        })
    }

    pub fn equals(&self, other: &Object) -> Result<bool> {
        match other {
            Object::Vector(other) => {
                if self.items.len() != other.items.len() {
                    return Ok(false);
                }
                for (a, b) in self.items.iter().zip(other.items.iter()) {
                    if !a.equals(b)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Object::Seq(other) => seqs_equal(&self.seq(), other),
            _ => Ok(false),
        }
    }

    fn checked_index(&self, index: i64) -> Result<usize> {
        if index < 0 {
            return Err(Error::IndexOutOfRange {
                index,
                length: None,
            });
        }
        if index as usize >= self.items.len() {
            return Err(Error::IndexOutOfRange {
                index,
                length: Some(self.items.len()),
            });
        }
        Ok(index as usize)
    }
}

impl Counted for Vector {
    fn count(&self) -> usize {
        self.items.len()
    }
}

impl Seqable for Vector {
    fn seq(&self) -> Seq {
        if self.items.is_empty() {
            Seq::empty()
        } else {
            Seq::Vector(VectorSeq::new(self.items.clone(), 0))
        }
    }
}

impl Sequential for Vector {}

impl Associative for Vector {
    fn assoc(&self, key: Object, value: Object) -> Result<Self> {
        match key {
            Object::Int(i) => self.assoc_n(i, value),
            other => Err(Error::type_error_in("assoc", "Int", other.type_name())),
        }
    }

    fn entry_at(&self, key: &Object) -> Option<Vector> {
        match key {
            Object::Int(i) if *i >= 0 => self
                .items
                .get(*i as usize)
                .map(|v| Vector::pair(key.clone(), v.clone())),
            _ => None,
        }
    }
}

impl Meta for Vector {
    fn info(&self) -> &Info {
        &self.info
    }

    fn with_info(&self, info: Info) -> Self {
        Vector {
            items: self.items.clone(),
            info,
        }
    }
}

impl Callable for Vector {
    fn call(&self, args: &[Object]) -> Result<Object> {
        if args.len() != 1 {
            return Err(Error::arity_named("vector", 1, args.len()));
        }
        let index = args[0].as_int()?;
        self.nth(*index)
    }
}

/// A seq view over a vector, starting at `index`.
#[derive(Clone)]
pub struct VectorSeq {
    vector: im::Vector<Object>,
    index: usize,
    info: Info,
}

impl VectorSeq {
    pub(crate) fn new(vector: im::Vector<Object>, index: usize) -> Self {
        VectorSeq {
            vector,
            index,
            info: Info::default(),
        }
    }

    pub fn first(&self) -> Object {
        self.vector.get(self.index).cloned().unwrap_or(Object::Nil)
    }

    pub fn rest(&self) -> Seq {
        if self.index + 1 < self.vector.len() {
            Seq::Vector(VectorSeq::new(self.vector.clone(), self.index + 1))
        } else {
            Seq::empty()
        }
    }

    pub(crate) fn ptr_eq(&self, other: &VectorSeq) -> bool {
        self.index == other.index && self.vector.ptr_eq(&other.vector)
    }
}

impl Counted for VectorSeq {
    fn count(&self) -> usize {
        self.vector.len().saturating_sub(self.index)
    }
}

impl Meta for VectorSeq {
    fn info(&self) -> &Info {
        &self.info
    }

    fn with_info(&self, info: Info) -> Self {
        VectorSeq {
            vector: self.vector.clone(),
            index: self.index,
            info,
        }
    }
}
