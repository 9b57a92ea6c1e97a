// lumen-value - Insertion-ordered sets
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use crate::capability::{Callable, Counted, Seqable};
use crate::error::{Error, Result};
use crate::info::{Info, Meta};
use crate::object::Object;
use crate::seq::Seq;
use crate::vector::VectorSeq;

/// A collection of distinct values, kept in insertion order.
///
/// Membership is tested with value equality, scanning linearly.
#[derive(Clone, Default)]
pub struct Set {
    items: im::Vector<Object>,
    info: Info,
}

impl Set {
    pub fn new() -> Self {
        Set::default()
    }

    pub fn items(&self) -> &im::Vector<Object> {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Membership, a failed comparison counting as a mismatch.
    pub fn contains(&self, x: &Object) -> bool {
        self.items.iter().any(|item| item == x)
    }

    /// Membership, propagating comparison failures.
    pub fn try_contains(&self, x: &Object) -> Result<bool> {
        for item in self.items.iter() {
            if item.equals(x)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Insert `x` in place. Returns false, leaving the set unchanged, when an
    /// equal element is already present.
    pub fn add(&mut self, x: Object) -> Result<bool> {
        if self.try_contains(&x)? {
            return Ok(false);
        }
        self.items.push_back(x);
        Ok(true)
    }

    #[must_use]
    pub fn conj(&self, x: Object) -> Set {
        let mut result = self.clone();
        if !result.contains(&x) {
            result.items.push_back(x);
        }
        result
    }

    #[must_use]
    pub fn disj(&self, x: &Object) -> Set {
        Set {
            items: self.items.iter().filter(|item| *item != x).cloned().collect(),
            info: self.info.clone(),
        }
    }

    /// Sets are equal when they have the same size and every element of one
    /// is in the other.
    pub fn equals(&self, other: &Object) -> Result<bool> {
        match other {
            Object::Set(other) => {
                if self.items.len() != other.items.len() {
                    return Ok(false);
                }
                for item in self.items.iter() {
                    let mut found = false;
                    for candidate in other.items.iter() {
                        if item.equals(candidate)? {
                            found = true;
                            break;
                        }
                    }
                    if !found {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl Counted for Set {
    fn count(&self) -> usize {
        self.items.len()
    }
}

impl Seqable for Set {
    fn seq(&self) -> Seq {
        if self.items.is_empty() {
            Seq::empty()
        } else {
            Seq::Vector(VectorSeq::new(self.items.clone(), 0))
        }
    }
}

impl Meta for Set {
    fn info(&self) -> &Info {
        &self.info
    }

    fn with_info(&self, info: Info) -> Self {
        Set {
            items: self.items.clone(),
            info,
        }
    }
}

impl Callable for Set {
    /// `(s x)` is `x` when present, otherwise nil.
    fn call(&self, args: &[Object]) -> Result<Object> {
        if args.len() != 1 {
            return Err(Error::arity_named("set", 1, args.len()));
        }
        if self.try_contains(&args[0])? {
            Ok(args[0].clone())
        } else {
            Ok(Object::Nil)
        }
    }
}
