// lumen-value - Capability traits implemented by value variants
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Additive capabilities. `Object` exposes each one as a query that matches
//! over its variants; the concrete types implement the traits directly.

use crate::error::Result;
use crate::object::Object;
use crate::seq::Seq;
use crate::vector::Vector;

/// Values that can produce a [`Seq`] view of themselves.
pub trait Seqable {
    fn seq(&self) -> Seq;
}

/// Values that know their element count without walking.
pub trait Counted {
    fn count(&self) -> usize;
}

/// Keyed update and entry lookup.
pub trait Associative: Sized {
    fn assoc(&self, key: Object, value: Object) -> Result<Self>;

    /// The `[key value]` pair stored under `key`.
    fn entry_at(&self, key: &Object) -> Option<Vector>;
}

/// Marker for values compared element-wise against other sequential values.
pub trait Sequential {}

/// Values that can be applied to arguments.
pub trait Callable {
    fn call(&self, args: &[Object]) -> Result<Object>;
}
