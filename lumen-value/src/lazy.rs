// lumen-value - Lazily realized sequences
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! A [`LazySeq`] wraps a zero-argument producer. The first observation runs
//! the producer, which must return something seqable, and caches the seq
//! view of the result. Clones and `with_meta` copies share the cache, so the
//! producer runs at most once per successful realization.
//!
//! Realization is an unsynchronized check-then-act over `RefCell` state;
//! `LazySeq` is `!Send`, which keeps it on the thread that created it.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::capability::Callable;
use crate::error::{Error, Result};
use crate::info::{Info, Meta};
use crate::object::Object;
use crate::proc::Proc;
use crate::seq::Seq;

enum LazyState {
    Pending(Rc<dyn Callable>),
    Realized(Seq),
}

#[derive(Clone)]
pub struct LazySeq {
    state: Rc<RefCell<LazyState>>,
    info: Info,
}

impl LazySeq {
    /// A lazy seq whose elements come from calling `producer` with no
    /// arguments.
    pub fn new(producer: impl Callable + 'static) -> Self {
        LazySeq {
            state: Rc::new(RefCell::new(LazyState::Pending(Rc::new(producer)))),
            info: Info::default(),
        }
    }

    pub fn from_fn(producer: impl Fn() -> Result<Object> + 'static) -> Self {
        LazySeq::new(Proc::new("lazy-seq", move |_| producer()))
    }

    pub fn is_realized(&self) -> bool {
        matches!(&*self.state.borrow(), LazyState::Realized(_))
    }

    /// Run the producer if it has not run yet and return the cached seq.
    ///
    /// A failing producer leaves the seq unrealized, so a later call runs it
    /// again.
    pub fn realize(&self) -> Result<Seq> {
        let producer = match &*self.state.borrow() {
            LazyState::Realized(seq) => return Ok(seq.clone()),
            LazyState::Pending(producer) => Rc::clone(producer),
        };

        let value = producer.call(&[])?;
        let seq = value
            .seq()
            .ok_or_else(|| Error::type_error_in("lazy-seq", "seqable", value.type_name()))?;

        let mut state = self.state.borrow_mut();
        // The producer may have realized this seq through a clone.
        if let LazyState::Realized(existing) = &*state {
            return Ok(existing.clone());
        }
        trace!(kind = seq.type_name(), "realized lazy seq");
        *state = LazyState::Realized(seq.clone());
        Ok(seq)
    }

    pub(crate) fn ptr_eq(&self, other: &LazySeq) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl Meta for LazySeq {
    fn info(&self) -> &Info {
        &self.info
    }

    fn with_info(&self, info: Info) -> Self {
        LazySeq {
            state: Rc::clone(&self.state),
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::ArrayMap;
    use crate::vector::Vector;
    use std::cell::Cell;

    fn counting(calls: &Rc<Cell<usize>>, value: Object) -> LazySeq {
        let calls = Rc::clone(calls);
        LazySeq::from_fn(move || {
            calls.set(calls.get() + 1);
            Ok(value.clone())
        })
    }

    #[test]
    fn test_producer_runs_once() {
        let calls = Rc::new(Cell::new(0));
        let items = Object::Vector(Vector::from_vec(vec![Object::Int(1), Object::Int(2)]));
        let lazy = counting(&calls, items);
        let seq = Seq::Lazy(lazy.clone());

        assert!(!lazy.is_realized());
        assert_eq!(seq.first().unwrap(), Object::Int(1));
        assert_eq!(seq.rest().unwrap().first().unwrap(), Object::Int(2));
        assert!(!seq.is_empty().unwrap());
        assert_eq!(seq.count().unwrap(), 2);
        assert!(lazy.is_realized());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_with_meta_shares_realization() {
        let calls = Rc::new(Cell::new(0));
        let lazy = counting(&calls, Object::Nil);
        let meta = ArrayMap::from_pairs(vec![(Object::keyword("a"), Object::Int(1))]);
        let tagged = lazy.with_meta(&meta);

        assert!(Seq::Lazy(tagged).is_empty().unwrap());
        assert!(Seq::Lazy(lazy).is_empty().unwrap());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_non_seqable_result_is_type_error() {
        let lazy = LazySeq::from_fn(|| Ok(Object::Int(3)));
        let err = lazy.realize().unwrap_err();
        assert_eq!(err.to_string(), "lazy-seq: expected seqable, got Int");
        assert!(!lazy.is_realized());
    }

    #[test]
    fn test_failed_producer_stays_pending() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let lazy = LazySeq::from_fn(move || {
            counter.set(counter.get() + 1);
            if counter.get() == 1 {
                Err(Error::MalformedInput("first try".to_string()))
            } else {
                Ok(Object::Nil)
            }
        });
        assert!(lazy.realize().is_err());
        assert!(lazy.realize().is_ok());
        assert!(lazy.realize().is_ok());
        assert_eq!(calls.get(), 2);
    }
}
