// lumen-value - Keyword type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords are self-evaluating identifiers, printed with a leading colon.
//!
//! Interned through the same table as symbols. Interned keywords are never
//! deallocated, so programs that mint keywords from unbounded input grow
//! memory monotonically.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::interner::{self, QualifiedName};

/// An optionally namespaced keyword.
#[derive(Clone)]
pub struct Keyword {
    inner: Arc<QualifiedName>,
}

impl Keyword {
    pub fn new(name: &str) -> Self {
        Keyword {
            inner: interner::intern(None, name),
        }
    }

    pub fn with_namespace(namespace: &str, name: &str) -> Self {
        Keyword {
            inner: interner::intern(Some(namespace), name),
        }
    }

    /// Parse from "name" or "ns/name", without the leading colon.
    pub fn parse(s: &str) -> Self {
        match interner::split_qualified(s) {
            (Some(ns), name) => Keyword::with_namespace(ns, name),
            (None, name) => Keyword::new(name),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.inner.namespace.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace() {
            Some(ns) => write!(f, ":{}/{}", ns, self.name()),
            None => write!(f, ":{}", self.name()),
        }
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Keyword {}

impl PartialOrd for Keyword {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Keyword {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace()
            .cmp(&other.namespace())
            .then_with(|| self.name().cmp(other.name()))
    }
}

impl Hash for Keyword {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}
