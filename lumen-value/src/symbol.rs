// lumen-value - Symbol type with interning
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Symbols name vars and lexical bindings.
//!
//! Symbols share the process-wide interner with keywords, so two symbols with
//! the same namespace and name are the same allocation. Comparison and hashing
//! go through the pointer.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::interner::{self, QualifiedName};

/// An optionally namespaced symbol.
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<QualifiedName>,
}

impl Symbol {
    /// Create a symbol with no namespace.
    pub fn new(name: &str) -> Self {
        Symbol {
            inner: interner::intern(None, name),
        }
    }

    /// Create a symbol with a namespace.
    pub fn with_namespace(namespace: &str, name: &str) -> Self {
        Symbol {
            inner: interner::intern(Some(namespace), name),
        }
    }

    /// Parse a symbol from a string like "foo" or "ns/foo".
    pub fn parse(s: &str) -> Self {
        match interner::split_qualified(s) {
            (Some(ns), name) => Symbol::with_namespace(ns, name),
            (None, name) => Symbol::new(name),
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

    /// The same name with the namespace dropped.
    #[must_use]
    pub fn unqualified(&self) -> Symbol {
        match self.namespace() {
            Some(_) => Symbol::new(self.name()),
            None => self.clone(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace() {
            Some(ns) => write!(f, "{}/{}", ns, self.name()),
            None => f.write_str(self.name()),
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        self.namespace()
            .cmp(&other.namespace())
            .then_with(|| self.name().cmp(other.name()))
    }
}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}
