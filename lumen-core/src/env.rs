// lumen-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lumen_value::{Object, Symbol, Var};

use crate::namespace::NamespaceRegistry;

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references. Every frame in a
/// chain shares one [`NamespaceRegistry`] for global lookups.
///
/// # Examples
///
/// ```
/// use lumen_core::Env;
/// use lumen_value::{Object, Symbol};
///
/// let env = Env::new();
/// env.define(Symbol::new("x"), Object::Int(42));
///
/// let child = env.child();
/// child.define(Symbol::new("x"), Object::Int(100));
/// assert_eq!(child.resolve(&Symbol::new("x")), Some(Object::Int(100)));
/// assert_eq!(env.resolve(&Symbol::new("x")), Some(Object::Int(42)));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<Symbol, Object>,
    parent: Option<Env>,
    registry: NamespaceRegistry,
}

impl Env {
    /// Create a root environment with a fresh namespace registry.
    pub fn new() -> Self {
        Env::with_registry(NamespaceRegistry::new())
    }

    /// Create a root environment over an existing registry.
    pub fn with_registry(registry: NamespaceRegistry) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
                registry,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        let registry = self.registry();
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
                registry,
            })),
        }
    }

    pub fn registry(&self) -> NamespaceRegistry {
        self.inner.borrow().registry.clone()
    }

    /// Define a binding in this frame (not the parent).
    pub fn define(&self, sym: Symbol, val: Object) {
        self.inner.borrow_mut().bindings.insert(sym, val);
    }

    /// Look up a lexical binding in this frame or the parent chain.
    /// Iterative, so deep chains cannot overflow the stack.
    pub fn lookup(&self, sym: &Symbol) -> Option<Object> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(sym) {
                return Some(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            current = parent?;
        }
    }

    /// The var a symbol names in the namespace registry, bound or not.
    pub fn resolve_var(&self, sym: &Symbol) -> Option<Var> {
        self.registry().resolve(sym)
    }

    /// Resolve a symbol to a value: lexical bindings first (unqualified
    /// symbols only), then vars. A var with no value does not resolve.
    pub fn resolve(&self, sym: &Symbol) -> Option<Object> {
        if sym.namespace().is_none() {
            if let Some(val) = self.lookup(sym) {
                return Some(val);
            }
        }
        self.resolve_var(sym)?.value()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
