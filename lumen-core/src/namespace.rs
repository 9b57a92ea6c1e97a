// lumen-core - Namespaces and the namespace registry
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Namespaces map names to [`Var`]s. The registry owns every namespace and
//! tracks which one is current; unqualified global lookups go through it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use lumen_value::{Object, Proc, Result, Symbol, Var};

/// A named collection of vars, plus vars referred from other namespaces.
#[derive(Debug, Clone)]
pub struct Namespace {
    inner: Rc<RefCell<NamespaceInner>>,
}

#[derive(Debug)]
struct NamespaceInner {
    name: Rc<str>,
    vars: HashMap<String, Var>,
    refers: HashMap<String, Var>,
}

impl Namespace {
    pub fn new(name: &str) -> Self {
        Namespace {
            inner: Rc::new(RefCell::new(NamespaceInner {
                name: Rc::from(name),
                vars: HashMap::new(),
                refers: HashMap::new(),
            })),
        }
    }

    #[must_use]
    pub fn name(&self) -> Rc<str> {
        Rc::clone(&self.inner.borrow().name)
    }

    /// The var named `name`, created unbound if it does not exist yet.
    pub fn intern(&self, name: &str) -> Var {
        let mut inner = self.inner.borrow_mut();
        if let Some(var) = inner.vars.get(name) {
            return var.clone();
        }
        let var = Var::new(Some(&*inner.name), Symbol::new(name));
        inner.vars.insert(name.to_string(), var.clone());
        var
    }

    /// Intern `name` and bind it to `value`, replacing any existing binding.
    pub fn intern_with_value(&self, name: &str, value: Object) -> Var {
        let var = self.intern(name);
        var.bind(value);
        var
    }

    /// Intern a native function under `name`.
    pub fn define_native(
        &self,
        name: &str,
        func: impl Fn(&[Object]) -> Result<Object> + 'static,
    ) -> Var {
        self.intern_with_value(name, Object::Proc(Proc::new(name, func)))
    }

    /// A var interned in this namespace. Refers are not consulted.
    #[must_use]
    pub fn find_var(&self, name: &str) -> Option<Var> {
        self.inner.borrow().vars.get(name).cloned()
    }

    /// Resolve an unqualified symbol against own vars, then refers.
    #[must_use]
    pub fn resolve(&self, sym: &Symbol) -> Option<Var> {
        let inner = self.inner.borrow();
        inner
            .vars
            .get(sym.name())
            .or_else(|| inner.refers.get(sym.name()))
            .cloned()
    }

    /// Make `var` visible here under `name`.
    pub fn refer(&self, name: &str, var: Var) {
        self.inner.borrow_mut().refers.insert(name.to_string(), var);
    }

    /// Refer every var interned in `other`.
    pub fn refer_all(&self, other: &Namespace) {
        let vars = other.vars();
        let mut inner = self.inner.borrow_mut();
        for (name, var) in vars {
            inner.refers.insert(name, var);
        }
    }

    #[must_use]
    pub fn vars(&self) -> HashMap<String, Var> {
        self.inner.borrow().vars.clone()
    }
}

impl PartialEq for Namespace {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Every namespace, by name, and the current one.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

#[derive(Debug)]
struct RegistryInner {
    namespaces: HashMap<String, Namespace>,
    current: Rc<str>,
}

impl NamespaceRegistry {
    pub const CORE_NS: &'static str = "lumen.core";
    pub const USER_NS: &'static str = "user";

    /// A registry holding `lumen.core` and `user`, with `user` current.
    pub fn new() -> Self {
        let mut namespaces = HashMap::new();
        for name in [Self::CORE_NS, Self::USER_NS] {
            namespaces.insert(name.to_string(), Namespace::new(name));
        }
        NamespaceRegistry {
            inner: Rc::new(RefCell::new(RegistryInner {
                namespaces,
                current: Rc::from(Self::USER_NS),
            })),
        }
    }

    /// The namespace called `name`, created empty if missing.
    pub fn ensure_namespace(&self, name: &str) -> Namespace {
        let mut inner = self.inner.borrow_mut();
        inner
            .namespaces
            .entry(name.to_string())
            .or_insert_with(|| Namespace::new(name))
            .clone()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<Namespace> {
        self.inner.borrow().namespaces.get(name).cloned()
    }

    #[must_use]
    pub fn current_name(&self) -> Rc<str> {
        Rc::clone(&self.inner.borrow().current)
    }

    pub fn current(&self) -> Namespace {
        let name = self.current_name();
        self.ensure_namespace(&name)
    }

    /// Switch the current namespace, creating it if needed.
    pub fn set_current(&self, name: &str) -> Namespace {
        let ns = self.ensure_namespace(name);
        self.inner.borrow_mut().current = Rc::from(name);
        ns
    }

    /// Resolve a symbol to a var: a qualified symbol through its named
    /// namespace, otherwise through the current namespace.
    #[must_use]
    pub fn resolve(&self, sym: &Symbol) -> Option<Var> {
        match sym.namespace() {
            Some(ns) => self.find(ns)?.find_var(sym.name()),
            None => self.current().resolve(sym),
        }
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
