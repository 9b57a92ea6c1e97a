// lumen-value - Vars: named mutable cells
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::map::ArrayMap;
use crate::object::Object;
use crate::symbol::Symbol;

struct VarCell {
    value: RefCell<Option<Object>>,
    meta: RefCell<Option<ArrayMap>>,
}

/// A named storage cell, usually interned in a namespace.
///
/// A var starts unbound. Clones share the cell, and two vars are equal only
/// when they are the same cell. The cell is written without synchronization;
/// `Var` is `!Send`.
#[derive(Clone)]
pub struct Var {
    ns: Option<Rc<str>>,
    name: Symbol,
    cell: Rc<VarCell>,
}

impl Var {
    /// Create an unbound var.
    pub fn new(ns: Option<&str>, name: Symbol) -> Self {
        Var {
            ns: ns.map(Rc::from),
            name,
            cell: Rc::new(VarCell {
                value: RefCell::new(None),
                meta: RefCell::new(None),
            }),
        }
    }

    pub fn with_value(ns: Option<&str>, name: Symbol, value: Object) -> Self {
        let var = Var::new(ns, name);
        var.bind(value);
        var
    }

    pub fn namespace(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    pub fn name(&self) -> &Symbol {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        match &self.ns {
            Some(ns) => format!("{}/{}", ns, self.name),
            None => self.name.to_string(),
        }
    }

    /// The bound value, or `None` while unbound.
    pub fn value(&self) -> Option<Object> {
        self.cell.value.borrow().clone()
    }

    /// The bound value, failing with `UnboundVar` while unbound.
    pub fn deref(&self) -> Result<Object> {
        self.value()
            .ok_or_else(|| Error::UnboundVar(self.to_string()))
    }

    pub fn is_bound(&self) -> bool {
        self.cell.value.borrow().is_some()
    }

    pub fn bind(&self, value: Object) {
        *self.cell.value.borrow_mut() = Some(value);
    }

    pub fn meta(&self) -> Option<ArrayMap> {
        self.cell.meta.borrow().clone()
    }

    pub fn set_meta(&self, meta: Option<ArrayMap>) {
        *self.cell.meta.borrow_mut() = meta;
    }

    pub(crate) fn cell_ptr(&self) -> usize {
        Rc::as_ptr(&self.cell) as usize
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#'{}", self.qualified_name())
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#'{}", self.qualified_name())
    }
}

impl PartialEq for Var {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl Eq for Var {}
