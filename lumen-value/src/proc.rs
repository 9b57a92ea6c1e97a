// lumen-value - Native procedures
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Library functions implemented in Rust, plus argument-checking helpers
//! for writing them.

use std::fmt;
use std::rc::Rc;

use crate::capability::Callable;
use crate::error::{Error, Result};
use crate::object::Object;

/// Signature of a native function body.
pub type NativeFn = dyn Fn(&[Object]) -> Result<Object>;

/// A named native function. Two procs are equal only when they wrap the same
/// function allocation.
#[derive(Clone)]
pub struct Proc {
    name: Rc<str>,
    func: Rc<NativeFn>,
}

impl Proc {
    pub fn new(name: &str, func: impl Fn(&[Object]) -> Result<Object> + 'static) -> Self {
        Proc {
            name: Rc::from(name),
            func: Rc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ptr_eq(&self, other: &Proc) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }

    pub(crate) fn fn_ptr(&self) -> usize {
        Rc::as_ptr(&self.func) as *const () as usize
    }
}

impl Callable for Proc {
    fn call(&self, args: &[Object]) -> Result<Object> {
        (self.func)(args)
    }
}

impl fmt::Display for Proc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<proc {}>", self.name)
    }
}

impl fmt::Debug for Proc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#<proc {}>", self.name)
    }
}

/// Fail unless exactly `expected` arguments were passed.
pub fn check_arity(args: &[Object], name: &str, expected: usize) -> Result<()> {
    if args.len() != expected {
        return Err(Error::arity_named(name, expected, args.len()));
    }
    Ok(())
}

/// Borrow argument `index` as a string.
pub fn ensure_string<'a>(args: &'a [Object], index: usize, name: &str) -> Result<&'a str> {
    match args.get(index) {
        Some(Object::String(s)) => Ok(s),
        Some(other) => Err(Error::type_error_in(name, "String", other.type_name())),
        None => Err(Error::arity_named(name, index + 1, args.len())),
    }
}
