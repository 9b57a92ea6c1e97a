// lumen-value - The universal value type
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `Object` is the closed set of runtime values.
//!
//! Every variant renders, compares, hashes and reports its type name. The
//! capabilities of the concrete types (seq view, count, metadata, calling)
//! are exposed here as queries matching over the variants.

use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::capability::{Callable, Counted, Seqable};
use crate::error::{Error, Position, Result};
use crate::hash::{self, hash_ordered, hash_unordered};
use crate::info::Meta;
use crate::keyword::Keyword;
use crate::map::{ArrayMap, map_equals, map_to_string};
use crate::proc::Proc;
use crate::seq::{ArraySeq, EmptyList, Seq, is_seq_equal, seq_to_string};
use crate::set::Set;
use crate::settings::get_print_length;
use crate::symbol::Symbol;
use crate::var::Var;
use crate::vector::Vector;

/// A Lumen runtime value.
#[derive(Clone)]
pub enum Object {
    Nil,
    Bool(bool),
    Int(i64),
    Double(f64),
    Char(char),
    String(Rc<str>),
    Keyword(Keyword),
    Symbol(Symbol),
    Vector(Vector),
    Map(ArrayMap),
    Set(Set),
    Seq(Seq),
    Var(Var),
    Proc(Proc),
}

impl Object {
    pub fn string(s: &str) -> Object {
        Object::String(Rc::from(s))
    }

    pub fn keyword(name: &str) -> Object {
        Object::Keyword(Keyword::parse(name))
    }

    pub fn symbol(name: &str) -> Object {
        Object::Symbol(Symbol::parse(name))
    }

    /// Name of the concrete type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Nil => "Nil",
            Object::Bool(_) => "Bool",
            Object::Int(_) => "Int",
            Object::Double(_) => "Double",
            Object::Char(_) => "Char",
            Object::String(_) => "String",
            Object::Keyword(_) => "Keyword",
            Object::Symbol(_) => "Symbol",
            Object::Vector(_) => "Vector",
            Object::Map(_) => "ArrayMap",
            Object::Set(_) => "Set",
            Object::Seq(s) => s.type_name(),
            Object::Var(_) => "Var",
            Object::Proc(_) => "Proc",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Object::Nil)
    }

    /// Structural equality.
    ///
    /// Sequential values compare element-wise regardless of representation,
    /// which may realize lazy seqs; a failed realization is returned as the
    /// error. `Int` and `Double` never compare equal to each other.
    pub fn equals(&self, other: &Object) -> Result<bool> {
        match (self, other) {
            (Object::Nil, Object::Nil) => Ok(true),
            (Object::Bool(a), Object::Bool(b)) => Ok(a == b),
            (Object::Int(a), Object::Int(b)) => Ok(a == b),
            (Object::Double(a), Object::Double(b)) => Ok(a == b),
            (Object::Char(a), Object::Char(b)) => Ok(a == b),
            (Object::String(a), Object::String(b)) => Ok(a == b),
            (Object::Keyword(a), Object::Keyword(b)) => Ok(a == b),
            (Object::Symbol(a), Object::Symbol(b)) => Ok(a == b),
            (Object::Vector(v), other) => v.equals(other),
            (Object::Seq(s), other) => is_seq_equal(s, other),
            (Object::Map(m), other) => map_equals(m, other),
            (Object::Set(s), other) => s.equals(other),
            (Object::Var(a), Object::Var(b)) => Ok(a == b),
            (Object::Proc(a), Object::Proc(b)) => Ok(a.ptr_eq(b)),
            _ => Ok(false),
        }
    }

    /// Printed form. With `escape`, strings are quoted and characters use
    /// reader syntax.
    pub fn render(&self, escape: bool) -> Result<String> {
        let mut out = String::new();
        self.write_to(&mut out, escape)?;
        Ok(out)
    }

    pub(crate) fn write_to(&self, out: &mut String, escape: bool) -> Result<()> {
        match self {
            Object::Nil => out.push_str("nil"),
            Object::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Object::Int(n) => out.push_str(&n.to_string()),
            Object::Double(d) => out.push_str(&format_double(*d)),
            Object::Char(c) => {
                if escape {
                    out.push('\\');
                    out.push_str(&format_char(*c));
                } else {
                    out.push(*c);
                }
            }
            Object::String(s) => {
                if escape {
                    out.push('"');
                    out.push_str(&escape_string(s));
                    out.push('"');
                } else {
                    out.push_str(s);
                }
            }
            Object::Keyword(k) => out.push_str(&k.to_string()),
            Object::Symbol(s) => out.push_str(&s.to_string()),
            Object::Vector(v) => {
                out.push('[');
                write_limited(out, v.items().iter().cloned().map(Ok), " ", |out, item| {
                    item.write_to(out, escape)
                })?;
                out.push(']');
            }
            Object::Map(m) => out.push_str(&map_to_string(m, escape)?),
            Object::Set(s) => {
                out.push_str("#{");
                write_limited(out, s.items().iter().cloned().map(Ok), " ", |out, item| {
                    item.write_to(out, escape)
                })?;
                out.push('}');
            }
            Object::Seq(s) => out.push_str(&seq_to_string(s, escape)?),
            Object::Var(v) => out.push_str(&v.to_string()),
            Object::Proc(p) => out.push_str(&p.to_string()),
        }
        Ok(())
    }

    /// Structural hash, consistent with [`Object::equals`].
    pub fn hash_code(&self) -> Result<u32> {
        match self {
            Object::Nil => Ok(0),
            Object::Bool(true) => Ok(1231),
            Object::Bool(false) => Ok(1237),
            Object::Int(n) => Ok(hash::hash_primitive(n)),
            Object::Double(d) => {
                // 0.0 == -0.0
                let bits = if *d == 0.0 { 0 } else { d.to_bits() };
                Ok(hash::hash_primitive(&bits))
            }
            Object::Char(c) => Ok(hash::hash_primitive(c)),
            Object::String(s) => Ok(hash::hash_primitive(&**s)),
            // Keywords and symbols share interned names; tag them apart.
            Object::Keyword(k) => Ok(hash::hash_primitive(&(b':', k))),
            Object::Symbol(s) => Ok(hash::hash_primitive(&(b'\'', s))),
            Object::Vector(v) => hash_ordered(&v.seq()),
            Object::Map(m) => hash_unordered(&m.seq(), 1),
            Object::Set(s) => hash_unordered(&s.seq(), 0),
            Object::Seq(s) => hash_ordered(s),
            Object::Var(v) => Ok(hash::hash_primitive(&v.cell_ptr())),
            Object::Proc(p) => Ok(hash::hash_primitive(&p.fn_ptr())),
        }
    }

    /// Seq view of a seqable value. `nil` and empty collections give the
    /// empty list.
    pub fn seq(&self) -> Option<Seq> {
        match self {
            Object::Nil => Some(EmptyList::new().into()),
            Object::String(s) => {
                if s.is_empty() {
                    Some(EmptyList::new().into())
                } else {
                    Some(ArraySeq::new(s.chars().map(Object::Char).collect()).into())
                }
            }
            Object::Vector(v) => Some(v.seq()),
            Object::Map(m) => Some(m.seq()),
            Object::Set(s) => Some(s.seq()),
            Object::Seq(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Element count for values that know it without walking.
    pub fn count(&self) -> Option<usize> {
        match self {
            Object::Vector(v) => Some(v.count()),
            Object::Map(m) => Some(m.count()),
            Object::Set(s) => Some(s.count()),
            Object::Seq(s) => s.counted(),
            _ => None,
        }
    }

    pub fn is_sequential(&self) -> bool {
        matches!(self, Object::Vector(_) | Object::Seq(_))
    }

    /// The same value with `meta` merged into its metadata.
    pub fn with_meta(&self, meta: &ArrayMap) -> Result<Object> {
        match self {
            Object::Vector(v) => Ok(Object::Vector(v.with_meta(meta))),
            Object::Map(m) => Ok(Object::Map(m.with_meta(meta))),
            Object::Set(s) => Ok(Object::Set(s.with_meta(meta))),
            Object::Seq(s) => Ok(Object::Seq(s.with_meta(meta))),
            other => Err(Error::MetaUnsupported(other.type_name().to_string())),
        }
    }

    pub fn meta(&self) -> Option<&ArrayMap> {
        match self {
            Object::Vector(v) => v.meta(),
            Object::Map(m) => m.meta(),
            Object::Set(s) => s.meta(),
            Object::Seq(s) => s.meta(),
            _ => None,
        }
    }

    /// Source position recorded when the value was read, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            Object::Vector(v) => v.position(),
            Object::Map(m) => m.position(),
            Object::Set(s) => s.position(),
            Object::Seq(s) => s.position(),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Object::Proc(_) | Object::Map(_) | Object::Vector(_) | Object::Set(_)
        )
    }

    /// Apply a callable value to `args`.
    pub fn call(&self, args: &[Object]) -> Result<Object> {
        match self {
            Object::Proc(p) => p.call(args),
            Object::Map(m) => m.call(args),
            Object::Vector(v) => v.call(args),
            Object::Set(s) => s.call(args),
            other => Err(Error::NotCallable(other.to_string())),
        }
    }
}

macro_rules! typed_accessors {
    ($($name:ident => $variant:ident($ty:ty), $label:literal;)*) => {
        impl Object {
            $(
                #[doc = concat!("Borrow the payload of a `", $label, "`, or fail with a type error.")]
                pub fn $name(&self) -> Result<&$ty> {
                    match self {
                        Object::$variant(v) => Ok(v),
                        other => Err(Error::type_error($label, other.type_name())),
                    }
                }
            )*
        }
    };
}

typed_accessors! {
    as_bool => Bool(bool), "Bool";
    as_int => Int(i64), "Int";
    as_double => Double(f64), "Double";
    as_char => Char(char), "Char";
    as_string => String(Rc<str>), "String";
    as_keyword => Keyword(Keyword), "Keyword";
    as_symbol => Symbol(Symbol), "Symbol";
    as_vector => Vector(Vector), "Vector";
    as_map => Map(ArrayMap), "ArrayMap";
    as_set => Set(Set), "Set";
    as_seq => Seq(Seq), "Seq";
    as_var => Var(Var), "Var";
    as_proc => Proc(Proc), "Proc";
}

/// Write `items` separated by `sep`, stopping with `...` once the
/// thread-local print length is reached.
pub(crate) fn write_limited<T>(
    out: &mut String,
    items: impl Iterator<Item = Result<T>>,
    sep: &str,
    mut write_item: impl FnMut(&mut String, T) -> Result<()>,
) -> Result<()> {
    let limit = get_print_length();
    for (i, item) in items.enumerate() {
        if limit.is_some_and(|n| i >= n) {
            if i > 0 {
                out.push(' ');
            }
            out.push_str("...");
            break;
        }
        if i > 0 {
            out.push_str(sep);
        }
        write_item(out, item?)?;
    }
    Ok(())
}

fn format_double(n: f64) -> String {
    if n.is_nan() {
        "##NaN".to_string()
    } else if n.is_infinite() {
        let s = if n > 0.0 { "##Inf" } else { "##-Inf" };
        s.to_string()
    } else if n.fract() == 0.0 {
        format!("{}.0", n)
    } else {
        n.to_string()
    }
}

fn format_char(c: char) -> String {
    match c {
        '\n' => "newline".to_string(),
        ' ' => "space".to_string(),
        '\t' => "tab".to_string(),
        '\r' => "return".to_string(),
        '\x08' => "backspace".to_string(),
        '\x0C' => "formfeed".to_string(),
        _ => c.to_string(),
    }
}

fn escape_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\n' => result.push_str("\\n"),
            '\t' => result.push_str("\\t"),
            '\r' => result.push_str("\\r"),
            '\\' => result.push_str("\\\\"),
            '"' => result.push_str("\\\""),
            _ => result.push(c),
        }
    }
    result
}

impl fmt::Display for Object {
    /// `{}` renders for display, `{:#}` renders readably (escaped).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.render(f.alternate()) {
            Ok(s) => f.write_str(&s),
            Err(e) => write!(f, "#<error: {}>", e),
        }
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self)
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match self.equals(other) {
            Ok(eq) => eq,
            Err(e) => {
                warn!(error = %e, "equality comparison failed; treating values as unequal");
                false
            }
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Bool(b)
    }
}

impl From<i64> for Object {
    fn from(n: i64) -> Self {
        Object::Int(n)
    }
}

impl From<f64> for Object {
    fn from(d: f64) -> Self {
        Object::Double(d)
    }
}

impl From<&str> for Object {
    fn from(s: &str) -> Self {
        Object::string(s)
    }
}

impl From<Vector> for Object {
    fn from(v: Vector) -> Self {
        Object::Vector(v)
    }
}

impl From<ArrayMap> for Object {
    fn from(m: ArrayMap) -> Self {
        Object::Map(m)
    }
}

impl From<Set> for Object {
    fn from(s: Set) -> Self {
        Object::Set(s)
    }
}

impl From<Seq> for Object {
    fn from(s: Seq) -> Self {
        Object::Seq(s)
    }
}

impl From<Var> for Object {
    fn from(v: Var) -> Self {
        Object::Var(v)
    }
}

impl From<Proc> for Object {
    fn from(p: Proc) -> Self {
        Object::Proc(p)
    }
}
