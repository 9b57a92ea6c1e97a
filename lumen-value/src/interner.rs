// lumen-value - Shared name interner for symbols and keywords
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Process-wide interning of `(namespace, name)` pairs.
//!
//! Symbols and keywords wrap the same interned [`QualifiedName`], so equality
//! is a pointer comparison. Interned names are never freed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug)]
pub(crate) struct QualifiedName {
    pub(crate) namespace: Option<Box<str>>,
    pub(crate) name: Box<str>,
}

type NameKey = (Option<Box<str>>, Box<str>);

static NAMES: OnceLock<Mutex<HashMap<NameKey, Arc<QualifiedName>>>> = OnceLock::new();

pub(crate) fn intern(namespace: Option<&str>, name: &str) -> Arc<QualifiedName> {
    let mut names = NAMES
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .expect("Name interner mutex poisoned: another thread panicked while holding the lock");
    let key = (namespace.map(Box::from), Box::from(name));
    names
        .entry(key)
        .or_insert_with_key(|(namespace, name)| {
            Arc::new(QualifiedName {
                namespace: namespace.clone(),
                name: name.clone(),
            })
        })
        .clone()
}

/// Split `ns/name` at the first slash. A lone `/` (the division symbol) and
/// names with nothing before or after the slash are left unqualified.
pub(crate) fn split_qualified(s: &str) -> (Option<&str>, &str) {
    match s.find('/') {
        Some(pos) if pos > 0 && pos + 1 < s.len() => (Some(&s[..pos]), &s[pos + 1..]),
        _ => (None, s),
    }
}
