// lumen-core - Evaluator and environment for the Lumen runtime
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # lumen-core
//!
//! Tree-walking evaluator for already-parsed Lumen expressions.
//! Values and their operations live in `lumen-value`; this crate adds the
//! AST, lexical environments, namespaces, and the builtin set.

pub mod ast;
pub mod builtins;
pub mod env;
pub mod eval;
pub mod namespace;

pub use ast::Expr;
pub use builtins::register_builtins;
pub use env::Env;
pub use eval::{get_eval_depth, get_max_eval_depth, set_max_eval_depth, to_bool, try_eval};
pub use namespace::{Namespace, NamespaceRegistry};

// Re-export value types for convenience
pub use lumen_value::{Error, Object, Position, Result, Symbol, Var};
