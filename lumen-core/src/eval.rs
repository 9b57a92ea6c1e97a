// lumen-core - Tree-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Evaluation of [`Expr`] trees.
//!
//! Errors propagate with `?`. Each node stamps escaping errors with its own
//! position unless an inner node already did, so the innermost failing node
//! is reported. Nesting is bounded by a thread-local depth limit, and the
//! native stack grows on demand so that limit is reached before the stack
//! runs out.

use std::cell::Cell;

use tracing::{debug, trace};

use lumen_value::{ArrayMap, Error, Meta, Object, Result, Set, Vector};

use crate::ast::Expr;
use crate::env::Env;

const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

/// Grow the stack when less than this remains.
const STACK_RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const STACK_GROWTH: usize = 2 * 1024 * 1024;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum nesting depth for eval. Returns the previous value.
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval nesting depth.
#[inline]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// Get the current eval nesting depth.
#[inline]
pub fn get_eval_depth() -> usize {
    EVAL_DEPTH.with(|d| d.get())
}

/// Holds one level of eval depth; released on drop, including on error.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let max = get_max_eval_depth();
        let current = EVAL_DEPTH.with(|d| {
            let current = d.get() + 1;
            d.set(current);
            current
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::DepthExceeded(max))
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

/// `nil` and `false` are false; every other value is true.
pub fn to_bool(obj: &Object) -> bool {
    !matches!(obj, Object::Nil | Object::Bool(false))
}

/// Evaluate a top-level expression.
///
/// The single entry point for callers: it never panics on an evaluation
/// failure and leaves no state to reset afterwards.
pub fn try_eval(expr: &Expr, env: &Env) -> Result<Object> {
    expr.eval(env).inspect_err(|e| {
        debug!(error = %e, "evaluation failed");
    })
}

impl Expr {
    #[must_use = "eval returns a value that should be used"]
    pub fn eval(&self, env: &Env) -> Result<Object> {
        let pos = self.position();
        let _guard = EvalDepthGuard::new().map_err(|e| e.at(pos))?;
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH, || self.eval_node(env))
            .map_err(|e| e.at(pos))
    }

    fn eval_node(&self, env: &Env) -> Result<Object> {
        match self {
            Expr::Literal { value, .. } => Ok(value.clone()),

            Expr::Ref { var, .. } => var.deref(),

            Expr::Var { symbol, .. } => env
                .resolve(symbol)
                .ok_or_else(|| Error::UnresolvedSymbol(symbol.to_string())),

            Expr::Vector { items, .. } => {
                let mut result = Vector::new();
                for item in items {
                    result = result.conj(item.eval(env)?);
                }
                Ok(Object::Vector(result))
            }

            Expr::Map { entries, .. } => {
                let mut result = ArrayMap::new();
                for (key_expr, value_expr) in entries {
                    let key = key_expr.eval(env)?;
                    let value = value_expr.eval(env)?;
                    if !result.add(key.clone(), value)? {
                        return Err(Error::DuplicateKey(key.to_string()));
                    }
                }
                Ok(Object::Map(result))
            }

            Expr::Set { items, .. } => {
                let mut result = Set::new();
                for item in items {
                    let element = item.eval(env)?;
                    if !result.add(element.clone())? {
                        return Err(Error::DuplicateSetElement(element.to_string()));
                    }
                }
                Ok(Object::Set(result))
            }

            Expr::Def {
                var, value, meta, ..
            } => {
                if let Some(value) = value {
                    var.bind(value.eval(env)?);
                }
                if let Some(meta) = meta {
                    let meta = eval_meta_map(meta, env, "def")?;
                    var.set_meta(Some(meta));
                }
                debug!(var = %var, bound = var.is_bound(), "defined var");
                Ok(Object::Var(var.clone()))
            }

            Expr::Meta { meta, expr, .. } => {
                let meta = eval_meta_map(meta, env, "with-meta")?;
                let value = expr.eval(env)?;
                value.with_meta(&meta)
            }

            Expr::Call { callable, args, .. } => {
                let target = callable.eval(env)?;
                if !target.is_callable() {
                    return Err(Error::NotCallable(target.to_string()).at(callable.position()));
                }
                let args = args
                    .iter()
                    .map(|arg| arg.eval(env))
                    .collect::<Result<Vec<_>>>()?;
                trace!(callee = %target, argc = args.len(), "call");
                target.call(&args)
            }

            Expr::Do { body, .. } => {
                let mut result = Object::Nil;
                for expr in body {
                    result = expr.eval(env)?;
                }
                Ok(result)
            }

            Expr::If {
                cond,
                positive,
                negative,
                ..
            } => {
                if to_bool(&cond.eval(env)?) {
                    positive.eval(env)
                } else {
                    match negative {
                        Some(negative) => negative.eval(env),
                        None => Ok(Object::Nil),
                    }
                }
            }
        }
    }
}

/// Evaluate a metadata expression, which must produce a map.
fn eval_meta_map(expr: &Expr, env: &Env, context: &str) -> Result<ArrayMap> {
    match expr.eval(env)? {
        Object::Map(map) => Ok(map),
        other => Err(Error::type_error_in(context, "ArrayMap", other.type_name()).at(expr.position())),
    }
}
