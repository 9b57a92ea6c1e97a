// lumen-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared builders and assertions for Lumen integration tests.
//!
//! There is no reader in this workspace, so tests build [`Expr`] trees
//! directly. Every builder takes its source position as `(line, column)`.
//!
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

pub use lumen_core::{Env, Error, Expr, Object, Position, Symbol, Var, register_builtins, try_eval};

pub fn pos(line: u32, column: u32) -> Position {
    Position::new(line, column)
}

/// A fresh environment with builtins registered.
#[must_use]
pub fn new_env() -> Env {
    let env = Env::new();
    register_builtins(&env);
    env
}

pub fn int(n: i64, at: (u32, u32)) -> Expr {
    Expr::literal(n, pos(at.0, at.1))
}

pub fn kw(name: &str, at: (u32, u32)) -> Expr {
    Expr::literal(Object::keyword(name), pos(at.0, at.1))
}

pub fn string(s: &str, at: (u32, u32)) -> Expr {
    Expr::literal(Object::string(s), pos(at.0, at.1))
}

pub fn nil(at: (u32, u32)) -> Expr {
    Expr::literal(Object::Nil, pos(at.0, at.1))
}

pub fn sym(name: &str, at: (u32, u32)) -> Expr {
    Expr::symbol(name, pos(at.0, at.1))
}

pub fn call(callable: Expr, args: Vec<Expr>, at: (u32, u32)) -> Expr {
    Expr::call(callable, args, pos(at.0, at.1))
}

pub fn map(entries: Vec<(Expr, Expr)>, at: (u32, u32)) -> Expr {
    Expr::Map {
        entries,
        pos: pos(at.0, at.1),
    }
}

pub fn vector(items: Vec<Expr>, at: (u32, u32)) -> Expr {
    Expr::Vector {
        items,
        pos: pos(at.0, at.1),
    }
}

pub fn set(items: Vec<Expr>, at: (u32, u32)) -> Expr {
    Expr::Set {
        items,
        pos: pos(at.0, at.1),
    }
}

pub fn do_block(body: Vec<Expr>, at: (u32, u32)) -> Expr {
    Expr::Do {
        body,
        pos: pos(at.0, at.1),
    }
}

/// Evaluate in a fresh environment, turning errors into their display form.
pub fn eval_expr(expr: &Expr) -> Result<Object, String> {
    eval_expr_with_env(expr, &new_env())
}

pub fn eval_expr_with_env(expr: &Expr, env: &Env) -> Result<Object, String> {
    try_eval(expr, env).map_err(|e| e.to_string())
}

/// Assert that an expression evaluates to an expected value.
#[macro_export]
macro_rules! assert_eval {
    ($expr:expr, $expected:expr) => {
        { let __expr = $expr; match common::eval_expr(&__expr) {
            Ok(val) => pretty_assertions::assert_eq!(val, $expected, "evaluating {:?}", __expr),
            Err(e) => panic!("evaluating {:?} failed: {}", __expr, e),
        } }
    };
    ($expr:expr, $expected:expr, $env:expr) => {
        { let __expr = $expr; match common::eval_expr_with_env(&__expr, $env) {
            Ok(val) => pretty_assertions::assert_eq!(val, $expected, "evaluating {:?}", __expr),
            Err(e) => panic!("evaluating {:?} failed: {}", __expr, e),
        } }
    };
}

/// Assert that an expression fails with a message containing `$needle`.
#[macro_export]
macro_rules! assert_eval_err {
    ($expr:expr, $needle:expr) => {
        { let __expr = $expr; match common::eval_expr(&__expr) {
            Ok(val) => panic!("expected error for {:?}, got {}", __expr, val),
            Err(msg) => assert!(
                msg.contains($needle),
                "error should contain '{}', got: {}",
                $needle,
                msg
            ),
        } }
    };
}
