// lumen-core - Error message quality tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error messages name the offending value, use one consistent
//! `line:col: Eval error: message` shape, and carry arity and type context.

mod common;

use common::*;
use lumen_value::{ArraySeq, LazySeq, Seq, check_arity, seq_nth};

/// An environment with `nth` over a fixed three-element seq and a lazy seq
/// whose producer fails.
fn env_with_seq_fns() -> Env {
    let env = new_env();
    let ns = env.registry().current();
    ns.define_native("nth3", |args| {
        check_arity(args, "nth3", 1)?;
        let seq: Seq = ArraySeq::new(vec![Object::Int(1), Object::Int(2), Object::Int(3)]).into();
        seq_nth(&seq, *args[0].as_int()?)
    });
    ns.define_native("broken-lazy", |args| {
        check_arity(args, "broken-lazy", 0)?;
        let lazy = LazySeq::from_fn(|| Ok(Object::Int(5)));
        let seq: Seq = lazy.into();
        seq.first()
    });
    env
}

macro_rules! assert_message {
    ($env:expr, $expr:expr, $expected:expr) => {
        let err = try_eval(&$expr, $env).unwrap_err();
        pretty_assertions::assert_eq!(err.to_string(), $expected);
    };
}

#[test]
fn test_index_messages() {
    let env = env_with_seq_fns();
    assert_message!(
        &env,
        call(sym("nth3", (1, 2)), vec![int(-1, (1, 7))], (1, 1)),
        "1:1: Eval error: Negative index: -1"
    );
    assert_message!(
        &env,
        call(sym("nth3", (2, 2)), vec![int(3, (2, 7))], (2, 1)),
        "2:1: Eval error: Index 3 exceeds seq's length 3"
    );
}

#[test]
fn test_arity_message() {
    let env = env_with_seq_fns();
    assert_message!(
        &env,
        call(sym("nth3", (1, 2)), vec![], (1, 1)),
        "1:1: Eval error: Wrong number of arguments to 'nth3': expected 1, got 0"
    );
}

#[test]
fn test_type_message() {
    let env = env_with_seq_fns();
    assert_message!(
        &env,
        call(sym("nth3", (1, 2)), vec![kw("x", (1, 7))], (1, 1)),
        "1:1: Eval error: Expected Int, got Keyword"
    );
}

#[test]
fn test_lazy_producer_must_return_seqable() {
    let env = env_with_seq_fns();
    assert_message!(
        &env,
        call(sym("broken-lazy", (1, 2)), vec![], (1, 1)),
        "1:1: Eval error: lazy-seq: expected seqable, got Int"
    );
}

#[test]
fn test_map_call_arity() {
    let m = map(vec![], (1, 2));
    assert_eval_err!(
        call(m, vec![], (1, 1)),
        "Wrong number of arguments to 'map': expected 1 to 2, got 0"
    );
}

#[test]
fn test_messages_render_values_unescaped() {
    let dup = map(
        vec![(string("k", (1, 2)), int(1, (1, 6))), (string("k", (1, 8)), int(2, (1, 12)))],
        (1, 1),
    );
    assert_eval_err!(dup, "Duplicate key: k");
}
