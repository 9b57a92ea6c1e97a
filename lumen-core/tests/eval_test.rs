// lumen-core - Evaluator integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

mod common;

use common::*;
use lumen_core::{Namespace, get_eval_depth, set_max_eval_depth};
use lumen_value::{ArrayMap, LazySeq, Map, Set, Vector};

// =============================================================================
// Literals and collections
// =============================================================================

#[test]
fn test_literal_is_returned_unchanged() {
    assert_eval!(int(42, (1, 1)), Object::Int(42));
    assert_eval!(string("hi", (1, 1)), Object::string("hi"));
    assert_eval!(nil((1, 1)), Object::Nil);
}

#[test]
fn test_vector_evaluates_items_in_order() {
    let expr = vector(vec![int(1, (1, 2)), int(2, (1, 4)), kw("x", (1, 6))], (1, 1));
    let expected = Vector::from_vec(vec![Object::Int(1), Object::Int(2), Object::keyword("x")]);
    assert_eval!(expr, Object::Vector(expected));
}

#[test]
fn test_map_literal() {
    let expr = map(
        vec![(kw("a", (1, 2)), int(1, (1, 5))), (kw("b", (1, 7)), int(2, (1, 10)))],
        (1, 1),
    );
    let result = eval_expr(&expr).unwrap();
    let m = result.as_map().unwrap();
    assert_eq!(m.get(&Object::keyword("a")), Some(&Object::Int(1)));
    assert_eq!(m.get(&Object::keyword("b")), Some(&Object::Int(2)));
}

#[test]
fn test_duplicate_map_key() {
    let expr = map(
        vec![(kw("a", (1, 2)), int(1, (1, 5))), (kw("a", (1, 7)), int(2, (1, 10)))],
        (1, 1),
    );
    let err = try_eval(&expr, &new_env()).unwrap_err();
    assert!(matches!(err.kind(), Error::DuplicateKey(_)));
    pretty_assertions::assert_eq!(err.to_string(), "1:1: Eval error: Duplicate key: :a");
}

#[test]
fn test_set_literal_and_duplicate() {
    let ok = set(vec![int(1, (1, 3)), int(2, (1, 5))], (1, 1));
    let expected = Set::new().conj(Object::Int(1)).conj(Object::Int(2));
    assert_eval!(ok, Object::Set(expected));

    let dup = set(vec![int(1, (2, 3)), int(1, (2, 5))], (2, 1));
    assert_eval_err!(dup, "2:1: Eval error: Duplicate set element: 1");
}

// =============================================================================
// If / Do
// =============================================================================

#[test]
fn test_if_truthiness() {
    let p = pos(1, 1);
    assert_eval!(
        Expr::if_else(nil((1, 5)), int(1, (1, 9)), Some(int(2, (1, 11))), p),
        Object::Int(2)
    );
    assert_eval!(
        Expr::if_else(int(0, (1, 5)), int(1, (1, 7)), Some(int(2, (1, 9))), p),
        Object::Int(1)
    );
    assert_eval!(
        Expr::if_else(Expr::literal(false, p), int(1, (1, 7)), None, p),
        Object::Nil
    );
}

#[test]
fn test_if_only_evaluates_taken_branch() {
    let env = new_env();
    let var = env.registry().current().intern("touched");
    let branch = Expr::def(var.clone(), Some(int(1, (1, 20))), None, pos(1, 10));
    let expr = Expr::if_else(nil((1, 5)), branch, None, pos(1, 1));
    assert_eval!(expr, Object::Nil, &env);
    assert!(!var.is_bound());
}

#[test]
fn test_do_returns_last_value() {
    assert_eval!(do_block(vec![], (1, 1)), Object::Nil);
    assert_eval!(
        do_block(vec![int(1, (1, 5)), int(2, (1, 7)), int(3, (1, 9))], (1, 1)),
        Object::Int(3)
    );
}

// =============================================================================
// Vars, refs and symbols
// =============================================================================

#[test]
fn test_ref_to_unbound_var() {
    let env = new_env();
    let var = env.registry().current().intern("foo");
    let expr = Expr::reference(var, pos(4, 2));
    let err = try_eval(&expr, &env).unwrap_err();
    assert!(matches!(err.kind(), Error::UnboundVar(name) if name.contains("foo")));
    pretty_assertions::assert_eq!(err.to_string(), "4:2: Eval error: Unbound var: #'user/foo");
}

#[test]
fn test_def_then_ref() {
    let env = new_env();
    let var = env.registry().current().intern("answer");
    let def = Expr::def(var.clone(), Some(int(42, (1, 13))), None, pos(1, 1));
    let result = try_eval(&def, &env).unwrap();
    assert_eq!(result, Object::Var(var.clone()));
    assert_eval!(Expr::reference(var, pos(2, 1)), Object::Int(42), &env);
    assert_eval!(sym("answer", (3, 1)), Object::Int(42), &env);
    assert_eval!(sym("user/answer", (3, 1)), Object::Int(42), &env);
}

#[test]
fn test_def_with_meta() {
    let env = new_env();
    let var = env.registry().current().intern("documented");
    let meta = map(vec![(kw("doc", (1, 8)), string("hello", (1, 13)))], (1, 7));
    let def = Expr::def(var.clone(), Some(int(1, (1, 30))), Some(meta), pos(1, 1));
    try_eval(&def, &env).unwrap();
    let stored = var.meta().unwrap();
    assert_eq!(stored.get(&Object::keyword("doc")), Some(&Object::string("hello")));
}

#[test]
fn test_def_without_value_leaves_var_unbound() {
    let env = new_env();
    let var = env.registry().current().intern("declared");
    try_eval(&Expr::def(var.clone(), None, None, pos(1, 1)), &env).unwrap();
    assert!(!var.is_bound());
}

#[test]
fn test_failed_def_keeps_previous_value() {
    let env = new_env();
    let var = env.registry().current().intern("stable");
    var.bind(Object::Int(7));
    let bad = Expr::def(var.clone(), Some(call(int(1, (1, 15)), vec![], (1, 14))), None, pos(1, 1));
    assert!(try_eval(&bad, &env).is_err());
    assert_eq!(var.value(), Some(Object::Int(7)));
}

#[test]
fn test_lexical_binding_shadows_var() {
    let env = new_env();
    env.registry().current().intern_with_value("x", Object::Int(1));
    let child = env.child();
    child.define(Symbol::new("x"), Object::Int(2));
    assert_eval!(sym("x", (1, 1)), Object::Int(2), &child);
    assert_eval!(sym("x", (1, 1)), Object::Int(1), &env);
}

#[test]
fn test_unresolved_symbol() {
    assert_eval_err!(
        sym("nope", (5, 3)),
        "5:3: Eval error: Unable to resolve symbol: nope in this context"
    );
}

// =============================================================================
// Metadata
// =============================================================================

#[test]
fn test_meta_attaches_to_collection() {
    let meta = map(vec![(kw("tag", (1, 3)), int(1, (1, 8)))], (1, 2));
    let target = vector(vec![int(1, (1, 12))], (1, 11));
    let expr = Expr::with_meta(meta, target, pos(1, 1));
    let result = eval_expr(&expr).unwrap();
    let attached = result.meta().unwrap();
    assert_eq!(attached.get(&Object::keyword("tag")), Some(&Object::Int(1)));
}

#[test]
fn test_meta_on_number_is_rejected() {
    let meta = map(vec![(kw("tag", (1, 3)), int(1, (1, 8)))], (1, 2));
    let expr = Expr::with_meta(meta, int(5, (1, 11)), pos(1, 1));
    assert_eval_err!(expr, "Int does not support metadata");
}

#[test]
fn test_meta_must_be_a_map() {
    let expr = Expr::with_meta(int(1, (1, 2)), vector(vec![], (1, 4)), pos(1, 1));
    assert_eval_err!(expr, "1:2: Eval error: with-meta: expected ArrayMap, got Int");
}

// =============================================================================
// Calls
// =============================================================================

#[test]
fn test_call_native() {
    let env = new_env();
    env.registry()
        .current()
        .define_native("inc", |args| Ok(Object::Int(args[0].as_int()? + 1)));
    let expr = call(sym("inc", (1, 2)), vec![int(41, (1, 6))], (1, 1));
    assert_eval!(expr, Object::Int(42), &env);
}

#[test]
fn test_call_collection_as_function() {
    let m = map(vec![(kw("a", (1, 3)), int(1, (1, 6)))], (1, 2));
    assert_eval!(call(m, vec![kw("a", (1, 10))], (1, 1)), Object::Int(1));

    let v = vector(vec![int(10, (2, 3)), int(20, (2, 6))], (2, 2));
    assert_eval!(call(v, vec![int(1, (2, 10))], (2, 1)), Object::Int(20));
}

#[test]
fn test_not_callable() {
    assert_eval_err!(
        call(int(1, (1, 2)), vec![], (1, 1)),
        "1:2: Eval error: 1 is not callable"
    );
    assert_eval_err!(
        call(string("s", (1, 2)), vec![], (1, 1)),
        "s is not callable"
    );
}

#[test]
fn test_callee_error_carries_call_position() {
    let env = new_env();
    let ns: Namespace = env.registry().current();
    ns.define_native("boom", |_| Err(Error::MalformedInput("boom".to_string())));
    let expr = call(sym("boom", (7, 2)), vec![], (7, 1));
    let err = try_eval(&expr, &env).unwrap_err();
    assert_eq!(err.position(), Some(pos(7, 1)));
}

#[test]
fn test_error_in_argument_keeps_innermost_position() {
    let env = new_env();
    env.registry().current().define_native("id", |args| Ok(args[0].clone()));
    let inner = call(int(2, (3, 9)), vec![], (3, 8));
    let expr = call(sym("id", (3, 2)), vec![inner], (3, 1));
    let err = try_eval(&expr, &env).unwrap_err();
    assert_eq!(err.position(), Some(pos(3, 9)));
}

#[test]
fn test_vector_index_out_of_range() {
    let v = vector(vec![int(1, (1, 3))], (1, 2));
    assert_eval_err!(
        call(v, vec![int(5, (1, 8))], (1, 1)),
        "Index 5 exceeds seq's length 1"
    );
}

// =============================================================================
// Depth limit
// =============================================================================

#[test]
fn test_deep_nesting_fails_cleanly() {
    let previous = set_max_eval_depth(64);
    let mut expr = int(1, (1, 1));
    for _ in 0..200 {
        expr = do_block(vec![expr], (1, 1));
    }
    let err = try_eval(&expr, &new_env()).unwrap_err();
    assert!(matches!(err.kind(), Error::DepthExceeded(64)));
    assert_eq!(get_eval_depth(), 0);

    // Still usable afterwards
    assert_eval!(do_block(vec![int(3, (1, 1))], (1, 1)), Object::Int(3));
    set_max_eval_depth(previous);
}

fn nested_do(levels: usize) -> Expr {
    let mut expr = int(1, (1, 1));
    for _ in 0..levels {
        expr = do_block(vec![expr], (1, 1));
    }
    expr
}

/// Take a nested `do` tree apart one level at a time so dropping it does
/// not recurse.
fn dismantle(mut expr: Expr) {
    while let Expr::Do { mut body, .. } = expr {
        match body.pop() {
            Some(inner) => expr = inner,
            None => break,
        }
    }
}

#[test]
fn test_default_depth_limit_fits_in_thread_stack() {
    let handle = std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(|| {
            let env = new_env();
            let max = lumen_core::get_max_eval_depth();

            let shallow = nested_do(max - 10);
            let ok = try_eval(&shallow, &env)
                .map(|v| v.to_string())
                .map_err(|e| e.to_string());
            dismantle(shallow);

            let deep = nested_do(max + 10);
            let err = try_eval(&deep, &env)
                .map(|v| v.to_string())
                .map_err(|e| e.kind().clone());
            dismantle(deep);

            (ok, err, get_eval_depth())
        })
        .unwrap();
    let (ok, err, depth_after) = handle.join().unwrap();
    assert_eq!(ok, Ok("1".to_string()));
    assert!(matches!(err, Err(Error::DepthExceeded(10_000))));
    assert_eq!(depth_after, 0);
}

#[test]
fn test_array_map_results_share_nothing_with_literal() {
    let expr = map(vec![(kw("a", (1, 2)), int(1, (1, 5)))], (1, 1));
    let env = new_env();
    let first = try_eval(&expr, &env).unwrap();
    let second = try_eval(&expr, &env).unwrap();
    let a: &ArrayMap = first.as_map().unwrap();
    let b: &ArrayMap = second.as_map().unwrap();
    assert!(!a.ptr_eq(b));
    assert_eq!(first, second);
}

// =============================================================================
// Failures while comparing literal keys
// =============================================================================

fn env_with_failing_lazy() -> Env {
    let env = new_env();
    env.registry().current().define_native("bad-lazy", |_| {
        let lazy = LazySeq::from_fn(|| Err(Error::MalformedInput("producer failed".to_string())));
        Ok(Object::Seq(lazy.into()))
    });
    env
}

#[test]
fn test_map_literal_propagates_key_comparison_failure() {
    let env = env_with_failing_lazy();
    let expr = map(
        vec![
            (vector(vec![int(1, (1, 3))], (1, 2)), int(1, (1, 6))),
            (call(sym("bad-lazy", (1, 9)), vec![], (1, 8)), int(2, (1, 19))),
        ],
        (1, 1),
    );
    let err = try_eval(&expr, &env).unwrap_err();
    assert!(matches!(err.kind(), Error::MalformedInput(msg) if msg == "producer failed"));
    assert_eq!(err.position(), Some(pos(1, 1)));
}

#[test]
fn test_set_literal_propagates_element_comparison_failure() {
    let env = env_with_failing_lazy();
    let expr = set(
        vec![
            vector(vec![int(1, (1, 4))], (1, 3)),
            call(sym("bad-lazy", (1, 8)), vec![], (1, 7)),
        ],
        (1, 1),
    );
    let err = try_eval(&expr, &env).unwrap_err();
    assert!(matches!(err.kind(), Error::MalformedInput(_)));
}
