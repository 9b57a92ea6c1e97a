// lumen-core - Abstract syntax tree consumed by the evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Already-parsed expression nodes. A reader (not part of this crate)
//! builds them; [`Expr::eval`](crate::eval) runs them.
//!
//! Every node records the source position it was read from, which the
//! evaluator attaches to errors escaping that node.

use lumen_value::{Object, Position, Symbol, Var};

#[derive(Debug, Clone)]
pub enum Expr {
    /// A constant, returned unchanged.
    Literal { value: Object, pos: Position },
    /// A var resolved when the tree was built.
    Ref { var: Var, pos: Position },
    /// A symbol resolved against the environment at evaluation time.
    Var { symbol: Symbol, pos: Position },
    Vector { items: Vec<Expr>, pos: Position },
    Map {
        entries: Vec<(Expr, Expr)>,
        pos: Position,
    },
    Set { items: Vec<Expr>, pos: Position },
    Def {
        var: Var,
        value: Option<Box<Expr>>,
        meta: Option<Box<Expr>>,
        pos: Position,
    },
    /// `^meta expr`
    Meta {
        meta: Box<Expr>,
        expr: Box<Expr>,
        pos: Position,
    },
    Call {
        callable: Box<Expr>,
        args: Vec<Expr>,
        pos: Position,
    },
    Do { body: Vec<Expr>, pos: Position },
    If {
        cond: Box<Expr>,
        positive: Box<Expr>,
        negative: Option<Box<Expr>>,
        pos: Position,
    },
}

impl Expr {
    pub fn position(&self) -> Position {
        match self {
            Expr::Literal { pos, .. }
            | Expr::Ref { pos, .. }
            | Expr::Var { pos, .. }
            | Expr::Vector { pos, .. }
            | Expr::Map { pos, .. }
            | Expr::Set { pos, .. }
            | Expr::Def { pos, .. }
            | Expr::Meta { pos, .. }
            | Expr::Call { pos, .. }
            | Expr::Do { pos, .. }
            | Expr::If { pos, .. } => *pos,
        }
    }

    pub fn literal(value: impl Into<Object>, pos: Position) -> Expr {
        Expr::Literal {
            value: value.into(),
            pos,
        }
    }

    pub fn reference(var: Var, pos: Position) -> Expr {
        Expr::Ref { var, pos }
    }

    pub fn symbol(name: &str, pos: Position) -> Expr {
        Expr::Var {
            symbol: Symbol::parse(name),
            pos,
        }
    }

    pub fn call(callable: Expr, args: Vec<Expr>, pos: Position) -> Expr {
        Expr::Call {
            callable: Box::new(callable),
            args,
            pos,
        }
    }

    pub fn if_else(cond: Expr, positive: Expr, negative: Option<Expr>, pos: Position) -> Expr {
        Expr::If {
            cond: Box::new(cond),
            positive: Box::new(positive),
            negative: negative.map(Box::new),
            pos,
        }
    }

    pub fn def(var: Var, value: Option<Expr>, meta: Option<Expr>, pos: Position) -> Expr {
        Expr::Def {
            var,
            value: value.map(Box::new),
            meta: meta.map(Box::new),
            pos,
        }
    }

    pub fn with_meta(meta: Expr, expr: Expr, pos: Position) -> Expr {
        Expr::Meta {
            meta: Box::new(meta),
            expr: Box::new(expr),
            pos,
        }
    }
}
