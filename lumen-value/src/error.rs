// lumen-value - Error type shared by the runtime crates
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Errors raised by value operations and by evaluation.
//!
//! Every failure is one [`Error`] variant. The evaluator stamps errors with
//! the source [`Position`] of the node they escaped from, wrapping them in
//! [`Error::Positioned`]; use [`Error::kind`] to match on the underlying
//! variant regardless of wrapping.

use std::fmt;

use thiserror::Error;

/// Result type for Lumen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A line/column location in the source text that produced an AST node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Specification for expected arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
    Range(usize, usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "at least {}", n),
            AritySpec::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

/// Errors that can occur while manipulating values or evaluating expressions.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A resolved var was dereferenced before anything was bound to it
    #[error("Unbound var: {0}")]
    UnboundVar(String),
    /// A symbol had no binding in the environment
    #[error("Unable to resolve symbol: {0} in this context")]
    UnresolvedSymbol(String),
    /// A map literal repeated a key
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    /// A set literal repeated an element
    #[error("Duplicate set element: {0}")]
    DuplicateSetElement(String),
    /// The head of a call evaluated to something that cannot be invoked
    #[error("{0} is not callable")]
    NotCallable(String),
    /// Positional access outside a sequence; `length` is unknown for negative indices
    #[error("{}", index_message(.index, .length))]
    IndexOutOfRange { index: i64, length: Option<usize> },
    /// An argument had the wrong shape for the operation (e.g. map conj)
    #[error("{0}")]
    InvalidArgument(String),
    /// Metadata was attached to a value that cannot carry it
    #[error("{0} does not support metadata")]
    MetaUnsupported(String),
    /// A library function rejected its input (e.g. bad base64)
    #[error("{0}")]
    MalformedInput(String),
    /// Wrong number of arguments to a function
    #[error("{}", arity_message(.expected, .got, .name))]
    ArityError {
        expected: AritySpec,
        got: usize,
        name: Option<String>,
    },
    /// Wrong type for an operation
    #[error("{}", type_message(.expected, .got, .context))]
    TypeError {
        expected: &'static str,
        got: &'static str,
        context: Option<String>,
    },
    /// Evaluation nested deeper than the configured maximum
    #[error("Stack overflow: maximum eval depth ({0}) exceeded")]
    DepthExceeded(usize),
    /// An error annotated with the position of the node that failed
    #[error("{position}: Eval error: {source}")]
    Positioned {
        position: Position,
        source: Box<Error>,
    },
}

fn index_message(index: &i64, length: &Option<usize>) -> String {
    match length {
        Some(length) => format!("Index {} exceeds seq's length {}", index, length),
        None => format!("Negative index: {}", index),
    }
}

fn arity_message(expected: &AritySpec, got: &usize, name: &Option<String>) -> String {
    match name {
        Some(name) => format!(
            "Wrong number of arguments to '{}': expected {}, got {}",
            name, expected, got
        ),
        None => format!(
            "Wrong number of arguments: expected {}, got {}",
            expected, got
        ),
    }
}

fn type_message(expected: &&'static str, got: &&'static str, context: &Option<String>) -> String {
    match context {
        Some(ctx) => format!("{}: expected {}, got {}", ctx, expected, got),
        None => format!("Expected {}, got {}", expected, got),
    }
}

impl Error {
    /// Create an arity error for exact arity with function name.
    pub fn arity_named(name: impl Into<String>, expected: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(expected),
            got,
            name: Some(name.into()),
        }
    }

    /// Create an arity error for an inclusive range with function name.
    pub fn arity_range(name: impl Into<String>, min: usize, max: usize, got: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Range(min, max),
            got,
            name: Some(name.into()),
        }
    }

    /// Create a type error.
    pub fn type_error(expected: &'static str, got: &'static str) -> Self {
        Error::TypeError {
            expected,
            got,
            context: None,
        }
    }

    /// Create a type error with context.
    pub fn type_error_in(
        context: impl Into<String>,
        expected: &'static str,
        got: &'static str,
    ) -> Self {
        Error::TypeError {
            expected,
            got,
            context: Some(context.into()),
        }
    }

    /// Attach a source position. An error that already has one keeps it,
    /// so the innermost failing node wins.
    #[must_use]
    pub fn at(self, position: Position) -> Self {
        match self {
            Error::Positioned { .. } => self,
            other => Error::Positioned {
                position,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any position wrapper removed.
    pub fn kind(&self) -> &Error {
        match self {
            Error::Positioned { source, .. } => source.kind(),
            other => other,
        }
    }

    /// The source position attached by the evaluator, if any.
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Positioned { position, .. } => Some(*position),
            _ => None,
        }
    }
}
