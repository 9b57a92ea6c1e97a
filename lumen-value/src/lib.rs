// lumen-value - Value model for the Lumen runtime
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # lumen-value
//!
//! The closed set of runtime values (`Object`), the sequence and map engines
//! built on them, and the error type shared with the evaluator.
//!
//! Values are reference counted and use interior mutability for vars and
//! lazy seqs, so they are confined to the thread that created them.

mod interner;

pub mod capability;
pub mod error;
pub mod hash;
pub mod info;
pub mod keyword;
pub mod lazy;
pub mod map;
pub mod object;
pub mod proc;
pub mod seq;
pub mod set;
pub mod settings;
pub mod symbol;
pub mod var;
pub mod vector;

pub use capability::{Associative, Callable, Counted, Seqable, Sequential};
pub use error::{AritySpec, Error, Position, Result};
pub use hash::{hash_ordered, hash_unordered, mix_coll_hash};
pub use info::{Info, Meta};
pub use keyword::Keyword;
pub use lazy::LazySeq;
pub use map::{
    ArrayMap, ArrayMapIter, ArrayMapSeq, Map, Pair, array_seq_from_array_map, map_equals,
    map_to_string, safe_merge,
};
pub use object::Object;
pub use proc::{NativeFn, Proc, check_arity, ensure_string};
pub use seq::{
    ArraySeq, ConsSeq, EmptyList, Seq, SeqIter, fourth, is_seq_equal, second, seq_count,
    seq_nth, seq_to_string, seq_try_nth, seqs_equal, third, to_vec,
};
pub use set::Set;
pub use settings::{get_print_length, set_print_length};
pub use symbol::Symbol;
pub use var::Var;
pub use vector::{Vector, VectorSeq};
