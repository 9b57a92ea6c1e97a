// lumen-value - Structural hashing
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Hash codes for values.
//!
//! Primitives go through `FxHasher`. Collections fold their element hashes
//! (ordered or unordered) and then mix in the element count, so `[1 2]`,
//! `(1 2)` and a lazy seq of the same elements all hash alike.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::error::Result;
use crate::seq::Seq;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

pub(crate) fn hash_primitive<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    let h = hasher.finish();
    (h ^ (h >> 32)) as u32
}

/// Order-sensitive fold: `h = 31 * h + hash(x)`, starting from 1.
pub fn hash_ordered(seq: &Seq) -> Result<u32> {
    let mut h: u32 = 1;
    let mut n: u32 = 0;
    for item in seq.iter() {
        h = h.wrapping_mul(31).wrapping_add(item?.hash_code()?);
        n = n.wrapping_add(1);
    }
    Ok(mix_coll_hash(h, n))
}

/// Permutation-invariant sum of element hashes, starting from `seed`.
pub fn hash_unordered(seq: &Seq, seed: u32) -> Result<u32> {
    let mut h = seed;
    let mut n: u32 = 0;
    for item in seq.iter() {
        h = h.wrapping_add(item?.hash_code()?);
        n = n.wrapping_add(1);
    }
    Ok(mix_coll_hash(h, n))
}

/// Murmur3 finalisation of a collection hash with its element count.
pub fn mix_coll_hash(hash: u32, count: u32) -> u32 {
    let h1 = mix_h1(0, mix_k1(hash));
    fmix(h1, count)
}

fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

fn mix_h1(h1: u32, k1: u32) -> u32 {
    (h1 ^ k1)
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

fn fmix(h1: u32, length: u32) -> u32 {
    let mut h = h1 ^ length;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
