// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Word level helpers: rotations, the quadratic round function and conversion between
//! a byte block and its little-endian words.
//!

use crate::consts::{BLOCK_SIZE, LG_W, WORDS_PER_BLOCK, WORD_BITS};

/// Rotates `x` left by `amount`, only the low `lg w` bits of `amount` are significant.
#[inline]
pub fn rotl(x: u32, amount: u32) -> u32 {
    x.rotate_left(rotation_amount(amount))
}

/// Rotates `x` right by `amount`, only the low `lg w` bits of `amount` are significant.
#[inline]
pub fn rotr(x: u32, amount: u32) -> u32 {
    x.rotate_right(rotation_amount(amount))
}

/// `f(x) = x * (2x + 1) mod 2^w`, rotated left by `lg w`.
#[inline]
pub fn quadratic(x: u32) -> u32 {
    rotl(x.wrapping_mul(x.wrapping_mul(2).wrapping_add(1)), LG_W)
}

/// Splits a block into its four little-endian words `A, B, C, D`.
pub fn load_block(block: &[u8; BLOCK_SIZE]) -> [u32; WORDS_PER_BLOCK] {
    std::array::from_fn(|i| {
        let at = i * 4;
        u32::from_le_bytes([block[at], block[at + 1], block[at + 2], block[at + 3]])
    })
}

/// Writes the four words back into the block, little-endian.
pub fn store_block(words: &[u32; WORDS_PER_BLOCK], block: &mut [u8; BLOCK_SIZE]) {
    for (bytes, word) in block.chunks_exact_mut(4).zip(words) {
        bytes.copy_from_slice(&word.to_le_bytes());
    }
}

fn rotation_amount(x: u32) -> u32 {
    x % WORD_BITS
}
