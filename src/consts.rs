// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! Fixed parameters of RC6-32.

/// ODD((E - 2) * (1 << 32))
pub const P32: u32 = 0xB7E15163;

/// ODD((PHI - 1) * (1 << 32))
pub const Q32: u32 = 0x9E3779B9;

/// Width of a word in bits.
pub const WORD_BITS: u32 = u32::BITS;

/// log2 of [WORD_BITS], the fixed rotation applied after the quadratic function.
pub const LG_W: u32 = 5;

/// Number of words in a block.
pub const WORDS_PER_BLOCK: usize = 4;

/// Size of a block in bytes.
pub const BLOCK_SIZE: usize = WORDS_PER_BLOCK * std::mem::size_of::<u32>();

/// Number of rounds used by [crate::RC6::default].
pub const DEFAULT_ROUNDS: u8 = 20;

/// Largest supported number of rounds.
pub const MAX_ROUNDS: u8 = 125;
