// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The RC6 key schedule: expands a variable-length key into `2 * r + 4` round key words.
//!

use crate::consts::{P32, Q32, WORD_BITS};
use crate::word::rotl;
use std::cmp::max;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// The expanded key table `S`, split the way the rounds consume it.
///
/// The words are wiped when the value is dropped.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct RoundKeys {
    /// `S[0]`, `S[1]`: added to `B` and `D` before the first round
    pub(crate) whiten_in: [u32; 2],
    /// `S[2]..S[2 * r + 2]`, consumed two words per round
    rounds: Box<[u32]>,
    /// `S[2 * r + 2]`, `S[2 * r + 3]`: added to `A` and `C` after the last round
    pub(crate) whiten_out: [u32; 2],
}

impl RoundKeys {
    /// Expands `key` into the round key table for `rounds` rounds.
    ///
    /// Only the first `key_bits` bits of `key` are used. The caller guarantees that
    /// `key_bits > 0` and that `key` holds at least `key_bits` bits.
    pub(crate) fn expand(key: &[u8], key_bits: u16, rounds: u8) -> RoundKeys {
        let mut l_arr = load_key_words(key, key_bits);
        let mut s_arr = init_s_array(rounds);

        mix_sl_arrays(&mut s_arr, &mut l_arr);

        RoundKeys::split(&s_arr)
    }

    /// Number of words in the table, `2 * r + 4`.
    pub(crate) fn len(&self) -> usize {
        self.rounds.len() + 4
    }

    /// The `[S[2 * i], S[2 * i + 1]]` pairs for rounds `i = 1..=r`, in order.
    pub(crate) fn round_pairs(&self) -> impl DoubleEndedIterator<Item = (u32, u32)> + '_ {
        self.rounds.chunks_exact(2).map(|pair| (pair[0], pair[1]))
    }

    fn split(s_arr: &[u32]) -> RoundKeys {
        // the table always has 2 * r + 4 >= 4 words
        let tail = s_arr.len() - 2;
        RoundKeys {
            whiten_in: [s_arr[0], s_arr[1]],
            rounds: s_arr[2..tail].into(),
            whiten_out: [s_arr[tail], s_arr[tail + 1]],
        }
    }
}

/// Packs the key into `c = ceil(key_bits / 32)` little-endian words `L`.
///
/// Only whole bytes are loaded. A trailing partial byte is cleared with a byte wide mask,
/// so it never contributes to the schedule.
fn load_key_words(key: &[u8], key_bits: u16) -> Zeroizing<Vec<u32>> {
    let bits = usize::from(key_bits);
    let c = bits.div_ceil(WORD_BITS as usize);
    let mut l_arr = Zeroizing::new(vec![0u32; c]);

    for (i, byte) in key.iter().take(bits / 8).enumerate() {
        l_arr[i / 4] |= u32::from(*byte) << (8 * (i % 4));
    }

    if bits % 8 != 0 {
        l_arr[c - 1] &= !(0xFFu32 << (8 * (bits / 8 % 4)));
    }

    l_arr
}

/// `S[0] = P`, `S[i] = S[i - 1] + Q`
fn init_s_array(rounds: u8) -> Zeroizing<Vec<u32>> {
    let t = 2 * usize::from(rounds) + 4;
    let s = std::iter::successors(Some(P32), |x| Some(x.wrapping_add(Q32))).take(t);

    Zeroizing::new(s.collect())
}

fn mix_sl_arrays(s_arr: &mut [u32], l_arr: &mut [u32]) {
    let total_count = 3 * max(s_arr.len(), l_arr.len());
    let indices = (0..s_arr.len()).cycle().zip((0..l_arr.len()).cycle());

    let mut a = 0u32;
    let mut b = 0u32;
    for (i, j) in indices.take(total_count) {
        // A = S[i] = (S[i] + A + B) <<< 3
        s_arr[i] = rotl(s_arr[i].wrapping_add(a).wrapping_add(b), 3);
        a = s_arr[i];
        // B = L[j] = (L[j] + A + B) <<< (A + B)
        let ab = a.wrapping_add(b);
        l_arr[j] = rotl(l_arr[j].wrapping_add(ab), ab);
        b = l_arr[j];
    }
}
