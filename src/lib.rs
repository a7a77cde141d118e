// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! This library provides an implementation of the RC6 block cipher algorithm
//!
//! RC6 is a symmetric-key block cipher derived from RC5 and submitted to the AES competition.
//! It operates on 128-bit blocks split into four 32-bit words, accepts a variable-length key
//! and a variable number of rounds (0 to 125 here, 20 by default).
//!
//! On top of the RC5 key expansion it adds an integer multiplication, `f(x) = x * (2x + 1)`,
//! which is used to derive the data-dependent rotation amounts of every round.
//!
//! ```
//! use rc6::{RC6, RC6Algo};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rc6 = RC6::default();
//! rc6.init(b"sixteen byte key", 128)?;
//!
//! let original = *b"attack at dawn!!";
//! let mut block = original;
//! rc6.encrypt_block(&mut block)?;
//! assert_ne!(block, original);
//!
//! rc6.decrypt(&mut block[..])?;
//! assert_eq!(block, original);
//! # Ok(())
//! # }
//! ```
//!

mod algorithm;
pub mod consts;
mod key_schedule;
mod word;

pub use crate::algorithm::*;
