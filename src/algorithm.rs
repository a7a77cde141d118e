// Copyright (c) 2023 Boris Onchev (boris.oncev@gmail.com)
//
// Distributed under the Boost Software License, Version 1.0. (See accompanying
// file LICENSE or copy at http://www.boost.org/LICENSE_1_0.txt)

//! The implementaton details of the RC6 block cipher algorithm
//!
use crate::consts::{BLOCK_SIZE, DEFAULT_ROUNDS, MAX_ROUNDS, WORDS_PER_BLOCK};
use crate::key_schedule::RoundKeys;
use crate::word::*;

/// The RC6 struct represents an instance of the RC6-32 block cipher algorithm.
///
/// An instance is created with a fixed number of rounds and holds no key until
/// [RC6::init] is called. After that it can encrypt and decrypt any number of
/// 16 byte blocks.
///
/// `RC6` is deliberately neither `Clone` nor `Copy`: the expanded key only ever
/// lives in one place and is wiped when the instance is dropped or re-keyed.
/// Ownership can be moved freely.
pub struct RC6 {
    rounds: u8,
    round_keys: Option<RoundKeys>,
}

impl RC6 {
    /// Creates a new, uninitialized RC6 instance performing `rounds` rounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6InitError};
    ///
    /// let rc6 = RC6::new(12).unwrap();
    /// assert_eq!(rc6.rounds(), 12);
    /// assert!(!rc6.is_initialized());
    ///
    /// assert!(matches!(RC6::new(126), Err(RC6InitError::InvalidRounds(126))));
    /// ```
    pub fn new(rounds: u8) -> Result<RC6, RC6InitError> {
        validate_rounds(rounds)?;

        Ok(RC6 {
            rounds,
            round_keys: None,
        })
    }

    /// Creates a new RC6 instance with `rounds` rounds, keyed with all the bits of `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::RC6;
    ///
    /// let key = b"my secret key";
    /// let rc6 = RC6::new_with_key(key, 20).unwrap();
    /// assert!(rc6.is_initialized());
    /// ```
    pub fn new_with_key(key: &[u8], rounds: u8) -> Result<RC6, RC6InitError> {
        let key_bits = key
            .len()
            .checked_mul(8)
            .and_then(|bits| u16::try_from(bits).ok())
            .ok_or(RC6InitError::InvalidKeySize(key.len()))?;

        let mut rc6 = RC6::new(rounds)?;
        rc6.init(key, key_bits)?;

        Ok(rc6)
    }

    /// The number of rounds this instance performs.
    pub fn rounds(&self) -> u8 {
        self.rounds
    }

    /// Returns `true` once a key schedule has been installed by [RC6::init].
    pub fn is_initialized(&self) -> bool {
        self.round_keys.is_some()
    }

    /// Expands the first `key_bits` bits of `key` into the round keys.
    ///
    /// Calling it again replaces the previous key schedule as a whole. On error the
    /// instance is left exactly as it was.
    ///
    /// Only whole bytes of the key take part in the schedule, the bits of a trailing
    /// partial byte are cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::{RC6, RC6InitError};
    ///
    /// # fn main() -> Result<(), RC6InitError> {
    /// let mut rc6 = RC6::default();
    /// rc6.init(&[0; 24], 192)?;
    /// assert!(rc6.is_initialized());
    ///
    /// assert!(matches!(rc6.init(&[], 128), Err(RC6InitError::EmptyKey)));
    /// assert!(rc6.is_initialized());
    /// # Ok(())
    /// # }
    /// ```
    pub fn init(&mut self, key: &[u8], key_bits: u16) -> Result<(), RC6InitError> {
        validate_key(key, key_bits).inspect_err(|err| log::trace!("rejected RC6 key: {err}"))?;
        validate_rounds(self.rounds)?;

        let round_keys = RoundKeys::expand(key, key_bits, self.rounds);
        log::debug!(
            "{} RC6 key schedule: {} rounds, {} bit key, {} round key words",
            if self.is_initialized() { "replaced" } else { "installed" },
            self.rounds,
            key_bits,
            round_keys.len()
        );
        self.round_keys = Some(round_keys);

        Ok(())
    }

    /// Encrypts the four-word block `[A, B, C, D]` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::RC6;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let rc6 = RC6::new_with_key(&[0; 16], 20)?;
    ///
    /// let mut words = [0; 4];
    /// rc6.encrypt_words(&mut words)?;
    ///
    /// assert_eq!(words, [0x36A5C38F, 0x78F7B156, 0x4EDF29C1, 0x1EA44898]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn encrypt_words(&self, words: &mut [u32; WORDS_PER_BLOCK]) -> Result<(), RC6AlgoError> {
        let keys = self.round_keys()?;
        let [mut a, mut b, mut c, mut d] = *words;

        b = b.wrapping_add(keys.whiten_in[0]);
        d = d.wrapping_add(keys.whiten_in[1]);

        for (s1, s2) in keys.round_pairs() {
            let t = quadratic(b);
            let u = quadratic(d);
            // A = ((A ^ t) <<< u) + S[2 * i]
            // C = ((C ^ u) <<< t) + S[2 * i + 1]
            a = rotl(a ^ t, u).wrapping_add(s1);
            c = rotl(c ^ u, t).wrapping_add(s2);

            (a, b, c, d) = (b, c, d, a);
        }

        a = a.wrapping_add(keys.whiten_out[0]);
        c = c.wrapping_add(keys.whiten_out[1]);

        *words = [a, b, c, d];
        Ok(())
    }

    /// Encrypts a 16 byte block in place.
    ///
    /// The block is read as four little-endian words and written back the same way.
    /// If the instance is not initialized the block is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::RC6;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let key = [
    ///     0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0x01, 0x12, 0x23, 0x34, 0x45, 0x56,
    ///     0x67, 0x78,
    /// ];
    /// let rc6 = RC6::new_with_key(&key, 20)?;
    ///
    /// let mut block = [
    ///     0x02, 0x13, 0x24, 0x35, 0x46, 0x57, 0x68, 0x79, 0x8A, 0x9B, 0xAC, 0xBD, 0xCE, 0xDF,
    ///     0xE0, 0xF1,
    /// ];
    /// rc6.encrypt_block(&mut block)?;
    ///
    /// assert_eq!(
    ///     block,
    ///     [
    ///         0x52, 0x4E, 0x19, 0x2F, 0x47, 0x15, 0xC6, 0x23, 0x1F, 0x51, 0xF6, 0x36, 0x7E, 0xA4,
    ///         0x3F, 0x18,
    ///     ]
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn encrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) -> Result<(), RC6AlgoError> {
        let mut words = load_block(block);

        self.encrypt_words(&mut words)?;

        store_block(&words, block);
        Ok(())
    }

    /// Decrypts the four-word block `[A, B, C, D]` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::RC6;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let rc6 = RC6::new_with_key(&[0; 16], 20)?;
    ///
    /// let mut words = [0x36A5C38F, 0x78F7B156, 0x4EDF29C1, 0x1EA44898];
    /// rc6.decrypt_words(&mut words)?;
    ///
    /// assert_eq!(words, [0; 4]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn decrypt_words(&self, words: &mut [u32; WORDS_PER_BLOCK]) -> Result<(), RC6AlgoError> {
        let keys = self.round_keys()?;
        let [mut a, mut b, mut c, mut d] = *words;

        c = c.wrapping_sub(keys.whiten_out[1]);
        a = a.wrapping_sub(keys.whiten_out[0]);

        for (s1, s2) in keys.round_pairs().rev() {
            (a, b, c, d) = (d, a, b, c);

            let u = quadratic(d);
            let t = quadratic(b);
            // C = ((C - S[2 * i + 1]) >>> t) ^ u
            // A = ((A - S[2 * i]) >>> u) ^ t
            c = rotr(c.wrapping_sub(s2), t) ^ u;
            a = rotr(a.wrapping_sub(s1), u) ^ t;
        }

        d = d.wrapping_sub(keys.whiten_in[1]);
        b = b.wrapping_sub(keys.whiten_in[0]);

        *words = [a, b, c, d];
        Ok(())
    }

    /// Decrypts a 16 byte block in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use rc6::RC6;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let rc6 = RC6::new_with_key(&[0; 16], 20)?;
    ///
    /// let mut block = [
    ///     0x8F, 0xC3, 0xA5, 0x36, 0x56, 0xB1, 0xF7, 0x78, 0xC1, 0x29, 0xDF, 0x4E, 0x98, 0x48,
    ///     0xA4, 0x1E,
    /// ];
    /// rc6.decrypt_block(&mut block)?;
    ///
    /// assert_eq!(block, [0; 16]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn decrypt_block(&self, block: &mut [u8; BLOCK_SIZE]) -> Result<(), RC6AlgoError> {
        let mut words = load_block(block);

        self.decrypt_words(&mut words)?;

        store_block(&words, block);
        Ok(())
    }

    fn round_keys(&self) -> Result<&RoundKeys, RC6AlgoError> {
        self.round_keys.as_ref().ok_or(RC6AlgoError::NotInitialized)
    }
}

impl Default for RC6 {
    /// An uninitialized instance performing the recommended 20 rounds.
    fn default() -> Self {
        RC6 {
            rounds: DEFAULT_ROUNDS,
            round_keys: None,
        }
    }
}

impl std::fmt::Debug for RC6 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RC6")
            .field("rounds", &self.rounds)
            .field("initialized", &self.is_initialized())
            .finish_non_exhaustive()
    }
}

fn validate_rounds(rounds: u8) -> Result<(), RC6InitError> {
    if rounds > MAX_ROUNDS {
        return Err(RC6InitError::InvalidRounds(rounds));
    }

    Ok(())
}

fn validate_key(key: &[u8], key_bits: u16) -> Result<(), RC6InitError> {
    if key.is_empty() {
        return Err(RC6InitError::EmptyKey);
    }

    if key_bits == 0 {
        return Err(RC6InitError::ZeroKeyLength);
    }

    if key.len() < usize::from(key_bits).div_ceil(8) {
        return Err(RC6InitError::KeyTooShort {
            bits: key_bits,
            len: key.len(),
        });
    }

    Ok(())
}

/// The class of a failure, regardless of which operation reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed a malformed argument: a round count, key or block.
    InvalidArgument,
    /// A block operation was attempted before a key was installed.
    NotInitialized,
}

/// The `RC6InitError` enum represents the possible errors that can occur during the
/// [RC6] construction and keying
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RC6InitError {
    #[error("invalid number of rounds `{0}`; supported range is [0, 125]")]
    InvalidRounds(u8),
    #[error("key cannot be empty")]
    EmptyKey,
    #[error("key length cannot be zero")]
    ZeroKeyLength,
    #[error("key length of `{bits}` bits does not fit in the provided `{len}` key bytes")]
    KeyTooShort { bits: u16, len: usize },
    #[error("invalid key size: `{0}`; supported range is [1, 8191] bytes")]
    InvalidKeySize(usize),
}

impl RC6InitError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

/// The `RC6AlgoError` enum represents the possible errors that can occur during the
/// encryption decryption with [RC6].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RC6AlgoError {
    #[error("RC6 not initialized")]
    NotInitialized,
    #[error("invalid input block size `{0}`, expected a `16` byte block")]
    InvalidBlockSize(usize),
}

impl RC6AlgoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RC6AlgoError::NotInitialized => ErrorKind::NotInitialized,
            RC6AlgoError::InvalidBlockSize(_) => ErrorKind::InvalidArgument,
        }
    }
}

/// The `RC6Algo` trait provides methods for encrypting and decrypting a block held in a
/// runtime sized buffer, validating its length first.
pub trait RC6Algo {
    /// Encrypts the given 16 bytes in place.
    ///
    /// Returns a reference to the encrypted bytes on success, or an [RC6AlgoError] if
    /// the encryption failed, in which case the bytes are unchanged.
    fn encrypt<'a>(&self, bytes: &'a mut [u8]) -> Result<&'a mut [u8], RC6AlgoError>;
    /// Decrypts the given 16 bytes in place.
    ///
    /// Returns a reference to the decrypted bytes on success, or an [RC6AlgoError] if
    /// the decryption failed, in which case the bytes are unchanged.
    fn decrypt<'a>(&self, bytes: &'a mut [u8]) -> Result<&'a mut [u8], RC6AlgoError>;
}

impl RC6Algo for RC6 {
    fn encrypt<'a>(&self, bytes: &'a mut [u8]) -> Result<&'a mut [u8], RC6AlgoError> {
        self.encrypt_block(try_into_block(bytes)?)?;

        Ok(bytes)
    }

    fn decrypt<'a>(&self, bytes: &'a mut [u8]) -> Result<&'a mut [u8], RC6AlgoError> {
        self.decrypt_block(try_into_block(bytes)?)?;

        Ok(bytes)
    }
}

fn try_into_block(bytes: &mut [u8]) -> Result<&mut [u8; BLOCK_SIZE], RC6AlgoError> {
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| RC6AlgoError::InvalidBlockSize(len))
}
