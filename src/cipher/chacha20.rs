//! ChaCha20 keystream generator
//!
//! Implements the ChaCha20 block function of RFC 7539 as a
//! [`KeystreamBlock`] generator for the counter-mode driver.
//!
//! Two counter layouts are supported:
//! - the RFC 7539 layout: 32-bit block counter in word 12 and a 96-bit nonce
//!   in words 13..16;
//! - a large-counter layout, in which the counter also occupies word 13.
//!   With an 8-byte nonce this is Bernstein's 64-bit-counter ChaCha20; with
//!   a 12-byte nonce the first nonce word seeds the high counter word and
//!   the counter carries into it.
//!
//! The counter never wraps silently. Once the last block of the counter
//! range has been produced, the next request fails with
//! [`CryptoError::CounterExhausted`].

use tracing::error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ctr::{CtrCipher, KeystreamBlock};
use crate::error::{CryptoError, Result};

/// Keystream block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// Key size in bytes.
pub const KEY_LEN: usize = 32;

/// `"expand 32-byte k"` as little-endian words.
const CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

const NAME: &str = "ChaCha20 (RFC 7539)";
const NAME_LARGE: &str = "ChaCha20 (64-bit counter)";

/// ChaCha quarter round on words `a`, `b`, `c`, `d` of `state`.
///
/// Add, xor, rotate by 16, 12, 8 and 7 bits.
#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] ^= state[a];
    state[d] = state[d].rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] ^= state[c];
    state[b] = state[b].rotate_left(7);
}

/// Applies the 20-round ChaCha permutation in place.
///
/// Each of the 10 iterations is a double round: a column round over
/// `(0,4,8,12)..(3,7,11,15)` followed by a diagonal round over
/// `(0,5,10,15)..(3,4,9,14)`. The caller adds the input state back.
pub(crate) fn rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        // Column round
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        // Diagonal round
        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

/// Reads little-endian words from `src` into `dst`.
fn load_words(dst: &mut [u32], src: &[u8]) {
    dst.iter_mut()
        .zip(src.chunks_exact(4))
        .for_each(|(w, b)| *w = u32::from_le_bytes(b.try_into().unwrap()));
}

/// ChaCha20 keystream generator.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ChaCha20 {
    /// Input state: constants, key, counter and nonce words.
    state: [u32; 16],

    /// Counter spans words 12 and 13.
    large_counter: bool,

    /// Value of the 64-bit counter at block 0 (large-counter mode only).
    counter_base: u64,

    /// The last block of the counter range has been produced.
    exhausted: bool,
}

impl ChaCha20 {
    /// Creates an RFC 7539 generator with a 32-bit block counter starting
    /// at 0.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 32 bytes and
    /// [`CryptoError::InvalidNonceLength`] unless `nonce` is 12 bytes.
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        check_key(key)?;
        if nonce.len() != 12 {
            return Err(CryptoError::InvalidNonceLength {
                actual: nonce.len(),
            });
        }

        let mut state = Self::key_state(key);
        load_words(&mut state[13..16], nonce);

        Ok(Self {
            state,
            large_counter: false,
            counter_base: 0,
            exhausted: false,
        })
    }

    /// Creates a generator whose block counter spans words 12 and 13.
    ///
    /// An 8-byte nonce fills words 14..16 and the 64-bit counter starts at
    /// 0. A 12-byte nonce fills words 13..16; its first word becomes the
    /// high half of the counter, so the low word carries into it.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 32 bytes and
    /// [`CryptoError::InvalidNonceLength`] unless `nonce` is 8 or 12 bytes.
    pub fn new_large_counter(key: &[u8], nonce: &[u8]) -> Result<Self> {
        check_key(key)?;

        let mut state = Self::key_state(key);
        match nonce.len() {
            8 => load_words(&mut state[14..16], nonce),
            12 => load_words(&mut state[13..16], nonce),
            actual => return Err(CryptoError::InvalidNonceLength { actual }),
        }

        Ok(Self {
            state,
            large_counter: true,
            counter_base: u64::from(state[13]) << 32,
            exhausted: false,
        })
    }

    fn key_state(key: &[u8]) -> [u32; 16] {
        let mut state = [0u32; 16];
        state[0..4].copy_from_slice(&CONSTANTS);
        load_words(&mut state[4..12], key);
        state
    }

    fn name(&self) -> &'static str {
        if self.large_counter { NAME_LARGE } else { NAME }
    }

    fn advance_counter(&mut self) {
        let (low, carry) = self.state[12].overflowing_add(1);
        self.state[12] = low;
        if !carry {
            return;
        }

        if self.large_counter {
            let (high, carry) = self.state[13].overflowing_add(1);
            self.state[13] = high;
            self.exhausted = carry;
        } else {
            self.exhausted = true;
        }
    }
}

fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidKeyLength {
            expected: "32",
            actual: key.len(),
        });
    }
    Ok(())
}

impl KeystreamBlock for ChaCha20 {
    const BLOCK_LEN: usize = BLOCK_LEN;
    type Block = [u8; BLOCK_LEN];
    const EMPTY: [u8; BLOCK_LEN] = [0; BLOCK_LEN];

    fn next_block(&mut self, block: &mut [u8; BLOCK_LEN]) -> Result<()> {
        if self.exhausted {
            error!(cipher = self.name(), "block counter exhausted");
            return Err(CryptoError::CounterExhausted(self.name()));
        }

        let mut working = self.state;
        rounds(&mut working);

        // Feed-forward
        working
            .iter_mut()
            .zip(self.state.iter())
            .for_each(|(w, s)| *w = w.wrapping_add(*s));

        block
            .chunks_exact_mut(4)
            .zip(working.iter())
            .for_each(|(out, w)| out.copy_from_slice(&w.to_le_bytes()));

        working.zeroize();
        self.advance_counter();
        Ok(())
    }

    fn seek_block(&mut self, index: u64) -> Result<()> {
        if self.large_counter {
            let counter = self
                .counter_base
                .checked_add(index)
                .ok_or(CryptoError::InvalidOffset(index))?;
            self.state[12] = counter as u32;
            self.state[13] = (counter >> 32) as u32;
        } else {
            self.state[12] = u32::try_from(index).map_err(|_| CryptoError::InvalidOffset(index))?;
        }

        self.exhausted = false;
        Ok(())
    }
}

impl std::fmt::Debug for ChaCha20 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChaCha20")
            .field("large_counter", &self.large_counter)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

/// Returns an RFC 7539 ChaCha20 cipher ready to encrypt from offset 0.
pub fn chacha20(key: &[u8], nonce: &[u8]) -> Result<CtrCipher<ChaCha20>> {
    Ok(CtrCipher::new(ChaCha20::new(key, nonce)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc7539_quarter_round() {
        // RFC 7539 section 2.1.1
        let mut state = [0u32; 16];
        state[0] = 0x1111_1111;
        state[1] = 0x0102_0304;
        state[2] = 0x9b8d_6f43;
        state[3] = 0x0123_4567;
        quarter_round(&mut state, 0, 1, 2, 3);

        assert_eq!(
            &state[..4],
            &[0xea2a_92f4, 0xcb1c_f8ce, 0x4581_472e, 0x5881_c4bb]
        );
    }

    #[test]
    fn rejects_bad_lengths() {
        assert_eq!(
            ChaCha20::new(&[0; 16], &[0; 12]).unwrap_err(),
            CryptoError::InvalidKeyLength {
                expected: "32",
                actual: 16
            }
        );
        assert_eq!(
            ChaCha20::new(&[0; 32], &[0; 8]).unwrap_err(),
            CryptoError::InvalidNonceLength { actual: 8 }
        );
        assert_eq!(
            ChaCha20::new_large_counter(&[0; 32], &[0; 10]).unwrap_err(),
            CryptoError::InvalidNonceLength { actual: 10 }
        );
    }

    #[test]
    fn standard_counter_stops_after_last_block() {
        let mut generator = ChaCha20::new(&[0; 32], &[0; 12]).unwrap();
        generator.seek_block(u64::from(u32::MAX)).unwrap();

        let mut block = [0u8; BLOCK_LEN];
        generator.next_block(&mut block).unwrap();
        assert_eq!(
            generator.next_block(&mut block).unwrap_err(),
            CryptoError::CounterExhausted(NAME)
        );

        // Seeking back makes the generator usable again.
        generator.seek_block(0).unwrap();
        assert!(generator.next_block(&mut block).is_ok());
    }

    #[test]
    fn large_counter_carries_into_high_word() {
        let mut generator = ChaCha20::new_large_counter(&[0; 32], &[0; 8]).unwrap();
        generator.seek_block(u64::from(u32::MAX)).unwrap();

        let mut block = [0u8; BLOCK_LEN];
        generator.next_block(&mut block).unwrap();
        assert_eq!(generator.state[12], 0);
        assert_eq!(generator.state[13], 1);
        assert!(generator.next_block(&mut block).is_ok());
    }

    #[test]
    fn large_counter_seek_range() {
        let mut short = ChaCha20::new_large_counter(&[0; 32], &[0; 8]).unwrap();
        assert!(short.seek_block(u64::MAX).is_ok());

        let mut nonce = [0u8; 12];
        nonce[0] = 1;
        let mut long = ChaCha20::new_large_counter(&[0; 32], &nonce).unwrap();
        assert_eq!(
            long.seek_block(u64::MAX).unwrap_err(),
            CryptoError::InvalidOffset(u64::MAX)
        );

        long.seek_block(5).unwrap();
        assert_eq!(long.state[12], 5);
        assert_eq!(long.state[13], 1);
    }

    #[test]
    fn standard_seek_beyond_counter_range() {
        let mut generator = ChaCha20::new(&[0; 32], &[0; 12]).unwrap();
        let index = u64::from(u32::MAX) + 1;
        assert_eq!(
            generator.seek_block(index).unwrap_err(),
            CryptoError::InvalidOffset(index)
        );
    }
}
