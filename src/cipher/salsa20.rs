//! Salsa20 keystream generator
//!
//! The 20-round Salsa20 stream cipher with a 256-bit key, a 64-bit IV and a
//! 64-bit block counter. The core permutation takes a round count so that
//! scrypt can reuse it as Salsa20/8.

use tracing::error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ctr::{CtrCipher, KeystreamBlock};
use crate::error::{CryptoError, Result};

/// Keystream block size in bytes.
pub const BLOCK_LEN: usize = 64;

/// IV size in bytes.
pub const IV_LEN: usize = 8;

/// `"expand 32-byte k"` as little-endian words.
const SIGMA: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

const NAME: &str = "Salsa20";

#[inline(always)]
fn quarter_round(x: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    x[b] ^= x[a].wrapping_add(x[d]).rotate_left(7);
    x[c] ^= x[b].wrapping_add(x[a]).rotate_left(9);
    x[d] ^= x[c].wrapping_add(x[b]).rotate_left(13);
    x[a] ^= x[d].wrapping_add(x[c]).rotate_left(18);
}

/// Salsa20 core: `rounds` rounds (must be even) followed by the
/// feed-forward addition of the input.
pub(crate) fn salsa20_core(input: &[u32; 16], rounds: usize) -> [u32; 16] {
    let mut x = *input;

    for _ in 0..rounds / 2 {
        // Columns
        quarter_round(&mut x, 0, 4, 8, 12);
        quarter_round(&mut x, 5, 9, 13, 1);
        quarter_round(&mut x, 10, 14, 2, 6);
        quarter_round(&mut x, 15, 3, 7, 11);

        // Rows
        quarter_round(&mut x, 0, 1, 2, 3);
        quarter_round(&mut x, 5, 6, 7, 4);
        quarter_round(&mut x, 10, 11, 8, 9);
        quarter_round(&mut x, 15, 12, 13, 14);
    }

    x.iter_mut()
        .zip(input.iter())
        .for_each(|(w, i)| *w = w.wrapping_add(*i));
    x
}

/// Salsa20/20 keystream generator.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Salsa20 {
    state: [u32; 16],
    exhausted: bool,
}

impl Salsa20 {
    /// Creates a generator with the block counter at 0.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 32 bytes and
    /// [`CryptoError::InvalidNonceLength`] unless `iv` is 8 bytes.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        if key.len() != 32 {
            return Err(CryptoError::InvalidKeyLength {
                expected: "32",
                actual: key.len(),
            });
        }
        if iv.len() != IV_LEN {
            return Err(CryptoError::InvalidNonceLength { actual: iv.len() });
        }

        let word = |b: &[u8], i: usize| u32::from_le_bytes(b[4 * i..4 * i + 4].try_into().unwrap());

        let mut state = [0u32; 16];
        state[0] = SIGMA[0];
        state[5] = SIGMA[1];
        state[10] = SIGMA[2];
        state[15] = SIGMA[3];
        for i in 0..4 {
            state[1 + i] = word(key, i);
            state[11 + i] = word(key, 4 + i);
        }
        state[6] = word(iv, 0);
        state[7] = word(iv, 1);

        Ok(Self {
            state,
            exhausted: false,
        })
    }

    fn counter(&self) -> u64 {
        u64::from(self.state[8]) | (u64::from(self.state[9]) << 32)
    }

    fn set_counter(&mut self, counter: u64) {
        self.state[8] = counter as u32;
        self.state[9] = (counter >> 32) as u32;
    }
}

impl KeystreamBlock for Salsa20 {
    const BLOCK_LEN: usize = BLOCK_LEN;
    type Block = [u8; BLOCK_LEN];
    const EMPTY: [u8; BLOCK_LEN] = [0; BLOCK_LEN];

    fn next_block(&mut self, block: &mut [u8; BLOCK_LEN]) -> Result<()> {
        if self.exhausted {
            error!(cipher = NAME, "block counter exhausted");
            return Err(CryptoError::CounterExhausted(NAME));
        }

        let mut x = salsa20_core(&self.state, 20);
        for (out, w) in block.chunks_exact_mut(4).zip(x.iter()) {
            out.copy_from_slice(&w.to_le_bytes());
        }
        x.zeroize();

        match self.counter().checked_add(1) {
            Some(next) => self.set_counter(next),
            None => self.exhausted = true,
        }
        Ok(())
    }

    fn seek_block(&mut self, index: u64) -> Result<()> {
        self.set_counter(index);
        self.exhausted = false;
        Ok(())
    }
}

impl std::fmt::Debug for Salsa20 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Salsa20")
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

/// Returns a Salsa20 cipher ready to encrypt from offset 0.
pub fn salsa20(key: &[u8], iv: &[u8]) -> Result<CtrCipher<Salsa20>> {
    Ok(CtrCipher::new(Salsa20::new(key, iv)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_input_is_fixed_point() {
        assert_eq!(salsa20_core(&[0; 16], 20), [0; 16]);
    }

    #[test]
    fn counter_exhaustion() {
        let mut generator = Salsa20::new(&[0; 32], &[0; 8]).unwrap();
        generator.seek_block(u64::MAX).unwrap();

        let mut block = [0u8; BLOCK_LEN];
        generator.next_block(&mut block).unwrap();
        assert_eq!(
            generator.next_block(&mut block).unwrap_err(),
            CryptoError::CounterExhausted(NAME)
        );
    }

    #[test]
    fn rejects_short_iv() {
        assert_eq!(
            Salsa20::new(&[0; 32], &[0; 12]).unwrap_err(),
            CryptoError::InvalidNonceLength { actual: 12 }
        );
    }
}
