//! BLAKE2b hashing state
//!
//! This module holds the incremental BLAKE2b state and the one-shot
//! [`blake2b`] helper built on top of it.
//!
//! The buffered block is compressed lazily: a full buffer is only
//! processed once more input arrives, so the last block (which carries the
//! finalization flag) is never empty unless the whole message is.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::computations::compress;
use super::{BLOCK_LEN, IV, MAX_OUTPUT_LEN};
use crate::error::{CryptoError, Result};

/// Incremental BLAKE2b hasher.
///
/// The output length is fixed at construction. [`Blake2b::finalize`]
/// consumes the state; the internal chaining value, counters and buffer
/// are wiped when the value is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2b {
    /// Chaining value.
    h: [u64; 8],

    /// Message byte counter (128-bit, low word first).
    t: [u64; 2],

    /// Finalization flags.
    f: [u64; 2],

    /// Pending input, at most one block.
    buf: [u8; BLOCK_LEN],

    /// Number of valid bytes in `buf`.
    buf_len: usize,

    /// Digest length in bytes (1..=64).
    output_len: usize,
}

impl Blake2b {
    /// Creates a hasher producing `output_len` bytes.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidOutputLength`] unless
    /// `1 <= output_len <= 64`.
    pub fn new(output_len: usize) -> Result<Self> {
        if output_len == 0 || output_len > MAX_OUTPUT_LEN {
            return Err(CryptoError::InvalidOutputLength(output_len));
        }

        let mut h = IV;
        // Parameter block: digest length, key length 0, fan-out 1, depth 1
        h[0] ^= 0x0101_0000 ^ output_len as u64;

        Ok(Self {
            h,
            t: [0; 2],
            f: [0; 2],
            buf: [0; BLOCK_LEN],
            buf_len: 0,
            output_len,
        })
    }

    /// Digest length this state was created with.
    pub fn output_len(&self) -> usize {
        self.output_len
    }

    /// Absorbs `data` into the state.
    ///
    /// # Panics
    /// Panics if the state has already been finalized.
    pub fn update(&mut self, mut data: &[u8]) {
        assert_eq!(self.f[0], 0, "BLAKE2b state already finalized");

        // Strictly greater: a full buffer may still be the last block.
        if self.buf_len + data.len() > BLOCK_LEN {
            let fill = BLOCK_LEN - self.buf_len;
            self.buf[self.buf_len..].copy_from_slice(&data[..fill]);
            data = &data[fill..];

            self.increment_counter(BLOCK_LEN as u64);
            compress(&mut self.h, &self.buf, self.t, self.f);
            self.buf_len = 0;

            while data.len() > BLOCK_LEN {
                let (block, rest) = data.split_at(BLOCK_LEN);
                self.increment_counter(BLOCK_LEN as u64);
                compress(&mut self.h, block.try_into().unwrap(), self.t, self.f);
                data = rest;
            }
        }

        self.buf[self.buf_len..self.buf_len + data.len()].copy_from_slice(data);
        self.buf_len += data.len();
    }

    /// Pads and compresses the final block and returns the digest.
    pub fn finalize(mut self) -> Vec<u8> {
        self.f[0] = u64::MAX;

        self.buf[self.buf_len..].fill(0);
        self.increment_counter(self.buf_len as u64);
        compress(&mut self.h, &self.buf, self.t, self.f);

        let mut full = [0u8; MAX_OUTPUT_LEN];
        for (chunk, word) in full.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        let out = full[..self.output_len].to_vec();
        full.zeroize();
        out
    }

    fn increment_counter(&mut self, len: u64) {
        self.t[0] = self.t[0].wrapping_add(len);
        if self.t[0] < len {
            self.t[1] = self.t[1].wrapping_add(1);
        }
    }
}

impl std::fmt::Debug for Blake2b {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Blake2b")
            .field("output_len", &self.output_len)
            .finish_non_exhaustive()
    }
}

/// Computes the BLAKE2b digest of `input` in one call.
///
/// # Errors
/// Returns [`CryptoError::InvalidOutputLength`] unless
/// `1 <= output_len <= 64`.
pub fn blake2b(output_len: usize, input: &[u8]) -> Result<Vec<u8>> {
    let mut state = Blake2b::new(output_len)?;
    state.update(input);
    Ok(state.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_lengths() {
        assert_eq!(
            Blake2b::new(0).unwrap_err(),
            CryptoError::InvalidOutputLength(0)
        );
        assert_eq!(
            Blake2b::new(65).unwrap_err(),
            CryptoError::InvalidOutputLength(65)
        );
        assert!(Blake2b::new(1).is_ok());
        assert!(Blake2b::new(64).is_ok());
    }

    #[test]
    fn exactly_one_block_stays_buffered() {
        let mut state = Blake2b::new(64).unwrap();
        state.update(&[0x5a; BLOCK_LEN]);

        assert_eq!(state.buf_len, BLOCK_LEN);
        assert_eq!(state.t, [0, 0]);

        state.update(&[0x5a]);
        assert_eq!(state.buf_len, 1);
        assert_eq!(state.t, [BLOCK_LEN as u64, 0]);
    }

    #[test]
    fn counter_carries_into_high_word() {
        let mut state = Blake2b::new(32).unwrap();
        state.t[0] = u64::MAX - 10;
        state.increment_counter(128);

        assert_eq!(state.t, [117, 1]);
    }

    #[test]
    fn short_digest_is_prefix_independent() {
        // Different output lengths change the parameter block, so a short
        // digest is not a prefix of the long one.
        let long = blake2b(64, b"abc").unwrap();
        let short = blake2b(32, b"abc").unwrap();

        assert_eq!(short.len(), 32);
        assert_ne!(&long[..32], &short[..]);
    }
}
