//! Incremental SHA-256 state.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::computations::compress;
use super::{BLOCK_LEN, DIGEST_LEN, H256_INIT};

/// Streaming SHA-256 hasher.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha256 {
    state: [u32; 8],
    buf: [u8; BLOCK_LEN],
    buf_len: usize,
    /// Total message length in bytes.
    len: u64,
}

impl Sha256 {
    /// Creates a hasher with the standard initial state.
    pub fn new() -> Self {
        Self {
            state: H256_INIT,
            buf: [0; BLOCK_LEN],
            buf_len: 0,
            len: 0,
        }
    }

    /// Absorbs `data`; may be called any number of times.
    pub fn update(&mut self, mut data: &[u8]) {
        self.len = self.len.wrapping_add(data.len() as u64);

        if self.buf_len > 0 {
            let take = (BLOCK_LEN - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];

            if self.buf_len < BLOCK_LEN {
                return;
            }
            compress(&mut self.state, &self.buf);
            self.buf_len = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_LEN);
        for block in &mut blocks {
            compress(&mut self.state, block.try_into().unwrap());
        }

        let rest = blocks.remainder();
        self.buf[..rest.len()].copy_from_slice(rest);
        self.buf_len = rest.len();
    }

    /// Applies the padding rule and returns the 32-byte digest.
    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        let bit_len = self.len.wrapping_mul(8);

        self.buf[self.buf_len] = 0x80;
        self.buf[self.buf_len + 1..].fill(0);

        // No room for the 64-bit length field
        if self.buf_len >= BLOCK_LEN - 8 {
            compress(&mut self.state, &self.buf);
            self.buf.fill(0);
        }

        self.buf[BLOCK_LEN - 8..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&mut self.state, &self.buf);

        let mut out = [0u8; DIGEST_LEN];
        for (chunk, word) in out.chunks_exact_mut(4).zip(self.state.iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        out
    }
}

impl Default for Sha256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the SHA-256 digest of `input`.
pub fn sha256(input: &[u8]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hasher.finalize()
}
