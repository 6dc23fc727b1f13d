//! Counter-mode stream cipher driver
//!
//! A stream cipher here is split in two parts:
//! - a [`KeystreamBlock`] generator, which only knows how to produce the
//!   next keystream block and how to jump its counter to a block index;
//! - the generic [`CtrCipher`] driver, which buffers one block, XORs it into
//!   caller data and handles partial blocks and seeking.
//!
//! Encryption and decryption are the same operation.

use tracing::trace;
use zeroize::Zeroize;

use crate::error::{CryptoError, Result};

/// Cipher-specific keystream block generator.
pub trait KeystreamBlock {
    /// Keystream block size in bytes.
    const BLOCK_LEN: usize;

    /// Buffer type holding one keystream block.
    type Block: AsRef<[u8]> + AsMut<[u8]> + Zeroize;

    /// An all-zero block, used to initialize the driver buffer.
    const EMPTY: Self::Block;

    /// Writes the keystream block for the current counter into `block` and
    /// advances the counter.
    ///
    /// # Errors
    /// Returns [`CryptoError::CounterExhausted`] once the counter range is
    /// used up. The generator stays exhausted until it is seeked.
    fn next_block(&mut self, block: &mut Self::Block) -> Result<()>;

    /// Sets the counter so that the next call to
    /// [`KeystreamBlock::next_block`] produces block number `index`.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidOffset`] if `index` is outside the
    /// counter range.
    fn seek_block(&mut self, index: u64) -> Result<()>;
}

/// Generic counter-mode driver around a [`KeystreamBlock`] generator.
///
/// The buffered keystream is wiped when the driver is dropped; the
/// generator is responsible for wiping its own key material.
pub struct CtrCipher<G: KeystreamBlock> {
    generator: G,
    block: G::Block,
    /// Next unused byte of `block`; `BLOCK_LEN` marks the buffer as empty.
    pos: usize,
}

impl<G: KeystreamBlock> CtrCipher<G> {
    /// Wraps `generator`. The first keystream byte used is byte 0 of the
    /// generator's current block.
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            block: G::EMPTY,
            pos: G::BLOCK_LEN,
        }
    }

    /// Keystream block size in bytes.
    pub const fn block_len(&self) -> usize {
        G::BLOCK_LEN
    }

    /// XORs the keystream into `data` in place.
    ///
    /// Calls may use any length; a partially consumed block is carried over
    /// to the next call. A range `(offset, length)` of a larger buffer is
    /// encrypted by passing `&mut buffer[offset..offset + length]`.
    ///
    /// # Errors
    /// Propagates [`CryptoError::CounterExhausted`] from the generator. Bytes
    /// before the failing block have already been transformed.
    pub fn encrypt(&mut self, data: &mut [u8]) -> Result<()> {
        let mut done = 0;

        while done < data.len() {
            if self.pos == G::BLOCK_LEN {
                self.generator.next_block(&mut self.block)?;
                self.pos = 0;
            }

            let take = (G::BLOCK_LEN - self.pos).min(data.len() - done);
            let keystream = &self.block.as_ref()[self.pos..self.pos + take];

            data[done..done + take]
                .iter_mut()
                .zip(keystream)
                .for_each(|(d, k)| *d ^= k);

            self.pos += take;
            done += take;
        }

        Ok(())
    }

    /// Same as [`CtrCipher::encrypt`].
    pub fn decrypt(&mut self, data: &mut [u8]) -> Result<()> {
        self.encrypt(data)
    }

    /// Moves the keystream position to byte `offset`.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidOffset`] if `offset` is not a multiple
    /// of the block size or lies beyond the generator's counter range. The
    /// position is unchanged on error.
    pub fn seek(&mut self, offset: u64) -> Result<u64> {
        let block_len = G::BLOCK_LEN as u64;
        if offset % block_len != 0 {
            return Err(CryptoError::InvalidOffset(offset));
        }

        self.generator
            .seek_block(offset / block_len)
            .map_err(|err| match err {
                CryptoError::InvalidOffset(_) => CryptoError::InvalidOffset(offset),
                other => other,
            })?;
        self.invalidate_block();

        trace!(offset, "keystream seek");
        Ok(offset)
    }

    /// Discards the buffered keystream so the next byte comes from a fresh
    /// block.
    pub fn invalidate_block(&mut self) {
        self.block.zeroize();
        self.pos = G::BLOCK_LEN;
    }
}

impl<G: KeystreamBlock> Drop for CtrCipher<G> {
    fn drop(&mut self) {
        self.block.zeroize();
        self.pos = G::BLOCK_LEN;
    }
}

impl<G: KeystreamBlock> std::fmt::Debug for CtrCipher<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtrCipher")
            .field("block_len", &G::BLOCK_LEN)
            .field("pos", &self.pos)
            .finish_non_exhaustive()
    }
}
