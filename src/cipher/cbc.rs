//! CBC mode with PKCS#7 padding
//!
//! [`Cbc`] chains any 128-bit [`BlockCipher`]. Each call starts from the IV
//! given at construction, so one `Cbc` value encrypts or decrypts whole
//! messages, not a continuing stream.

use zeroize::{Zeroize, Zeroizing};

use super::twofish::{BLOCK_LEN, Twofish};
use crate::error::{CryptoError, Result};

/// A 128-bit block cipher usable by [`Cbc`].
pub trait BlockCipher {
    /// Encrypts one block in place.
    fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]);

    /// Decrypts one block in place.
    fn decrypt_block(&self, block: &mut [u8; BLOCK_LEN]);
}

/// CBC chaining over `C` with a fixed IV.
#[derive(Debug, Clone)]
pub struct Cbc<C: BlockCipher> {
    cipher: C,
    iv: [u8; BLOCK_LEN],
}

impl<C: BlockCipher> Cbc<C> {
    /// Chains `cipher` from `iv`.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidIvLength`] unless `iv` is 16 bytes.
    pub fn new(cipher: C, iv: &[u8]) -> Result<Self> {
        let iv = iv.try_into().map_err(|_| CryptoError::InvalidIvLength {
            expected: BLOCK_LEN,
            actual: iv.len(),
        })?;
        Ok(Self { cipher, iv })
    }

    /// Pads `plaintext` with PKCS#7 and encrypts it. The output is always
    /// one to sixteen bytes longer than the input.
    pub fn encrypt_padded(&self, plaintext: &[u8]) -> Vec<u8> {
        let pad = BLOCK_LEN - plaintext.len() % BLOCK_LEN;

        let mut out = Vec::with_capacity(plaintext.len() + pad);
        out.extend_from_slice(plaintext);
        out.resize(plaintext.len() + pad, pad as u8);

        let mut chain = self.iv;
        for chunk in out.chunks_exact_mut(BLOCK_LEN) {
            let block: &mut [u8; BLOCK_LEN] = chunk.try_into().unwrap();
            block.iter_mut().zip(chain.iter()).for_each(|(b, c)| *b ^= c);
            self.cipher.encrypt_block(block);
            chain = *block;
        }

        out
    }

    /// Decrypts `ciphertext` and strips the PKCS#7 padding.
    ///
    /// # Errors
    /// - [`CryptoError::InvalidCiphertextLength`] if the length is zero or
    ///   not a multiple of 16.
    /// - [`CryptoError::InvalidPadding`] if the padding does not verify
    ///   (wrong key, wrong IV or corrupted data).
    pub fn decrypt_padded(&self, ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
            return Err(CryptoError::InvalidCiphertextLength(ciphertext.len()));
        }

        let mut out = Zeroizing::new(ciphertext.to_vec());
        let mut chain = self.iv;
        for chunk in out.chunks_exact_mut(BLOCK_LEN) {
            let block: &mut [u8; BLOCK_LEN] = chunk.try_into().unwrap();
            let next_chain = *block;
            self.cipher.decrypt_block(block);
            block.iter_mut().zip(chain.iter()).for_each(|(b, c)| *b ^= c);
            chain = next_chain;
        }

        let len = out.len() - padding_len(&out)?;
        out[len..].zeroize();
        out.truncate(len);
        Ok(out)
    }
}

/// Validates PKCS#7 padding and returns its length. Every padding byte is
/// inspected regardless of where a mismatch occurs.
fn padding_len(data: &[u8]) -> Result<usize> {
    let pad = data[data.len() - 1];
    let tail = &data[data.len() - BLOCK_LEN..];

    let mut bad = u8::from(pad == 0 || pad as usize > BLOCK_LEN);
    for (i, &b) in tail.iter().rev().enumerate() {
        let in_pad = u8::from(i < pad as usize);
        bad |= in_pad & u8::from(b != pad);
    }

    if bad != 0 {
        return Err(CryptoError::InvalidPadding);
    }
    Ok(pad as usize)
}

/// Twofish-CBC with PKCS#7 padding.
///
/// # Errors
/// Returns [`CryptoError::InvalidKeyLength`] or
/// [`CryptoError::InvalidIvLength`].
pub fn twofish_cbc(key: &[u8], iv: &[u8]) -> Result<Cbc<Twofish>> {
    Cbc::new(Twofish::new(key)?, iv)
}
