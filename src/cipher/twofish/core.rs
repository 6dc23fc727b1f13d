//! Twofish key schedule and block transform
//!
//! The key-dependent S-boxes are folded together with the MDS matrix into
//! four 256-entry tables at key setup, so the round function `g` is four
//! lookups and three XORs.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::BLOCK_LEN;
use super::tables::{Q0, Q1};
use crate::cipher::cbc::BlockCipher;
use crate::error::{CryptoError, Result};

const ROUNDS: usize = 16;
const SUBKEY_COUNT: usize = 8 + 2 * ROUNDS;
const SK_STEP: u32 = 0x0202_0202;
const SK_BUMP: u32 = 0x0101_0101;

/// Direction of a block transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

// GF(2^8) multiplications by the MDS constants, modulo x^8+x^6+x^5+x^3+1.

#[inline]
fn lfsr1(x: u8) -> u8 {
    (x >> 1) ^ ((x & 1).wrapping_neg() & 0xb4)
}

#[inline]
fn lfsr2(x: u8) -> u8 {
    (x >> 2) ^ (((x >> 1) & 1).wrapping_neg() & 0xb4) ^ ((x & 1).wrapping_neg() & 0x5a)
}

#[inline]
fn mul_5b(x: u8) -> u8 {
    x ^ lfsr2(x)
}

#[inline]
fn mul_ef(x: u8) -> u8 {
    x ^ lfsr1(x) ^ lfsr2(x)
}

/// Column `col` of the MDS matrix multiplied by `y`.
fn mds_column(col: usize, y: u8) -> u32 {
    let bytes = match col {
        0 => [y, mul_5b(y), mul_ef(y), mul_ef(y)],
        1 => [mul_ef(y), mul_ef(y), mul_5b(y), y],
        2 => [mul_5b(y), mul_ef(y), y, mul_ef(y)],
        _ => [mul_5b(y), y, mul_ef(y), mul_5b(y)],
    };
    u32::from_le_bytes(bytes)
}

/// Key-dependent S-box layer of `h`, before the MDS multiplication.
/// `l` holds 2, 3 or 4 key words.
fn sbox_bytes(x: u32, l: &[u32]) -> [u8; 4] {
    let [mut y0, mut y1, mut y2, mut y3] = x.to_le_bytes();
    let b = |i: usize| l[i].to_le_bytes();

    if l.len() == 4 {
        let k = b(3);
        y0 = Q1[y0 as usize] ^ k[0];
        y1 = Q0[y1 as usize] ^ k[1];
        y2 = Q0[y2 as usize] ^ k[2];
        y3 = Q1[y3 as usize] ^ k[3];
    }
    if l.len() >= 3 {
        let k = b(2);
        y0 = Q1[y0 as usize] ^ k[0];
        y1 = Q1[y1 as usize] ^ k[1];
        y2 = Q0[y2 as usize] ^ k[2];
        y3 = Q0[y3 as usize] ^ k[3];
    }

    let (k1, k0) = (b(1), b(0));
    [
        Q1[(Q0[(Q0[y0 as usize] ^ k1[0]) as usize] ^ k0[0]) as usize],
        Q0[(Q0[(Q1[y1 as usize] ^ k1[1]) as usize] ^ k0[1]) as usize],
        Q1[(Q1[(Q0[y2 as usize] ^ k1[2]) as usize] ^ k0[2]) as usize],
        Q0[(Q1[(Q1[y3 as usize] ^ k1[3]) as usize] ^ k0[3]) as usize],
    ]
}

fn h(x: u32, l: &[u32]) -> u32 {
    let y = sbox_bytes(x, l);
    (0..4).fold(0, |acc, col| acc ^ mds_column(col, y[col]))
}

/// One step of the Reed-Solomon remainder, modulo x^8+x^6+x^3+x^2+1.
fn rs_rem(x: u32) -> u32 {
    let b = (x >> 24) as u8;
    let g2 = (b << 1) ^ ((b >> 7).wrapping_neg() & 0x4d);
    let g3 = (b >> 1) ^ ((b & 1).wrapping_neg() & 0xa6) ^ g2;

    (x << 8) ^ (u32::from(g3) << 24) ^ (u32::from(g2) << 16) ^ (u32::from(g3) << 8) ^ u32::from(b)
}

/// Reed-Solomon encoding of one 64-bit key chunk into an S-box key word.
fn rs_encode(even: u32, odd: u32) -> u32 {
    let mut r = 0;
    for word in [odd, even] {
        r ^= word;
        for _ in 0..4 {
            r = rs_rem(r);
        }
    }
    r
}

/// Twofish with an expanded 128, 192 or 256-bit key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Twofish {
    /// Whitening and round subkeys.
    subkeys: [u32; SUBKEY_COUNT],

    /// Key-dependent S-boxes combined with the MDS columns.
    sbox: [[u32; 256]; 4],
}

impl Twofish {
    /// Expands `key`.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidKeyLength`] unless `key` is 16, 24 or
    /// 32 bytes long.
    pub fn new(key: &[u8]) -> Result<Self> {
        if !matches!(key.len(), 16 | 24 | 32) {
            return Err(CryptoError::InvalidKeyLength {
                expected: "16, 24 or 32",
                actual: key.len(),
            });
        }

        let k = key.len() / 8;
        let mut even = [0u32; 4];
        let mut odd = [0u32; 4];
        let mut s = [0u32; 4];

        for (i, chunk) in key.chunks_exact(8).enumerate() {
            even[i] = u32::from_le_bytes(chunk[..4].try_into().unwrap());
            odd[i] = u32::from_le_bytes(chunk[4..].try_into().unwrap());
            s[k - 1 - i] = rs_encode(even[i], odd[i]);
        }

        let mut subkeys = [0u32; SUBKEY_COUNT];
        for (i, pair) in subkeys.chunks_exact_mut(2).enumerate() {
            let step = i as u32 * SK_STEP;
            let a = h(step, &even[..k]);
            let b = h(step + SK_BUMP, &odd[..k]).rotate_left(8);
            pair[0] = a.wrapping_add(b);
            pair[1] = a.wrapping_add(b.wrapping_mul(2)).rotate_left(9);
        }

        let mut sbox = [[0u32; 256]; 4];
        for v in 0..256usize {
            let mut y = sbox_bytes(u32::from_le_bytes([v as u8; 4]), &s[..k]);
            for (col, table) in sbox.iter_mut().enumerate() {
                table[v] = mds_column(col, y[col]);
            }
            y.zeroize();
        }

        even.zeroize();
        odd.zeroize();
        s.zeroize();

        Ok(Self { subkeys, sbox })
    }

    #[inline(always)]
    fn g(&self, x: u32) -> u32 {
        let b = x.to_le_bytes();
        self.sbox[0][b[0] as usize]
            ^ self.sbox[1][b[1] as usize]
            ^ self.sbox[2][b[2] as usize]
            ^ self.sbox[3][b[3] as usize]
    }

    /// Encrypts or decrypts one 16-byte block in place.
    pub fn transform_block(&self, block: &mut [u8; BLOCK_LEN], direction: Direction) {
        let mut x = [0u32; 4];
        for (w, chunk) in x.iter_mut().zip(block.chunks_exact(4)) {
            *w = u32::from_le_bytes(chunk.try_into().unwrap());
        }

        match direction {
            Direction::Encrypt => self.encrypt_words(&mut x),
            Direction::Decrypt => self.decrypt_words(&mut x),
        }

        for (chunk, w) in block.chunks_exact_mut(4).zip(x.iter()) {
            chunk.copy_from_slice(&w.to_le_bytes());
        }
        x.zeroize();
    }

    fn encrypt_words(&self, x: &mut [u32; 4]) {
        let k = &self.subkeys;
        for i in 0..4 {
            x[i] ^= k[i];
        }

        for r in 0..ROUNDS {
            let t0 = self.g(x[0]);
            let t1 = self.g(x[1].rotate_left(8));

            x[3] = x[3].rotate_left(1);
            x[2] ^= t0.wrapping_add(t1).wrapping_add(k[8 + 2 * r]);
            x[3] ^= t0
                .wrapping_add(t1.wrapping_mul(2))
                .wrapping_add(k[9 + 2 * r]);
            x[2] = x[2].rotate_right(1);

            if r < ROUNDS - 1 {
                x.swap(0, 2);
                x.swap(1, 3);
            }
        }

        for i in 0..4 {
            x[i] ^= k[4 + i];
        }
    }

    fn decrypt_words(&self, x: &mut [u32; 4]) {
        let k = &self.subkeys;
        for i in 0..4 {
            x[i] ^= k[4 + i];
        }

        for r in (0..ROUNDS).rev() {
            let t0 = self.g(x[0]);
            let t1 = self.g(x[1].rotate_left(8));

            x[2] = x[2].rotate_left(1);
            x[2] ^= t0.wrapping_add(t1).wrapping_add(k[8 + 2 * r]);
            x[3] ^= t0
                .wrapping_add(t1.wrapping_mul(2))
                .wrapping_add(k[9 + 2 * r]);
            x[3] = x[3].rotate_right(1);

            if r > 0 {
                x.swap(0, 2);
                x.swap(1, 3);
            }
        }

        for i in 0..4 {
            x[i] ^= k[i];
        }
    }
}

impl BlockCipher for Twofish {
    fn encrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        self.transform_block(block, Direction::Encrypt);
    }

    fn decrypt_block(&self, block: &mut [u8; BLOCK_LEN]) {
        self.transform_block(block, Direction::Decrypt);
    }
}

impl std::fmt::Debug for Twofish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Twofish { .. }")
    }
}
