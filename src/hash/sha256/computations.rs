use zeroize::Zeroize;

use super::{BLOCK_LEN, K256};

#[inline(always)]
fn small_sigma0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline(always)]
fn small_sigma1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

#[inline(always)]
fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline(always)]
fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

/// Compresses one 64-byte block into `state`.
///
/// The message schedule is expanded in full (64 words) up front; input
/// words are big-endian.
pub(crate) fn compress(state: &mut [u32; 8], block: &[u8; BLOCK_LEN]) {
    let mut w = [0u32; 64];
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *word = u32::from_be_bytes(chunk.try_into().unwrap());
    }
    for i in 16..64 {
        w[i] = small_sigma1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(small_sigma0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }

    let mut v = *state;

    for (ki, wi) in K256.iter().zip(w.iter()) {
        let [a, b, c, d, e, f, g, h] = v;

        let t1 = h
            .wrapping_add(big_sigma1(e))
            .wrapping_add((e & f) ^ (!e & g))
            .wrapping_add(*ki)
            .wrapping_add(*wi);
        let t2 = big_sigma0(a).wrapping_add((a & b) ^ (a & c) ^ (b & c));

        v = [t1.wrapping_add(t2), a, b, c, d.wrapping_add(t1), e, f, g];
    }

    for (s, x) in state.iter_mut().zip(v.iter()) {
        *s = s.wrapping_add(*x);
    }

    w.zeroize();
    v.zeroize();
}
