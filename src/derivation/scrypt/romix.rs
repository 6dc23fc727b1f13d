//! ROMix and BlockMix, operating on little-endian 32-bit words.

use crate::cipher::salsa20::salsa20_core;

/// Words per 64-byte Salsa20 block.
const BLOCK_WORDS: usize = 16;

/// BlockMix with Salsa20/8: mixes the `2 * r` blocks of `input` into
/// `output`, even-indexed results first, then odd-indexed ones.
fn block_mix(input: &[u32], output: &mut [u32], r: usize) {
    let mut x: [u32; BLOCK_WORDS] = input[input.len() - BLOCK_WORDS..].try_into().unwrap();

    for (i, block) in input.chunks_exact(BLOCK_WORDS).enumerate() {
        x.iter_mut().zip(block.iter()).for_each(|(x, b)| *x ^= b);
        x = salsa20_core(&x, 8);

        let dst = (i / 2 + (i % 2) * r) * BLOCK_WORDS;
        output[dst..dst + BLOCK_WORDS].copy_from_slice(&x);
    }
}

/// Low 64 bits of the first word pair of the last block.
fn integerify(x: &[u32]) -> u64 {
    let last = x.len() - BLOCK_WORDS;
    u64::from(x[last]) | (u64::from(x[last + 1]) << 32)
}

/// Mixes one lane `b` of `128 * r` bytes in place.
///
/// `v` holds `n * 32 * r` words and `scratch` `64 * r` words; both are
/// overwritten.
pub(super) fn ro_mix(b: &mut [u8], v: &mut [u32], scratch: &mut [u32], n: usize) {
    let words = b.len() / 4;
    let r = words / (2 * BLOCK_WORDS);
    let (x, y) = scratch.split_at_mut(words);

    x.iter_mut()
        .zip(b.chunks_exact(4))
        .for_each(|(w, c)| *w = u32::from_le_bytes(c.try_into().unwrap()));

    for entry in v.chunks_exact_mut(words) {
        entry.copy_from_slice(x);
        block_mix(x, y, r);
        x.copy_from_slice(y);
    }

    let mask = n as u64 - 1;
    for _ in 0..n {
        let j = (integerify(x) & mask) as usize;
        x.iter_mut()
            .zip(v[j * words..(j + 1) * words].iter())
            .for_each(|(x, v)| *x ^= v);
        block_mix(x, y, r);
        x.copy_from_slice(y);
    }

    b.chunks_exact_mut(4)
        .zip(x.iter())
        .for_each(|(c, w)| c.copy_from_slice(&w.to_le_bytes()));
}
