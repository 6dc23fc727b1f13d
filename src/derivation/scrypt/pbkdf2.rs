//! PBKDF2 with HMAC-SHA-256 as the pseudorandom function (RFC 8018).

use zeroize::Zeroize;

use crate::hash::hmac::HmacSha256;
use crate::hash::sha256::DIGEST_LEN;

/// Fills `out` with PBKDF2-HMAC-SHA-256 of `password` and `salt`.
///
/// `iterations` below 1 are treated as 1.
pub fn pbkdf2_hmac_sha256(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    let prf = HmacSha256::new(password);

    for (i, chunk) in out.chunks_mut(DIGEST_LEN).enumerate() {
        let mut mac = prf.clone();
        mac.update(salt);
        mac.update(&(i as u32 + 1).to_be_bytes());
        let mut u = mac.finalize();
        let mut t = u;

        for _ in 1..iterations {
            let mut mac = prf.clone();
            mac.update(&u);
            u = mac.finalize();
            t.iter_mut().zip(u.iter()).for_each(|(t, u)| *t ^= u);
        }

        chunk.copy_from_slice(&t[..chunk.len()]);
        u.zeroize();
        t.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc7914_pbkdf2_vector() {
        let mut out = [0u8; 64];
        pbkdf2_hmac_sha256(b"passwd", b"salt", 1, &mut out);

        assert_eq!(
            out[..16],
            [
                0x55, 0xac, 0x04, 0x6e, 0x56, 0xe3, 0x08, 0x9f, 0xec, 0x16, 0x91, 0xc2, 0x25, 0x44,
                0xb6, 0x05
            ]
        );
    }

    #[test]
    fn iterations_change_output() {
        let mut one = [0u8; 32];
        let mut two = [0u8; 32];
        pbkdf2_hmac_sha256(b"password", b"salt", 1, &mut one);
        pbkdf2_hmac_sha256(b"password", b"salt", 2, &mut two);

        assert_eq!(one[..4], [0x12, 0x0f, 0xb6, 0xcf]);
        assert_eq!(two[..4], [0xae, 0x4d, 0x0c, 0x95]);
    }
}
