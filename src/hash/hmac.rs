//! HMAC-SHA-256 (RFC 2104, RFC 4231).

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::sha256::{BLOCK_LEN, DIGEST_LEN, Sha256};

const IPAD: u8 = 0x36;
const OPAD: u8 = 0x5c;

/// Keyed HMAC-SHA-256 state.
///
/// The inner and outer hashers are primed with the padded key at
/// construction, so a keyed state can be cloned to authenticate several
/// messages under the same key (PBKDF2 relies on this).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HmacSha256 {
    inner: Sha256,
    outer: Sha256,
}

impl HmacSha256 {
    /// Creates a MAC state for `key`. Keys longer than one block are
    /// hashed first.
    pub fn new(key: &[u8]) -> Self {
        let mut block = [0u8; BLOCK_LEN];
        if key.len() > BLOCK_LEN {
            let mut digest = super::sha256::sha256(key);
            block[..DIGEST_LEN].copy_from_slice(&digest);
            digest.zeroize();
        } else {
            block[..key.len()].copy_from_slice(key);
        }

        let mut pad = [0u8; BLOCK_LEN];

        let mut inner = Sha256::new();
        for (p, k) in pad.iter_mut().zip(block.iter()) {
            *p = k ^ IPAD;
        }
        inner.update(&pad);

        let mut outer = Sha256::new();
        for (p, k) in pad.iter_mut().zip(block.iter()) {
            *p = k ^ OPAD;
        }
        outer.update(&pad);

        pad.zeroize();
        block.zeroize();

        Self { inner, outer }
    }

    /// Absorbs more of the message.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the 32-byte tag.
    pub fn finalize(self) -> [u8; DIGEST_LEN] {
        let mut inner_digest = self.inner.clone().finalize();
        let mut outer = self.outer.clone();
        outer.update(&inner_digest);
        inner_digest.zeroize();
        outer.finalize()
    }
}

/// Computes HMAC-SHA-256 of `message` under `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = HmacSha256::new(key);
    mac.update(message);
    mac.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn rfc4231_case_1() {
        let tag = hmac_sha256(&[0x0b; 20], b"Hi There");
        assert_eq!(
            tag.to_vec(),
            hex("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
        );
    }

    #[test]
    fn rfc4231_case_2_short_key() {
        let tag = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            tag.to_vec(),
            hex("5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843")
        );
    }

    #[test]
    fn rfc4231_case_7_long_key() {
        let msg = b"This is a test using a larger than block-size key and a larger \
than block-size data. The key needs to be hashed before being used by the HMAC algorithm.";
        let tag = hmac_sha256(&[0xaa; 131], msg);
        assert_eq!(
            tag.to_vec(),
            hex("9b09ffa71b942fcb27635fbcd5b0e944bfdc63644f0713938a7f51535c3a35e2")
        );
    }

    #[test]
    fn cloned_state_is_reusable() {
        let keyed = HmacSha256::new(b"key");

        let mut a = keyed.clone();
        a.update(b"message");
        let mut b = keyed.clone();
        b.update(b"message");

        assert_eq!(a.finalize(), b.finalize());
        assert_eq!(keyed.finalize(), hmac_sha256(b"key", b""));
    }
}
