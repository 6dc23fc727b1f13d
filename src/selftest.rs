//! Known-answer self test.
//!
//! [`run`] recomputes one published test vector per primitive and reports
//! the first mismatch. Intended to be called once at application start.

use tracing::{debug, error};

use crate::cipher::ctr::CtrCipher;
use crate::cipher::twofish::{Direction, Twofish};
use crate::cipher::{ChaCha20, Salsa20};
use crate::error::{CryptoError, Result};
use crate::hash::{blake2b, hmac_sha256};

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn check(name: &'static str, actual: &[u8], expected: &str) -> Result<()> {
    if to_hex(actual) != expected {
        error!(primitive = name, "self test mismatch");
        return Err(CryptoError::SelfTestFailed(name));
    }
    debug!(primitive = name, "self test passed");
    Ok(())
}

fn blake2b_abc() -> Result<()> {
    check(
        "BLAKE2b",
        &blake2b(64, b"abc")?,
        "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
         7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923",
    )
}

/// RFC 7539 section 2.3.2: block 1 under key 00..1f.
fn chacha20_block() -> Result<()> {
    let key: Vec<u8> = (0..32).collect();
    let nonce = [0, 0, 0, 0x09, 0, 0, 0, 0x4a, 0, 0, 0, 0];

    let mut cipher = CtrCipher::new(ChaCha20::new(&key, &nonce)?);
    cipher.seek(64)?;
    let mut block = [0u8; 64];
    cipher.encrypt(&mut block)?;

    check(
        "ChaCha20",
        &block,
        "10f1e7e4d13b5915500fdd1fa32071c4c7d1f4c733c068030422aa9ac3d46c4e\
         d2826446079faa0914c2d705d98b02a2b5129cd1de164eb9cbd083e8a2503c4e",
    )
}

/// eSTREAM Salsa20 set 6, vector 3.
fn salsa20_stream() -> Result<()> {
    let key = [
        0x0f, 0x62, 0xb5, 0x08, 0x5b, 0xae, 0x01, 0x54, 0xa7, 0xfa, 0x4d, 0xa0, 0xf3, 0x46, 0x99,
        0xec, 0x3f, 0x92, 0xe5, 0x38, 0x8b, 0xde, 0x31, 0x84, 0xd7, 0x2a, 0x7d, 0xd0, 0x23, 0x76,
        0xc9, 0x1c,
    ];
    let iv = [0x28, 0x8f, 0xf6, 0x5d, 0xc4, 0x2b, 0x92, 0xf9];

    let mut cipher = CtrCipher::new(Salsa20::new(&key, &iv)?);
    let mut out = [0u8; 16];
    cipher.encrypt(&mut out)?;

    check("Salsa20", &out, "5e5e71f90199340304abb22a37b6625b")
}

/// Twofish paper, 256-bit key, zero plaintext.
fn twofish_256() -> Result<()> {
    let key = [
        0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0xfe, 0xdc, 0xba, 0x98, 0x76, 0x54, 0x32,
        0x10, 0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
        0xee, 0xff,
    ];
    let cipher = Twofish::new(&key)?;

    let mut block = [0u8; 16];
    cipher.transform_block(&mut block, Direction::Encrypt);
    check("Twofish", &block, "37527be0052334b89f0cfccae87cfa20")?;

    cipher.transform_block(&mut block, Direction::Decrypt);
    check("Twofish", &block, "00000000000000000000000000000000")
}

/// RFC 4231 test case 2.
fn hmac_sha256_jefe() -> Result<()> {
    check(
        "HMAC-SHA-256",
        &hmac_sha256(b"Jefe", b"what do ya want for nothing?"),
        "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843",
    )
}

/// Runs every known-answer test.
///
/// # Errors
/// Returns [`CryptoError::SelfTestFailed`] naming the first primitive whose
/// output does not match.
pub fn run() -> Result<()> {
    blake2b_abc()?;
    chacha20_block()?;
    salsa20_stream()?;
    twofish_256()?;
    hmac_sha256_jefe()?;

    debug!("all self tests passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes() {
        assert_eq!(run(), Ok(()));
    }

    #[test]
    fn mismatch_names_primitive() {
        assert_eq!(
            check("demo", &[1, 2], "0103"),
            Err(CryptoError::SelfTestFailed("demo"))
        );
        assert_eq!(check("demo", &[1, 2], "0102"), Ok(()));
    }
}
