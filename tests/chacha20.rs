use proptest::prelude::*;
use vaultcrypt::CryptoError;
use vaultcrypt::cipher::{ChaCha20, CtrCipher, KeystreamBlock, chacha20};

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

fn rfc_key() -> Vec<u8> {
    (0u8..32).collect()
}

const SUNSCREEN: &[u8] = b"Ladies and Gentlemen of the class of '99: If I could offer you \
only one tip for the future, sunscreen would be it.";

// -------------------------------------------------------
// 1. OFFICIAL VECTOR TESTS
// -------------------------------------------------------

#[test]
fn rfc7539_block_function() {
    // Section 2.3.2: block counter 1
    let nonce = [0, 0, 0, 0x09, 0, 0, 0, 0x4a, 0, 0, 0, 0];
    let mut cipher = chacha20(&rfc_key(), &nonce).unwrap();
    cipher.seek(64).unwrap();

    let mut block = [0u8; 64];
    cipher.encrypt(&mut block).unwrap();

    assert_eq!(
        block.to_vec(),
        hex("10f1e7e4d13b5915500fdd1fa32071c4c7d1f4c733c068030422aa9ac3d46c4e\
             d2826446079faa0914c2d705d98b02a2b5129cd1de164eb9cbd083e8a2503c4e")
    );
}

#[test]
fn rfc7539_sunscreen_encryption() {
    // Section 2.4.2: encryption starts at block 1
    let nonce = [0, 0, 0, 0, 0, 0, 0, 0x4a, 0, 0, 0, 0];
    let mut cipher = chacha20(&rfc_key(), &nonce).unwrap();
    let mut skip = [0u8; 64];
    cipher.encrypt(&mut skip).unwrap();

    let mut data = SUNSCREEN.to_vec();
    cipher.encrypt(&mut data).unwrap();

    assert_eq!(
        data,
        hex("6e2e359a2568f98041ba0728dd0d6981e97e7aec1d4360c20a27afccfd9fae0b\
             f91b65c5524733ab8f593dabcd62b3571639d624e65152ab8f530c359f0861d8\
             07ca0dbf500d6a6156a38e088a22b65e52bc514d16ccf806818ce91ab7793736\
             5af90bbf74a35be6b40b8eedf2785e42874d")
    );
}

#[test]
fn rfc7539_zero_key_keystream() {
    // Appendix A.1 #1 and #2
    let mut cipher = chacha20(&[0; 32], &[0; 12]).unwrap();
    let mut stream = [0u8; 128];
    cipher.encrypt(&mut stream).unwrap();

    assert_eq!(
        stream.to_vec(),
        hex("76b8e0ada0f13d90405d6ae55386bd28bdd219b8a08ded1aa836efcc8b770dc7\
             da41597c5157488d7724e03fb8d84a376a43b8f41518a11cc387b669b2ee6586\
             9f07e7be5551387a98ba977c732d080dcb0f29a048e3656912c6533e32ee7aed\
             29b721769ce64e43d57133b074d839d531ed1f28510afb45ace10a1f4b794d6f")
    );
}

#[test]
fn large_counter_tc8() {
    // TC8 from the ChaCha20 test vector draft, read through a 12-byte nonce
    // whose first word is zero.
    let key = hex("c46ec1b18ce8a878725a37e780dfb7351f68ed2e194c79fbc6aebee1a667975d");
    let nonce = hex("000000001ada31d5cf688221");
    let mut cipher = CtrCipher::new(ChaCha20::new_large_counter(&key, &nonce).unwrap());

    let mut data = [0u8; 128];
    cipher.decrypt(&mut data).unwrap();

    assert_eq!(
        data.to_vec(),
        hex("f63a89b75c2271f9368816542ba52f06ed49241792302b00b5e8f80ae9a473af\
             c25b218f519af0fdd406362e8d69de7f54c604a6e00f353f110f771bdca8ab92\
             e5fbc34e60a1d9a9db17345b0a402736853bf910b060bdf1f897b6290f01d138\
             ae2c4c90225ba9ea14d518f55929dea098ca7a6ccfe61227053c84e49a4a3332")
    );
}

#[test]
fn large_counter_short_nonce_matches_zero_prefixed_long_nonce() {
    let key = [0x42; 32];
    let short = hex("1ada31d5cf688221");
    let long = hex("000000001ada31d5cf688221");

    let mut a = [0u8; 200];
    let mut b = [0u8; 200];
    CtrCipher::new(ChaCha20::new_large_counter(&key, &short).unwrap())
        .encrypt(&mut a)
        .unwrap();
    CtrCipher::new(ChaCha20::new_large_counter(&key, &long).unwrap())
        .encrypt(&mut b)
        .unwrap();

    assert_eq!(a, b);
}

// -------------------------------------------------------
// 2. DRIVER BEHAVIOUR
// -------------------------------------------------------

#[test]
fn seek_matches_sequential_keystream() {
    let key = [3u8; 32];
    let nonce = [5u8; 12];

    let mut sequential = [0u8; 64 * 5];
    chacha20(&key, &nonce).unwrap().encrypt(&mut sequential).unwrap();

    let mut cipher = chacha20(&key, &nonce).unwrap();
    cipher.seek(192).unwrap();
    let mut tail = [0u8; 128];
    cipher.encrypt(&mut tail).unwrap();

    assert_eq!(&sequential[192..], &tail[..]);
}

#[test]
fn seek_rejects_unaligned_offset() {
    let mut cipher = chacha20(&[0; 32], &[0; 12]).unwrap();
    assert_eq!(cipher.seek(65).unwrap_err(), CryptoError::InvalidOffset(65));
}

#[test]
fn seek_beyond_standard_counter() {
    let mut cipher = chacha20(&[0; 32], &[0; 12]).unwrap();
    let offset = (u64::from(u32::MAX) + 1) * 64;
    assert_eq!(
        cipher.seek(offset).unwrap_err(),
        CryptoError::InvalidOffset(offset)
    );
}

#[test]
fn standard_counter_overflow_is_fatal() {
    let mut cipher = chacha20(&[0; 32], &[0; 12]).unwrap();
    cipher.seek(u64::from(u32::MAX) * 64).unwrap();

    // The last block of the counter range is still available...
    let mut last = [0u8; 64];
    cipher.encrypt(&mut last).unwrap();

    // ...but nothing after it.
    let mut more = [0u8; 1];
    assert_eq!(
        cipher.encrypt(&mut more).unwrap_err(),
        CryptoError::CounterExhausted("ChaCha20 (RFC 7539)")
    );
}

#[test]
fn nonces_separate_keystreams() {
    let key = [9u8; 32];
    let mut a = [0u8; 64];
    let mut b = [0u8; 64];
    chacha20(&key, &[0; 12]).unwrap().encrypt(&mut a).unwrap();
    chacha20(&key, &[1; 12]).unwrap().encrypt(&mut b).unwrap();

    assert_ne!(a, b);
}

#[test]
fn generator_block_len() {
    assert_eq!(<ChaCha20 as KeystreamBlock>::BLOCK_LEN, 64);
    assert_eq!(chacha20(&[0; 32], &[0; 12]).unwrap().block_len(), 64);
}

// -------------------------------------------------------
// 3. PROPERTIES
// -------------------------------------------------------

proptest! {
    #[test]
    fn round_trip_after_seek(
        data in proptest::collection::vec(any::<u8>(), 0..400),
        key in proptest::array::uniform32(any::<u8>()),
        block in 0u64..1000,
    ) {
        let nonce = [7u8; 12];

        let mut encrypted = data.clone();
        let mut enc = chacha20(&key, &nonce).unwrap();
        enc.seek(block * 64).unwrap();
        enc.encrypt(&mut encrypted).unwrap();

        let mut dec = chacha20(&key, &nonce).unwrap();
        dec.seek(block * 64).unwrap();
        dec.decrypt(&mut encrypted).unwrap();

        prop_assert_eq!(encrypted, data);
    }

    #[test]
    fn split_calls_match_single_call(
        data in proptest::collection::vec(any::<u8>(), 0..400),
        split in 0usize..400,
    ) {
        let key = [1u8; 32];
        let nonce = [2u8; 12];
        let split = split.min(data.len());

        let mut whole = data.clone();
        chacha20(&key, &nonce).unwrap().encrypt(&mut whole).unwrap();

        let mut parts = data.clone();
        let mut cipher = chacha20(&key, &nonce).unwrap();
        let (head, tail) = parts.split_at_mut(split);
        cipher.encrypt(head).unwrap();
        cipher.encrypt(tail).unwrap();

        prop_assert_eq!(whole, parts);
    }
}
