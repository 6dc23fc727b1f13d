use std::io::{Read, Write};

use vaultcrypt::cipher::{CtrReader, CtrWriter, chacha20, salsa20};

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}

const IETF_CONTRIBUTION: &[u8] = b"Any submission to the IETF intended by the Contributor for \
publication as all or part of an IETF Internet-Draft or RFC and any statement made within the \
context of an IETF activity is considered an \"IETF Contribution\". Such statements include \
oral statements in IETF sessions, as well as written and electronic communications made at any \
time or place, which are addressed to";

const IETF_EXPECTED: &str = "a3fbf07df3fa2fde4f376ca23e82737041605d9f4f4f57bd8cff2c1d4b7955ec\
2a97948bd3722915c8f3d337f7d370050e9e96d647b7c39f56e031ca5eb6250d\
4042e02785ececfa4b4bb5e8ead0440e20b6e8db09d881a7c6132f420e527950\
42bdfa7773d8a9051447b3291ce1411c680465552aa6c405b7764d5e87bea85a\
d00f8449ed8f72d0d662ab052691ca66424bc86d2df80ea41f43abf937d3259d\
c4b2d0dfb48a6c9139ddd7f76966e928e635553ba76c5c879d7b35d49eb2e62b\
0871cdac638939e25e8a1e0ef9d5280fa8ca328b351c3c765989cbcf3daa8b6c\
cc3aaf9f3979c92b3720fc88dc95ed84a1be059c6499b9fda236e7e818b04b0b\
c39c1e876b193bfe5569753f88128cc08aaa9b63d1a16f80ef2554d7189c411f\
5869ca52c5b83fa36ff216b9c1d30062bebcfd2dc5bce0911934fda79a86f6e6\
98ced759c3ff9b6477338f3da4f9cd8514ea9982ccafb341b2384dd902f3d1ab\
7ac61dd29c6f21ba5b862f3730e37cfdc4fd806c22f221";

fn ietf_key_and_nonce() -> ([u8; 32], [u8; 12]) {
    let mut key = [0u8; 32];
    key[31] = 1;
    let mut nonce = [0u8; 12];
    nonce[11] = 2;
    (key, nonce)
}

#[test]
fn writer_rfc7539_a2_vector_in_uneven_writes() {
    let (key, nonce) = ietf_key_and_nonce();

    for chunk in [1, 5, 63, 64, 65, 200] {
        let mut writer = CtrWriter::new(Vec::new(), chacha20(&key, &nonce).unwrap());

        // The vector starts at block 1.
        writer.write_all(&[0u8; 64]).unwrap();
        for piece in IETF_CONTRIBUTION.chunks(chunk) {
            writer.write_all(piece).unwrap();
        }
        writer.flush().unwrap();

        let out = writer.into_inner().unwrap();
        assert_eq!(out[64..].to_vec(), hex(IETF_EXPECTED), "chunk {chunk}");
    }
}

#[test]
fn reader_inverts_writer() {
    let key = [0x77; 32];
    let iv = [0x01; 8];
    let plaintext: Vec<u8> = (0..1000).map(|i| (i * 31 % 256) as u8).collect();

    let mut writer = CtrWriter::new(Vec::new(), salsa20(&key, &iv).unwrap());
    writer.write_all(&plaintext).unwrap();
    let ciphertext = writer.into_inner().unwrap();
    assert_ne!(ciphertext, plaintext);

    let mut reader = CtrReader::new(&ciphertext[..], salsa20(&key, &iv).unwrap());
    let mut small = [0u8; 10];
    reader.read_exact(&mut small).unwrap();
    let mut rest = Vec::new();
    reader.read_to_end(&mut rest).unwrap();

    assert_eq!(&small[..], &plaintext[..10]);
    assert_eq!(rest, &plaintext[10..]);
}
