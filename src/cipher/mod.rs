//! Symmetric ciphers
//!
//! - [`ctr`]: keystream generator trait and the counter-mode driver
//! - [`chacha20`], [`salsa20`]: keystream generators
//! - [`stream`]: `std::io` adapters over the driver
//! - [`twofish`]: block cipher
//! - [`cbc`]: CBC mode with PKCS#7 padding over any [`BlockCipher`]

pub mod cbc;
pub mod chacha20;
pub mod ctr;
pub mod salsa20;
pub mod stream;
pub mod twofish;

pub use cbc::{BlockCipher, Cbc, twofish_cbc};
pub use chacha20::{ChaCha20, chacha20};
pub use ctr::{CtrCipher, KeystreamBlock};
pub use salsa20::{Salsa20, salsa20};
pub use stream::{CtrReader, CtrWriter};
pub use twofish::{Direction, Twofish};
