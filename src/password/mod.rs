//! Master Password key derivation and site password generation
//!
//! A user's identifier and master secret are stretched with scrypt into a
//! 64-byte [`MasterKey`]. For each site, a caller-supplied [`KeyedMac`]
//! authenticates the site name and counter under that key, and the
//! resulting seed picks a template and the characters that fill it.
//!
//! ```text
//! (identifier, secret) --scrypt--> MasterKey --mac(site, counter)--> seed --template--> password
//! ```
//!
//! Nothing is cached; the same inputs always give the same password.

mod generator;
mod key;
mod mac;
pub mod templates;

pub use generator::generate_password;
pub use key::{MasterKey, derive_key};
pub use mac::{HmacSha256Mac, KeyedMac};
pub use templates::{TemplateClass, character_class};

/// Scope string prefixed to every salt and site message.
pub const MASTER_PASSWORD_SCOPE: &str = "com.lyndir.masterpassword";

/// Master key size in bytes.
pub const MASTER_KEY_LEN: usize = 64;
