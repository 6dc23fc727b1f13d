//! Keyed MAC capability used to turn a site message into a seed.

use zeroize::Zeroizing;

use crate::hash::hmac::hmac_sha256;

/// A keyed message authentication function.
///
/// The generator never picks a MAC on its own; callers pass one in. Any
/// closure `Fn(&[u8], &[u8]) -> Vec<u8>` taking `(key, message)` qualifies.
pub trait KeyedMac {
    /// Returns the tag of `message` under `key`.
    fn mac(&self, key: &[u8], message: &[u8]) -> Vec<u8>;
}

impl<F> KeyedMac for F
where
    F: Fn(&[u8], &[u8]) -> Vec<u8>,
{
    fn mac(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        self(key, message)
    }
}

/// HMAC-SHA-256, the MAC master-password site seeds are defined with.
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha256Mac;

impl KeyedMac for HmacSha256Mac {
    fn mac(&self, key: &[u8], message: &[u8]) -> Vec<u8> {
        let tag = Zeroizing::new(hmac_sha256(key, message));
        tag.to_vec()
    }
}
