//! Site password generation.

use tracing::trace;
use zeroize::Zeroizing;

use super::MASTER_PASSWORD_SCOPE;
use super::key::MasterKey;
use super::mac::KeyedMac;
use super::templates::{TemplateClass, character_class};
use crate::error::{CryptoError, Result};

/// Appends the big-endian 32-bit length of `bytes`, then `bytes`.
pub(super) fn length_prefixed(buf: &mut Vec<u8>, bytes: &[u8]) -> Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| CryptoError::InputTooLong(bytes.len()))?;
    buf.extend_from_slice(&len.to_be_bytes());
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Message authenticated to produce the site seed:
/// scope, length-prefixed site name, big-endian counter.
fn site_message(site_name: &str, counter: u32) -> Result<Vec<u8>> {
    let mut message = MASTER_PASSWORD_SCOPE.as_bytes().to_vec();
    length_prefixed(&mut message, site_name.as_bytes())?;
    message.extend_from_slice(&counter.to_be_bytes());
    Ok(message)
}

/// Fills `template`, picking character `i` from its placeholder's class
/// with `seed[i]`.
fn fill(template: &str, seed: &[u8]) -> Result<Zeroizing<String>> {
    let mut password = Zeroizing::new(String::with_capacity(template.len()));
    for (placeholder, &byte) in template.chars().zip(seed) {
        let chars = character_class(placeholder).ok_or_else(|| {
            debug_assert!(false, "placeholder {placeholder:?} missing from class table");
            CryptoError::UnknownPlaceholder(placeholder)
        })?;
        let pick = chars.as_bytes()[byte as usize % chars.len()];
        password.push(char::from(pick));
    }
    Ok(password)
}

pub(super) fn generate<M: KeyedMac + ?Sized>(
    class: TemplateClass,
    site_name: &str,
    key: &MasterKey,
    counter: u32,
    mac: &M,
) -> Result<Zeroizing<String>> {
    if counter == 0 {
        return Err(CryptoError::InvalidCounter);
    }

    let message = site_message(site_name, counter)?;
    let seed = Zeroizing::new(mac.mac(key.as_bytes(), &message));

    let Some(&selector) = seed.first() else {
        return Err(CryptoError::SeedTooShort {
            needed: 1,
            actual: 0,
        });
    };

    let templates = class.templates();
    let template = templates[selector as usize % templates.len()];
    if seed.len() < template.len() + 1 {
        return Err(CryptoError::SeedTooShort {
            needed: template.len() + 1,
            actual: seed.len(),
        });
    }

    let password = fill(template, &seed[1..])?;
    trace!(class = class.name(), counter, "site password generated");
    Ok(password)
}

/// Generates the password for `site_name`.
///
/// The seed is `mac(key, message)` where `message` is the scope string, the
/// big-endian 32-bit byte length of `site_name`, its UTF-8 bytes and the
/// big-endian counter. `seed[0]` selects the template within the class;
/// `seed[i + 1]` selects character `i` from the class of placeholder `i`.
///
/// # Errors
/// - [`CryptoError::InvalidCounter`] if `counter` is 0.
/// - [`CryptoError::UnknownTemplateClass`] if `template_class` is not one of
///   the canonical class names (see [`TemplateClass::name`]).
/// - [`CryptoError::SeedTooShort`] if the MAC output is shorter than the
///   chosen template plus one byte.
pub fn generate_password<M: KeyedMac + ?Sized>(
    template_class: &str,
    site_name: &str,
    key: &MasterKey,
    counter: u32,
    mac: &M,
) -> Result<Zeroizing<String>> {
    if counter == 0 {
        return Err(CryptoError::InvalidCounter);
    }
    let class = template_class.parse::<TemplateClass>()?;
    generate(class, site_name, key, counter, mac)
}
