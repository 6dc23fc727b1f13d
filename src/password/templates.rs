//! Password template classes and character classes.
//!
//! A template is a string of placeholders; each placeholder names a
//! character class from which one output character is picked. All tables
//! are compile-time constants.

use std::fmt;
use std::str::FromStr;

use crate::error::CryptoError;

const MAXIMUM_SECURITY: &[&str] = &["anoxxxxxxxxxxxxxxxxx", "axxxxxxxxxxxxxxxxxno"];

const LONG: &[&str] = &[
    "CvcvnoCvcvCvcv",
    "CvcvCvcvnoCvcv",
    "CvcvCvcvCvcvno",
    "CvccnoCvcvCvcv",
    "CvccCvcvnoCvcv",
    "CvccCvcvCvcvno",
    "CvcvnoCvccCvcv",
    "CvcvCvccnoCvcv",
    "CvcvCvccCvcvno",
    "CvcvnoCvcvCvcc",
    "CvcvCvcvnoCvcc",
    "CvcvCvcvCvccno",
    "CvccnoCvccCvcv",
    "CvccCvccnoCvcv",
    "CvccCvccCvcvno",
    "CvcvnoCvccCvcc",
    "CvcvCvccnoCvcc",
    "CvcvCvccCvccno",
    "CvccnoCvcvCvcc",
    "CvccCvcvnoCvcc",
    "CvccCvcvCvccno",
];

const MEDIUM: &[&str] = &["CvcnoCvc", "CvcCvcno"];

const BASIC: &[&str] = &["aaanaaan", "aannaaan", "aaannaaa"];

const SHORT: &[&str] = &["Cvcn"];

const PIN: &[&str] = &["nnnn"];

const NAME: &[&str] = &["cvccvcvcv"];

const PHRASE: &[&str] = &["cvcc cvc cvccvcv cvc", "cvc cvccvcvcv cvcv", "cv cvccv cvc cvcvccv"];

/// Named password template class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateClass {
    MaximumSecurity,
    Long,
    Medium,
    Basic,
    Short,
    Pin,
    Name,
    Phrase,
}

impl TemplateClass {
    /// Every class, in the order the names are usually listed.
    pub const ALL: [TemplateClass; 8] = [
        TemplateClass::MaximumSecurity,
        TemplateClass::Long,
        TemplateClass::Medium,
        TemplateClass::Basic,
        TemplateClass::Short,
        TemplateClass::Pin,
        TemplateClass::Name,
        TemplateClass::Phrase,
    ];

    /// Canonical class name, e.g. `"Long Password"`.
    pub const fn name(self) -> &'static str {
        match self {
            TemplateClass::MaximumSecurity => "Maximum Security Password",
            TemplateClass::Long => "Long Password",
            TemplateClass::Medium => "Medium Password",
            TemplateClass::Basic => "Basic Password",
            TemplateClass::Short => "Short Password",
            TemplateClass::Pin => "PIN",
            TemplateClass::Name => "Name",
            TemplateClass::Phrase => "Phrase",
        }
    }

    /// Ordered, non-empty list of templates for this class.
    pub const fn templates(self) -> &'static [&'static str] {
        match self {
            TemplateClass::MaximumSecurity => MAXIMUM_SECURITY,
            TemplateClass::Long => LONG,
            TemplateClass::Medium => MEDIUM,
            TemplateClass::Basic => BASIC,
            TemplateClass::Short => SHORT,
            TemplateClass::Pin => PIN,
            TemplateClass::Name => NAME,
            TemplateClass::Phrase => PHRASE,
        }
    }
}

impl fmt::Display for TemplateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemplateClass {
    type Err = CryptoError;

    /// Parses a canonical class name. Matching is exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateClass::ALL
            .into_iter()
            .find(|class| class.name() == s)
            .ok_or_else(|| CryptoError::UnknownTemplateClass(s.to_owned()))
    }
}

/// Characters a template placeholder may expand to, or `None` for an
/// unknown placeholder.
pub const fn character_class(placeholder: char) -> Option<&'static str> {
    Some(match placeholder {
        'V' => "AEIOU",
        'C' => "BCDFGHJKLMNPQRSTVWXYZ",
        'v' => "aeiou",
        'c' => "bcdfghjklmnpqrstvwxyz",
        'A' => "AEIOUBCDFGHJKLMNPQRSTVWXYZ",
        'a' => "AEIOUaeiouBCDFGHJKLMNPQRSTVWXYZbcdfghjklmnpqrstvwxyz",
        'n' => "0123456789",
        'o' => "@&%?,=[]_:-+*$#!'^~;()/.",
        'x' => "AEIOUaeiouBCDFGHJKLMNPQRSTVWXYZbcdfghjklmnpqrstvwxyz0123456789!@#$%^&*()",
        ' ' => " ",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_placeholder_has_a_class() {
        for class in TemplateClass::ALL {
            assert!(!class.templates().is_empty(), "{class} has no templates");
            for template in class.templates() {
                for placeholder in template.chars() {
                    let chars = character_class(placeholder)
                        .unwrap_or_else(|| panic!("{class}: unknown placeholder {placeholder:?}"));
                    assert!(!chars.is_empty());
                }
            }
        }
    }

    #[test]
    fn class_sizes() {
        assert_eq!(TemplateClass::Long.templates().len(), 21);
        assert_eq!(character_class('x').map(str::len), Some(72));
        assert_eq!(character_class('o').map(str::len), Some(24));
        assert_eq!(character_class('a').map(str::len), Some(52));
        assert_eq!(character_class('?'), None);
    }

    #[test]
    fn names_round_trip() {
        for class in TemplateClass::ALL {
            assert_eq!(class.name().parse::<TemplateClass>(), Ok(class));
        }
        assert_eq!(
            "long password".parse::<TemplateClass>(),
            Err(CryptoError::UnknownTemplateClass("long password".into()))
        );
    }

    #[test]
    fn templates_within_a_class_share_a_length() {
        for class in TemplateClass::ALL {
            if class == TemplateClass::Phrase {
                continue;
            }
            let len = class.templates()[0].len();
            assert!(class.templates().iter().all(|t| t.len() == len), "{class}");
        }
    }
}
