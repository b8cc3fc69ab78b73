//! Join codes: the 5-character key players share to invite others.
//!
//! A join code is drawn from a 33-symbol alphabet: uppercase letters and
//! digits, minus the letters `I`, `O` and `Z`. Validation is exact: length
//! 5, every character in the alphabet, case-sensitive. Lowercase input is
//! rejected rather than normalized, so a code always names exactly one
//! search key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Every symbol a join code may contain.
pub const JOIN_CODE_ALPHABET: &str = "ABCDEFGHJKLMNPQRSTUVWXY0123456789";

/// Exact number of characters in a join code.
pub const JOIN_CODE_LEN: usize = 5;

/// The accepted shape, as a regular expression clients can display or
/// reuse for their own pre-validation.
pub const JOIN_CODE_PATTERN: &str = "[ABCDEFGHJKLMNPQRSTUVWXY0-9]{5}";

/// A validated join code.
///
/// The only way to build one is [`JoinCode::parse`] (or `FromStr` /
/// `TryFrom<String>`), so holding a `JoinCode` proves the string has the
/// right shape. Serde goes through the same validation on deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JoinCode(String);

impl JoinCode {
    /// Validates `input` and wraps it.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidJoinCode`] if `input` isn't exactly
    /// [`JOIN_CODE_LEN`] characters from [`JOIN_CODE_ALPHABET`].
    pub fn parse(input: &str) -> Result<Self, ProtocolError> {
        // Counting chars, not bytes: a multi-byte character must not be
        // able to sneak past the length check.
        let valid = input.chars().count() == JOIN_CODE_LEN
            && input.chars().all(|c| JOIN_CODE_ALPHABET.contains(c));
        if valid {
            Ok(Self(input.to_owned()))
        } else {
            Err(ProtocolError::InvalidJoinCode(input.to_owned()))
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JoinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JoinCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for JoinCode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for JoinCode {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<JoinCode> for String {
    fn from(code: JoinCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_alphabet_has_33_symbols() {
        assert_eq!(JOIN_CODE_ALPHABET.chars().count(), 33);
        for ambiguous in ['I', 'O', 'Z'] {
            assert!(!JOIN_CODE_ALPHABET.contains(ambiguous));
        }
    }

    #[test]
    fn test_parse_valid_code_succeeds() {
        let code = JoinCode::parse("AB123").expect("valid code");
        assert_eq!(code.as_str(), "AB123");
        assert_eq!(code.to_string(), "AB123");
    }

    #[test]
    fn test_parse_wrong_length_fails() {
        for input in ["", "AB12", "AB1234", "ABCDEFGH"] {
            assert!(
                matches!(JoinCode::parse(input), Err(ProtocolError::InvalidJoinCode(_))),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_excluded_letters_fail() {
        assert!(JoinCode::parse("ABCDI").is_err());
        assert!(JoinCode::parse("ABCDO").is_err());
        assert!(JoinCode::parse("ABCDZ").is_err());
    }

    #[test]
    fn test_parse_lowercase_fails() {
        assert!(JoinCode::parse("ab123").is_err());
    }

    #[test]
    fn test_parse_multibyte_chars_fail() {
        // Five chars, but none from the alphabet.
        assert!(JoinCode::parse("ÀÀÀÀÀ").is_err());
        // Byte length 5, char length 4.
        assert!(JoinCode::parse("AB1é").is_err());
    }

    #[test]
    fn test_parse_surrounding_whitespace_fails() {
        assert!(JoinCode::parse(" AB123").is_err());
        assert!(JoinCode::parse("AB123\n").is_err());
    }

    #[test]
    fn test_parse_random_alphabet_codes_succeed() {
        let symbols: Vec<char> = JOIN_CODE_ALPHABET.chars().collect();
        let mut rng = rand::rng();
        for _ in 0..500 {
            let code: String = (0..JOIN_CODE_LEN)
                .map(|_| symbols[rng.random_range(0..symbols.len())])
                .collect();
            assert!(JoinCode::parse(&code).is_ok(), "{code} should be valid");
        }
    }

    #[test]
    fn test_parse_random_outside_alphabet_fails() {
        let mut rng = rand::rng();
        for _ in 0..500 {
            let mut code: Vec<char> = "AB123".chars().collect();
            let bad = loop {
                let c = char::from(rng.random_range(0x20u8..0x7f));
                if !JOIN_CODE_ALPHABET.contains(c) {
                    break c;
                }
            };
            let pos = rng.random_range(0..JOIN_CODE_LEN);
            code[pos] = bad;
            let code: String = code.into_iter().collect();
            assert!(JoinCode::parse(&code).is_err(), "{code:?} should be invalid");
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: JoinCode = serde_json::from_str("\"XY789\"").expect("valid");
        assert_eq!(ok.as_str(), "XY789");
        assert!(serde_json::from_str::<JoinCode>("\"xy789\"").is_err());
    }
}
