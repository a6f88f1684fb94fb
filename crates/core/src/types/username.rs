//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum UsernameError {
    /// The input string is empty.
    #[error("username cannot be empty")]
    Empty,
    /// The input string is too short.
    #[error("username must be at least {min} characters")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input string is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside the allowed set.
    #[error("username may only contain lowercase letters, digits, '_', '.' and '-'")]
    InvalidCharacter,
}

/// A marketplace username.
///
/// Usernames are the public handle a shopper logs in with and the identity
/// shown on outfit boards, so they are normalized to lowercase at the
/// boundary and kept to a URL-safe character set.
///
/// ## Constraints
///
/// - Length: 3-32 characters
/// - Allowed characters: `a-z`, `0-9`, `_`, `.`, `-`
/// - Uppercase input is accepted and folded to lowercase
///
/// ## Examples
///
/// ```
/// use dripden_core::Username;
///
/// assert!(Username::parse("alice").is_ok());
/// assert!(Username::parse("street.wear-99").is_ok());
///
/// assert!(Username::parse("").is_err());      // empty
/// assert!(Username::parse("ab").is_err());    // too short
/// assert!(Username::parse("no spaces").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Minimum length of a username.
    pub const MIN_LENGTH: usize = 3;

    /// Maximum length of a username.
    pub const MAX_LENGTH: usize = 32;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is shorter than 3 or longer than 32 characters
    /// - Contains characters outside `[a-z0-9_.-]` (after lowercasing)
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        if s.is_empty() {
            return Err(UsernameError::Empty);
        }

        let normalized = s.to_lowercase();

        if normalized.len() < Self::MIN_LENGTH {
            return Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
            });
        }

        if normalized.len() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-'))
        {
            return Err(UsernameError::InvalidCharacter);
        }

        Ok(Self(normalized))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let u = Username::parse("alice").expect("valid username");
        assert_eq!(u.as_str(), "alice");
    }

    #[test]
    fn test_parse_normalizes_case() {
        let u = Username::parse("StreetWear99").expect("valid username");
        assert_eq!(u.as_str(), "streetwear99");
    }

    #[test]
    fn test_parse_allows_separators() {
        assert!(Username::parse("street.wear-99").is_ok());
        assert!(Username::parse("under_score").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Username::parse(""), Err(UsernameError::Empty)));
    }

    #[test]
    fn test_parse_too_short() {
        assert!(matches!(
            Username::parse("ab"),
            Err(UsernameError::TooShort { min: 3 })
        ));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(33);
        assert!(matches!(
            Username::parse(&long),
            Err(UsernameError::TooLong { max: 32 })
        ));
    }

    #[test]
    fn test_parse_rejects_spaces_and_symbols() {
        assert!(Username::parse("no spaces").is_err());
        assert!(Username::parse("emoji🔥").is_err());
        assert!(Username::parse("at@sign").is_err());
    }
}
