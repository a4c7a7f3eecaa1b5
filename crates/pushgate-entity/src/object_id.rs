//! Git object identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pushgate_core::{AppError, AppResult};

/// Length of a hex-encoded SHA-1 object name.
pub const HEX_LEN: usize = 40;

/// A 40-hex-digit Git object name, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// The all-zero id Git uses for "no object" (ref creation or deletion).
    pub fn zero() -> Self {
        Self("0".repeat(HEX_LEN))
    }

    /// Parses a hex object name, accepting either case.
    pub fn parse(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.len() != HEX_LEN {
            return Err(AppError::validation(format!(
                "Invalid object id '{s}': expected {HEX_LEN} hex digits, got {}",
                s.len()
            )));
        }
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::validation(format!(
                "Invalid object id '{s}': not a hex string"
            )));
        }
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Whether this is the all-zero id.
    pub fn is_zero(&self) -> bool {
        self.0.bytes().all(|b| b == b'0')
    }

    /// Returns the full hex name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated name used in log lines and mail subjects.
    pub fn short(&self) -> &str {
        &self.0[..8]
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ObjectId {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> String {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let id = ObjectId::parse("C18877690322DFC6AE3E37BB7F7085A24E94E887").expect("valid");
        assert_eq!(id.as_str(), "c18877690322dfc6ae3e37bb7f7085a24e94e887");
        assert_eq!(id.short(), "c1887769");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ObjectId::parse("c188776").is_err());
        assert!(ObjectId::parse("z18877690322dfc6ae3e37bb7f7085a24e94e887").is_err());
    }

    #[test]
    fn test_zero() {
        assert!(ObjectId::zero().is_zero());
        let id: ObjectId = "3fa7c46d11b11d61f1cbadc6888be5d0eae21969".parse().expect("valid");
        assert!(!id.is_zero());
    }
}
