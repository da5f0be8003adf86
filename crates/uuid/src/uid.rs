//! Canonical identifier type.

use crate::pattern::is_valid;
use crate::{UuidError, UuidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// A version-4 UUID in canonical form (36 lowercase characters, hyphenated).
///
/// This wrapper type guarantees that once constructed, the contained identifier is a valid
/// version-4 UUID and is lowercase. Two identifiers that differ only in case therefore compare
/// equal once parsed.
///
/// # Construction
/// - [`UuidGenerator::generate`](crate::UuidGenerator::generate) allocates a fresh identifier.
/// - [`Uid::parse`] validates and canonicalises an externally supplied string.
///
/// # Display format
/// `Uid` always displays in canonical form, e.g. `aa97b177-9383-4934-8543-0f91a7a02836`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Uid(String);

impl Uid {
    /// Validates `input` as a version-4 UUID and lowercases it.
    ///
    /// Unlike [`validate`](crate::validate), which only filters, this accepts any casing and
    /// normalises it.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not a hyphenated version-4 UUID.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if is_valid(input) {
            return Ok(Self(input.to_ascii_lowercase()));
        }
        Err(UuidError::InvalidInput(format!(
            "expected a hyphenated version-4 UUID, got: '{}'",
            input
        )))
    }

    /// Builds an identifier from 16 random bytes, forcing the version and variant bits.
    pub(crate) fn from_random_bytes(bytes: [u8; 16]) -> Self {
        let uuid = ::uuid::Builder::from_random_bytes(bytes).into_uuid();
        Self(uuid.hyphenated().to_string())
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier as a `uuid::Uuid`.
    pub fn as_uuid(&self) -> Uuid {
        // SAFETY: construction guarantees a well-formed hyphenated UUID
        Uuid::parse_str(&self.0).expect("Uid always holds a valid UUID")
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Uid {
    type Err = UuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uid::parse(s)
    }
}

impl TryFrom<&str> for Uid {
    type Error = UuidError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uid::parse(value)
    }
}

impl AsRef<str> for Uid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Uid> for String {
    fn from(uid: Uid) -> Self {
        uid.0
    }
}

impl PartialEq<str> for Uid {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Uid {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Uid::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercases() {
        let uid = Uid::parse("AA97B177-9383-4934-8543-0F91A7A02836").unwrap();
        assert_eq!(uid.as_str(), "aa97b177-9383-4934-8543-0f91a7a02836");
    }

    #[test]
    fn test_parse_case_variants_are_equal() {
        let lower = Uid::parse("aa97b177-9383-4934-8543-0f91a7a02836").unwrap();
        let mixed = Uid::parse("Aa97B177-9383-4934-8543-0f91A7a02836").unwrap();
        assert_eq!(lower, mixed);
    }

    #[test]
    fn test_parse_rejects_version_1() {
        let result = Uid::parse("aa97b177-9383-1934-8543-0f91a7a02836");

        assert!(result.is_err());
        match result {
            Err(UuidError::InvalidInput(msg)) => {
                assert!(msg.contains("version-4"));
            }
            _ => panic!("Expected InvalidInput error"),
        }
    }

    #[test]
    fn test_parse_rejects_braced_and_simple_forms() {
        assert!(Uid::parse("{aa97b177-9383-4934-8543-0f91a7a02836}").is_err());
        assert!(Uid::parse("aa97b1779383493485430f91a7a02836").is_err());
    }

    #[test]
    fn test_from_random_bytes_forces_version_and_variant() {
        let zeros = Uid::from_random_bytes([0u8; 16]);
        assert_eq!(zeros.as_str(), "00000000-0000-4000-8000-000000000000");

        let ones = Uid::from_random_bytes([0xff; 16]);
        assert_eq!(ones.as_str(), "ffffffff-ffff-4fff-bfff-ffffffffffff");
    }

    #[test]
    fn test_as_uuid_round_trip() {
        let uid = Uid::parse("aa97b177-9383-4934-8543-0f91a7a02836").unwrap();
        let uuid = uid.as_uuid();

        assert_eq!(uuid.get_version_num(), 4);
        assert_eq!(uuid.hyphenated().to_string(), uid.as_str());
    }

    #[test]
    fn test_from_str_and_display() {
        let uid: Uid = "AA97B177-9383-4934-8543-0F91A7A02836".parse().unwrap();
        assert_eq!(format!("{}", uid), "aa97b177-9383-4934-8543-0f91a7a02836");
        assert!("garbage".parse::<Uid>().is_err());
    }

    #[test]
    fn test_compares_with_str() {
        let uid = Uid::parse("aa97b177-9383-4934-8543-0f91a7a02836").unwrap();
        assert_eq!(uid, "aa97b177-9383-4934-8543-0f91a7a02836");
        assert_ne!(uid, "AA97B177-9383-4934-8543-0F91A7A02836");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let uid = Uid::parse("aa97b177-9383-4934-8543-0f91a7a02836").unwrap();
        let json = serde_json::to_string(&uid).unwrap();
        assert_eq!(json, "\"aa97b177-9383-4934-8543-0f91a7a02836\"");

        let parsed: Uid = serde_json::from_str("\"AA97B177-9383-4934-8543-0F91A7A02836\"").unwrap();
        assert_eq!(parsed, uid);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_rejects_invalid() {
        let result: Result<Uid, _> = serde_json::from_str("\"550e8400e29b41d4a716446655440000\"");
        assert!(result.is_err());
    }
}
