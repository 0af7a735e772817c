use std::fmt::{self, Display};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Outcome of the minimal-exponent search.
///
/// `Infinite` means no nonzero `APD(m)` was found for any `m` up to
/// `n(n-1)/2`. It orders after every finite exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MinimalExponent {
    /// Smallest `m >= 1` with `APD(m) != 0`.
    Finite(u32),
    /// No nonzero sum up to the probe limit.
    Infinite,
}

impl MinimalExponent {
    /// Returns the exponent when finite.
    pub fn finite(self) -> Option<u32> {
        match self {
            MinimalExponent::Finite(m) => Some(m),
            MinimalExponent::Infinite => None,
        }
    }

    /// Returns `true` for the infinite sentinel.
    pub fn is_infinite(self) -> bool {
        self == MinimalExponent::Infinite
    }
}

impl Display for MinimalExponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MinimalExponent::Finite(m) => write!(f, "{m}"),
            MinimalExponent::Infinite => f.write_str("inf"),
        }
    }
}

/// Error returned when parsing a [`MinimalExponent`] from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseExponentError(String);

impl Display for ParseExponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid exponent `{}`: expected a positive integer or `inf`", self.0)
    }
}

impl std::error::Error for ParseExponentError {}

impl FromStr for MinimalExponent {
    type Err = ParseExponentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("inf") {
            return Ok(MinimalExponent::Infinite);
        }
        match trimmed.parse::<u32>() {
            Ok(m) if m > 0 => Ok(MinimalExponent::Finite(m)),
            _ => Err(ParseExponentError(s.to_string())),
        }
    }
}

// Finite exponents are plain numbers, the sentinel is the string "inf". Map
// keys arrive as strings, so `visit_str` accepts digits too.
impl Serialize for MinimalExponent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MinimalExponent::Finite(m) => serializer.serialize_u32(*m),
            MinimalExponent::Infinite => serializer.serialize_str("inf"),
        }
    }
}

struct ExponentVisitor;

impl<'de> Visitor<'de> for ExponentVisitor {
    type Value = MinimalExponent;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a positive integer or \"inf\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        match u32::try_from(value) {
            Ok(m) if m > 0 => Ok(MinimalExponent::Finite(m)),
            _ => Err(E::invalid_value(de::Unexpected::Unsigned(value), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        match u64::try_from(value) {
            Ok(unsigned) => self.visit_u64(unsigned),
            Err(_) => Err(E::invalid_value(de::Unexpected::Signed(value), &self)),
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        value
            .parse()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
    }
}

impl<'de> Deserialize<'de> for MinimalExponent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExponentVisitor)
    }
}
