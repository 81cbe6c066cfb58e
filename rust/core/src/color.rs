// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Colour keys joining sampled texture colours to semantic instances

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Packed 24-bit RGB colour used as the join key between geometry and annotations.
///
/// Keys hash and compare as integers; the 6-digit uppercase hex form only
/// appears at the text boundary (annotation files, JSON output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey(u32);

impl ColorKey {
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[inline]
    pub const fn rgb(self) -> [u8; 3] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8]
    }

    /// Raw packed value (`0xRRGGBB`)
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Parse a hex colour such as `FF0000`, `ff0000` or `#FF0000`
    pub fn parse_hex(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColorKey(text.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| Error::InvalidColorKey(text.to_string()))
    }

    /// Case-insensitive comparison against a hex string
    pub fn matches_hex(self, hex: &str) -> bool {
        Self::parse_hex(hex).map(|other| other == self).unwrap_or(false)
    }

    /// Canonical 6-digit uppercase form
    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

impl FromStr for ColorKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ColorKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ColorKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_hex(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_uppercase_fixed_width() {
        assert_eq!(ColorKey::from_rgb(0xFF, 0, 0).to_hex(), "FF0000");
        assert_eq!(ColorKey::from_rgb(0, 0x0A, 0x01).to_hex(), "000A01");
        assert_eq!(ColorKey::from_rgb(0x2a, 0x5e, 0x1f).to_string(), "2A5E1F");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let upper = ColorKey::parse_hex("2A5E1F").unwrap();
        let lower = ColorKey::parse_hex("2a5e1f").unwrap();
        let hashed = ColorKey::parse_hex("#2a5E1f").unwrap();
        assert_eq!(upper, lower);
        assert_eq!(upper, hashed);
        assert_eq!(upper.rgb(), [0x2A, 0x5E, 0x1F]);
    }

    #[test]
    fn test_matches_hex() {
        let key = ColorKey::from_rgb(0xAB, 0xCD, 0xEF);
        assert!(key.matches_hex("abcdef"));
        assert!(key.matches_hex("ABCDEF"));
        assert!(!key.matches_hex("ABCDEE"));
        assert!(!key.matches_hex("not a colour"));
    }

    #[test]
    fn test_rejects_invalid_hex() {
        assert!(ColorKey::parse_hex("FFF").is_err());
        assert!(ColorKey::parse_hex("GG0000").is_err());
        assert!(ColorKey::parse_hex("+FFFFF").is_err());
        assert!(ColorKey::parse_hex("FF00000").is_err());
    }
}
