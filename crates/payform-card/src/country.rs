//! Country codes and postal code policy.

use std::fmt;
use std::str::FromStr;

/// ISO 3166-1 alpha-2 country code, stored uppercase.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CountryCode([u8; 2]);

/// Error returned when parsing a [`CountryCode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryCodeError {
    InvalidLength(usize),
    NonAlphabetic(String),
}

impl fmt::Display for CountryCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountryCodeError::InvalidLength(len) => {
                write!(f, "country code must have 2 letters, got {len}")
            }
            CountryCodeError::NonAlphabetic(code) => {
                write!(f, "country code {code:?} contains non-alphabetic characters")
            }
        }
    }
}

impl std::error::Error for CountryCodeError {}

/// How a country constrains the postal code segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostalPolicy {
    /// The country has no postal codes; the segment does not participate.
    NotRequired,
    /// Required, any non-empty value is accepted.
    Freeform,
    /// Required, digits only with one of the listed lengths.
    Numeric { lengths: &'static [usize] },
}

impl PostalPolicy {
    pub fn is_required(&self) -> bool {
        !matches!(self, PostalPolicy::NotRequired)
    }
}

/// Countries that do not use postal codes.
const COUNTRIES_WITHOUT_POSTAL_CODES: &[&str] = &[
    "AE", "AG", "AN", "AO", "AW", "BF", "BI", "BJ", "BO", "BS", "BW", "BZ", "CD", "CF", "CG",
    "CI", "CK", "CM", "DJ", "DM", "ER", "FJ", "GD", "GH", "GM", "GN", "GQ", "GY", "HK", "IE",
    "JM", "KE", "KI", "KM", "KN", "KP", "LC", "ML", "MO", "MR", "MS", "MU", "MW", "NR", "NU",
    "PA", "QA", "RW", "SB", "SC", "SL", "SO", "SR", "ST", "SY", "TF", "TK", "TL", "TO", "TT",
    "TV", "TZ", "UG", "VU", "YE", "ZW",
];

impl CountryCode {
    pub const US: CountryCode = CountryCode(*b"US");

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    pub fn postal_policy(&self) -> PostalPolicy {
        if *self == Self::US {
            return PostalPolicy::Numeric { lengths: &[5, 9] };
        }
        if COUNTRIES_WITHOUT_POSTAL_CODES.contains(&self.as_str()) {
            PostalPolicy::NotRequired
        } else {
            PostalPolicy::Freeform
        }
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        Self::US
    }
}

impl FromStr for CountryCode {
    type Err = CountryCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bytes = trimmed.as_bytes();
        if bytes.len() != 2 {
            return Err(CountryCodeError::InvalidLength(trimmed.chars().count()));
        }
        if !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(CountryCodeError::NonAlphabetic(trimmed.to_string()));
        }
        Ok(CountryCode([
            bytes[0].to_ascii_uppercase(),
            bytes[1].to_ascii_uppercase(),
        ]))
    }
}

impl fmt::Debug for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountryCode({})", self.as_str())
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
