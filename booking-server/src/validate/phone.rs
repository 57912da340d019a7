//! Mobile phone number patterns.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

/// Error returned when parsing an unknown phone pattern name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phone pattern {0:?} (expected \"lenient\" or \"indian\")")]
pub struct UnknownPhonePattern(String);

/// Which phone numbers count as valid mobile numbers.
///
/// # Examples
///
/// ```
/// use booking_server::validate::PhonePattern;
///
/// assert!(PhonePattern::Lenient.matches("+44 7700 900123"));
/// assert!(PhonePattern::Indian.matches("+919876543210"));
/// assert!(!PhonePattern::Indian.matches("5876543210"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PhonePattern {
    /// Optional leading `+`, then 10-15 digits. Single spaces or hyphens may
    /// separate digit groups.
    #[default]
    Lenient,

    /// A 10-digit Indian mobile number starting 6-9, optionally prefixed by
    /// `+91`, `91` or `0`.
    Indian,
}

impl PhonePattern {
    /// Check an already-trimmed phone number.
    pub fn matches(&self, phone: &str) -> bool {
        self.regex().is_match(phone)
    }

    /// The compiled expression behind this pattern.
    pub fn regex(&self) -> &'static Regex {
        match self {
            PhonePattern::Lenient => &LENIENT,
            PhonePattern::Indian => &INDIAN,
        }
    }
}

impl FromStr for PhonePattern {
    type Err = UnknownPhonePattern;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(PhonePattern::Lenient),
            "indian" | "en-in" => Ok(PhonePattern::Indian),
            _ => Err(UnknownPhonePattern(s.to_string())),
        }
    }
}

impl fmt::Display for PhonePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhonePattern::Lenient => f.write_str("lenient"),
            PhonePattern::Indian => f.write_str("indian"),
        }
    }
}

/// Optional `+`, then 10-15 ASCII digits with at most one space or hyphen
/// between neighbouring digits.
const LENIENT_PATTERN: &str = r"^\+?[0-9](?:[ -]?[0-9]){9,14}$";

/// Optional `+91`, `91` or `0`, then ten digits starting 6-9.
const INDIAN_PATTERN: &str = r"^(?:\+91|91|0)?[6-9][0-9]{9}$";

static LENIENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LENIENT_PATTERN).expect("lenient phone pattern compiles"));

static INDIAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INDIAN_PATTERN).expect("indian phone pattern compiles"));
