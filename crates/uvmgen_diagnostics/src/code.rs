//! Diagnostic codes such as `E101` or `W302`.
//!
//! The hundreds digit groups codes by the engine stage that raises them; see
//! [`DiagnosticCode::stage`].

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Whether a code marks a hard failure or a degraded result.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Hard failures (validation, unreadable DUT), prefixed with `E`.
    Error,
    /// Degraded-but-usable results, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }

    fn from_prefix(c: char) -> Option<Self> {
        match c {
            'E' => Some(Category::Error),
            'W' => Some(Category::Warning),
            _ => None,
        }
    }
}

/// The engine stage a code belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Stage {
    /// `x1xx`: pre-flight validation and DUT introspection.
    Validation,
    /// `x2xx`: snapshot normalization and overrides.
    Normalization,
    /// `x3xx`: workflow progress.
    Workflow,
    /// Anything else.
    Other,
}

/// A category plus a number, shown as `W201`.
///
/// Serializes as that string so JSON output matches the terminal form.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DiagnosticCode {
    /// Error or warning.
    pub category: Category,
    /// The number within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// The stage named by the hundreds digit.
    pub fn stage(self) -> Stage {
        match self.number / 100 {
            1 => Stage::Validation,
            2 => Stage::Normalization,
            3 => Stage::Workflow,
            _ => Stage::Other,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

/// Why a string is not a diagnostic code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseCodeError(String);

impl fmt::Display for ParseCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid diagnostic code '{}'", self.0)
    }
}

impl std::error::Error for ParseCodeError {}

impl FromStr for DiagnosticCode {
    type Err = ParseCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCodeError(s.to_string());
        let mut chars = s.chars();
        let category = chars.next().and_then(Category::from_prefix).ok_or_else(err)?;
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let number = digits.parse().map_err(|_| err())?;
        Ok(DiagnosticCode::new(category, number))
    }
}

impl Serialize for DiagnosticCode {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DiagnosticCode {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let text = String::deserialize(d)?;
        text.parse().map_err(de::Error::custom)
    }
}
