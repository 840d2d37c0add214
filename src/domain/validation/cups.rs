//! CUPS value object - the universal supply point code.
//!
//! A CUPS (Codigo Universal del Punto de Suministro) identifies the supply
//! point a C1 switch request refers to. The format accepted here is the
//! 20-character form: `ES` followed by 18 uppercase alphanumerics.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::RuleViolation;

static CUPS_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ES[A-Z0-9]{18}$").expect("CUPS pattern must compile"));

/// A validated supply point code.
///
/// Construction through [`Cups::parse`] is the only validation point; a
/// value of this type always matches the accepted format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cups(String);

impl Cups {
    /// Parses a supply point code, rejecting anything outside the
    /// `ES` + 18 uppercase alphanumerics format.
    pub fn parse(value: &str) -> Result<Self, RuleViolation> {
        let trimmed = value.trim();
        if CUPS_PATTERN.is_match(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(RuleViolation::InvalidCups {
                value: trimmed.to_string(),
            })
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
