//! RequestDate value object - the FechaSolicitud business field.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::outcome::RuleViolation;

/// A validated request date.
///
/// Admissible only when it is on or after the reference date supplied at
/// construction. The reference date is always injected by the caller; the
/// domain never samples the clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestDate(NaiveDate);

impl RequestDate {
    /// Parses an ISO-8601 calendar date and checks it is not in the past
    /// relative to `today`.
    pub fn parse(value: &str, today: NaiveDate) -> Result<Self, RuleViolation> {
        let trimmed = value.trim();
        let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
            RuleViolation::UnparseableDate {
                value: trimmed.to_string(),
            }
        })?;

        if date < today {
            return Err(RuleViolation::DateInPast { date, today });
        }

        Ok(Self(date))
    }

    /// Returns the inner calendar date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for RequestDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
