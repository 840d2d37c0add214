//! Raw and typed forms of the validated business fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Cups, RequestDate, RuleViolation};

/// The field text lifted out of the XML document before any typing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    /// Text content of the CUPS element.
    pub cups: String,
    /// Text content of the FechaSolicitud element.
    pub request_date: String,
}

/// A C1 request whose business fields have all been validated.
///
/// Values of this type only exist when every business rule passed; the
/// rules are evaluated in field order and the first violation wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct C1Request {
    pub cups: Cups,
    pub request_date: RequestDate,
}

impl C1Request {
    /// Types and rule-checks the raw fields against the reference date.
    pub fn from_raw(raw: &RawFields, today: NaiveDate) -> Result<Self, RuleViolation> {
        let cups = Cups::parse(&raw.cups)?;
        let request_date = RequestDate::parse(&raw.request_date, today)?;
        Ok(Self { cups, request_date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn valid_raw() -> RawFields {
        RawFields {
            cups: "ES0021000000000001AB".to_string(),
            request_date: "2026-09-01".to_string(),
        }
    }

    #[test]
    fn builds_from_valid_fields() {
        let request = C1Request::from_raw(&valid_raw(), today()).unwrap();
        assert_eq!(request.cups.as_str(), "ES0021000000000001AB");
        assert_eq!(request.request_date.to_string(), "2026-09-01");
    }

    #[test]
    fn cups_rule_is_checked_first() {
        let raw = RawFields {
            cups: "bad".to_string(),
            request_date: "also-bad".to_string(),
        };
        let err = C1Request::from_raw(&raw, today()).unwrap_err();
        assert!(matches!(err, RuleViolation::InvalidCups { .. }));
    }

    #[test]
    fn date_rule_fails_after_valid_cups() {
        let raw = RawFields {
            cups: "ES0021000000000001AB".to_string(),
            request_date: "2020-01-01".to_string(),
        };
        let err = C1Request::from_raw(&raw, today()).unwrap_err();
        assert!(matches!(err, RuleViolation::DateInPast { .. }));
    }
}
