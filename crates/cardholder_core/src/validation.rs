//! Field-level validation results.
//!
//! Forms derive [`validator::Validate`]; this module flattens the resulting
//! [`ValidationErrors`] into a plain list of [`FieldViolation`]s that the
//! console can render next to each field.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use validator::{ValidateEmail, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::models::CardType;

/// Date format used by the backend for expiration dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FieldViolation {
    /// Field path, e.g. `email` or `credit_cards[1].cvv`
    pub field: String,
    /// Rule code: `required`, `email`, `length`, `range`, `iso_date`, `card_type`, `number`
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl FieldViolation {
    pub fn new(
        field: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Same violation with `prefix.` prepended to the field path
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.field = format!("{prefix}.{}", self.field);
        self
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Flatten validator errors into a sorted violation list
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    flatten(errors, None, &mut out);
    out.sort();
    out
}

fn flatten(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| to_violation(&path, e)));
            }
            ValidationErrorsKind::Struct(nested) => flatten(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    let item_path = format!("{path}[{index}]");
                    flatten(nested, Some(&item_path), out);
                }
            }
        }
    }
}

fn to_violation(field: &str, error: &ValidationError) -> FieldViolation {
    let message = error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{field} is invalid"));
    FieldViolation::new(field, error.code.to_string(), message)
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Email syntax check. Empty input is left to the `required` rule.
pub fn validate_email_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(rule_error("email", "Enter a valid email address"))
    }
}

/// `YYYY-MM-DD` check. Empty input is left to the `required` rule.
pub fn validate_iso_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).is_ok() {
        Ok(())
    } else {
        Err(rule_error("iso_date", "Use the YYYY-MM-DD format"))
    }
}

/// Credit/Debit check. Empty input is left to the `required` rule.
pub fn validate_card_type(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.parse::<CardType>().is_ok() {
        Ok(())
    } else {
        Err(rule_error("card_type", "Card type must be Credit or Debit"))
    }
}

/// Set of fields the user has interacted with.
///
/// Violations are only surfaced for touched fields; a rejected submit
/// touches every field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Touched(BTreeSet<&'static str>);

impl Touched {
    pub fn touch(&mut self, field: &'static str) {
        self.0.insert(field);
    }

    pub fn touch_all<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.0.extend(fields);
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn any(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(validate_email_format("").is_ok());
        assert!(validate_email_format("john.doe@example.com").is_ok());
        let err = validate_email_format("john.doe").unwrap_err();
        assert_eq!(err.code, "email");
    }

    #[test]
    fn test_iso_date() {
        assert!(validate_iso_date("2025-12-31").is_ok());
        assert!(validate_iso_date("").is_ok());
        assert!(validate_iso_date("12/31/2025").is_err());
        assert!(validate_iso_date("2025-02-30").is_err());
    }

    #[test]
    fn test_card_type() {
        assert!(validate_card_type("Credit").is_ok());
        assert!(validate_card_type("Debit").is_ok());
        assert!(validate_card_type("").is_ok());
        assert_eq!(validate_card_type("Gold").unwrap_err().code, "card_type");
    }

    #[test]
    fn test_prefixed_violation() {
        let v = FieldViolation::new("cvv", "length", "bad").prefixed("credit_cards[2]");
        assert_eq!(v.field, "credit_cards[2].cvv");
        assert_eq!(v.to_string(), "credit_cards[2].cvv: bad");
    }

    #[test]
    fn test_touched_set() {
        let mut touched = Touched::default();
        assert!(!touched.any());
        touched.touch("email");
        touched.touch_all(["email", "first_name"]);
        assert_eq!(touched.len(), 2);
        assert!(touched.is_touched("first_name"));
        touched.clear();
        assert!(touched.is_empty());
    }
}
