//! Form values backing the console's create and edit flows.
//!
//! Each form is a plain value struct deriving [`validator::Validate`] plus
//! a [`Touched`] set. Text editing goes through [`FieldSet`], which lets
//! the console drive any form field by name without knowing its type.

mod credit_card_form;
mod customer_form;

pub use credit_card_form::CreditCardForm;
pub use customer_form::{CustomerDetailsForm, CustomerForm};

use validator::Validate;

use crate::validation::{collect_violations, FieldViolation, Touched};

/// Static description of one editable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as used in violations
    pub name: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label }
    }
}

/// A flat form whose fields can be read and written as text
pub trait FieldSet: Validate {
    /// Editable fields in display order
    fn fields(&self) -> &'static [FieldSpec];

    /// Current value of `field` rendered as text
    fn text(&self, field: &str) -> String;

    /// Write `text` into `field` and mark it touched.
    ///
    /// Numeric fields reject text that does not parse and keep their
    /// previous value.
    fn set_text(&mut self, field: &str, text: &str) -> Result<(), FieldViolation>;

    fn touched(&self) -> &Touched;

    fn touched_mut(&mut self) -> &mut Touched;

    /// Mark every field as interacted-with
    fn mark_all_touched(&mut self) {
        let names = self.fields().iter().map(|f| f.name);
        self.touched_mut().touch_all(names);
    }

    /// All current violations, touched or not
    fn violations(&self) -> Vec<FieldViolation> {
        match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => collect_violations(&errors),
        }
    }

    /// Violations on fields the user has touched
    fn visible_violations(&self) -> Vec<FieldViolation> {
        self.violations()
            .into_iter()
            .filter(|v| self.touched().is_touched(&v.field))
            .collect()
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Field name not known to a form
pub(crate) fn unknown_field(field: &str) -> FieldViolation {
    FieldViolation::new(field, "unknown_field", format!("unknown field '{field}'"))
}

/// Parse a numeric input the way a number input would
pub(crate) fn parse_amount(field: &str, text: &str) -> Result<f64, FieldViolation> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(field, "required", "A number is required"));
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldViolation::new(field, "number", "Enter a number")),
    }
}

/// Render an amount without a trailing `.0` for whole values
pub(crate) fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("credit_limit", " 5000 ").unwrap(), 5000.0);
        assert_eq!(parse_amount("credit_limit", "12.5").unwrap(), 12.5);
        assert_eq!(parse_amount("credit_limit", "").unwrap_err().code, "required");
        assert_eq!(parse_amount("credit_limit", "abc").unwrap_err().code, "number");
        assert_eq!(parse_amount("credit_limit", "NaN").unwrap_err().code, "number");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(1500.0), "1500");
        assert_eq!(format_amount(99.95), "99.95");
    }
}
