use chrono::NaiveDate;
use validator::{Validate, ValidationError};

use super::{format_amount, parse_amount, unknown_field, FieldSet, FieldSpec};
use crate::models::{CardType, CreditCard, CreditCardPatch, CustomerId, NewCreditCard};
use crate::validation::{
    validate_card_type, validate_iso_date, FieldViolation, Touched, ISO_DATE_FORMAT,
};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("card_number", "Card number"),
    FieldSpec::new("expiration_date", "Expiration (YYYY-MM-DD)"),
    FieldSpec::new("cvv", "CVV"),
    FieldSpec::new("card_type", "Card type (Credit/Debit)"),
    FieldSpec::new("credit_limit", "Credit limit"),
    FieldSpec::new("current_balance", "Current balance"),
];

/// Verification code length accepted by the backend
pub const CVV_LENGTH: usize = 3;

fn validate_cvv(value: &str) -> Result<(), ValidationError> {
    let (code, message) = if value.is_empty() {
        ("required", "CVV is required")
    } else if value.chars().count() != CVV_LENGTH {
        ("length", "CVV must be exactly 3 characters")
    } else {
        return Ok(());
    };
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    Err(err)
}

/// Values of one credit card entry, as typed by the user.
///
/// Used for the sub-entries of the creation form and for the add/edit
/// card modals of the detail view.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct CreditCardForm {
    #[validate(length(min = 1, code = "required", message = "Card number is required"))]
    pub card_number: String,
    #[validate(
        length(min = 1, code = "required", message = "Expiration date is required"),
        custom(function = "validate_iso_date")
    )]
    pub expiration_date: String,
    #[validate(custom(function = "validate_cvv"))]
    pub cvv: String,
    #[validate(
        length(min = 1, code = "required", message = "Card type is required"),
        custom(function = "validate_card_type")
    )]
    pub card_type: String,
    #[validate(range(min = 0.0, message = "Credit limit cannot be negative"))]
    pub credit_limit: f64,
    #[validate(range(min = 0.0, message = "Current balance cannot be negative"))]
    pub current_balance: f64,
    touched: Touched,
}

impl Default for CreditCardForm {
    fn default() -> Self {
        Self::blank()
    }
}

impl CreditCardForm {
    /// Empty sub-entry for the creation form; card type left unselected
    pub fn blank() -> Self {
        Self {
            card_number: String::new(),
            expiration_date: String::new(),
            cvv: String::new(),
            card_type: String::new(),
            credit_limit: 0.0,
            current_balance: 0.0,
            touched: Touched::default(),
        }
    }

    /// Empty form for the add-card modal; card type preset to Credit
    pub fn with_default_type() -> Self {
        Self {
            card_type: CardType::Credit.as_str().to_string(),
            ..Self::blank()
        }
    }

    /// Form pre-filled from an existing card
    pub fn from_card(card: &CreditCard) -> Self {
        Self {
            card_number: card.card_number.clone(),
            expiration_date: card.expiration_date.format(ISO_DATE_FORMAT).to_string(),
            cvv: card.cvv.clone(),
            card_type: card.card_type.as_str().to_string(),
            credit_limit: card.credit_limit,
            current_balance: card.current_balance,
            touched: Touched::default(),
        }
    }

    /// Creation payload, or the violations blocking it
    pub fn to_new_card(&self) -> Result<NewCreditCard, Vec<FieldViolation>> {
        let (expiration_date, card_type) = self.checked()?;
        Ok(NewCreditCard {
            card_number: self.card_number.clone(),
            expiration_date,
            cvv: self.cvv.clone(),
            card_type,
            credit_limit: self.credit_limit,
            current_balance: self.current_balance,
            customer_id: None,
        })
    }

    /// Update payload carrying every field, or the violations blocking it
    pub fn to_patch(&self) -> Result<CreditCardPatch, Vec<FieldViolation>> {
        let (expiration_date, card_type) = self.checked()?;
        Ok(CreditCardPatch {
            card_number: Some(self.card_number.clone()),
            expiration_date: Some(expiration_date),
            cvv: Some(self.cvv.clone()),
            card_type: Some(card_type),
            credit_limit: Some(self.credit_limit),
            current_balance: Some(self.current_balance),
        })
    }

    fn checked(&self) -> Result<(NaiveDate, CardType), Vec<FieldViolation>> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(violations);
        }
        let date = NaiveDate::parse_from_str(&self.expiration_date, ISO_DATE_FORMAT)
            .map_err(|e| vec![FieldViolation::new("expiration_date", "iso_date", e.to_string())])?;
        let card_type = self
            .card_type
            .parse::<CardType>()
            .map_err(|e| vec![FieldViolation::new("card_type", "card_type", e.to_string())])?;
        Ok((date, card_type))
    }
}

impl FieldSet for CreditCardForm {
    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn text(&self, field: &str) -> String {
        match field {
            "card_number" => self.card_number.clone(),
            "expiration_date" => self.expiration_date.clone(),
            "cvv" => self.cvv.clone(),
            "card_type" => self.card_type.clone(),
            "credit_limit" => format_amount(self.credit_limit),
            "current_balance" => format_amount(self.current_balance),
            _ => String::new(),
        }
    }

    fn set_text(&mut self, field: &str, text: &str) -> Result<(), FieldViolation> {
        let spec = FIELDS
            .iter()
            .find(|f| f.name == field)
            .ok_or_else(|| unknown_field(field))?;
        self.touched.touch(spec.name);

        match spec.name {
            "card_number" => self.card_number = text.to_string(),
            "expiration_date" => self.expiration_date = text.to_string(),
            "cvv" => self.cvv = text.to_string(),
            "card_type" => self.card_type = text.to_string(),
            "credit_limit" => self.credit_limit = parse_amount(field, text)?,
            "current_balance" => self.current_balance = parse_amount(field, text)?,
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn touched(&self) -> &Touched {
        &self.touched
    }

    fn touched_mut(&mut self) -> &mut Touched {
        &mut self.touched
    }
}
