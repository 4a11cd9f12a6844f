use validator::Validate;

use super::{unknown_field, CreditCardForm, FieldSet, FieldSpec};
use crate::models::{Customer, CustomerPatch, NewCustomer};
use crate::validation::{validate_email_format, FieldViolation, Touched};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("first_name", "First name"),
    FieldSpec::new("last_name", "Last name"),
    FieldSpec::new("email", "Email"),
];

/// Contact fields of a customer.
///
/// Backs the edit-customer modal on its own and the head of the creation
/// form.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct CustomerDetailsForm {
    #[validate(length(min = 1, code = "required", message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, code = "required", message = "Last name is required"))]
    pub last_name: String,
    #[validate(
        length(min = 1, code = "required", message = "Email is required"),
        custom(function = "validate_email_format")
    )]
    pub email: String,
    touched: Touched,
}

impl CustomerDetailsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from the locally held customer
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            touched: Touched::default(),
        }
    }

    /// Update payload carrying all three fields, or the violations blocking it
    pub fn to_patch(&self) -> Result<CustomerPatch, Vec<FieldViolation>> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(violations);
        }
        Ok(CustomerPatch {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            email: Some(self.email.clone()),
        })
    }
}

impl FieldSet for CustomerDetailsForm {
    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn text(&self, field: &str) -> String {
        match field {
            "first_name" => self.first_name.clone(),
            "last_name" => self.last_name.clone(),
            "email" => self.email.clone(),
            _ => String::new(),
        }
    }

    fn set_text(&mut self, field: &str, text: &str) -> Result<(), FieldViolation> {
        let slot = match field {
            "first_name" => &mut self.first_name,
            "last_name" => &mut self.last_name,
            "email" => &mut self.email,
            _ => return Err(unknown_field(field)),
        };
        *slot = text.to_string();
        if let Some(spec) = FIELDS.iter().find(|f| f.name == field) {
            self.touched.touch(spec.name);
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

/// The customer creation form: contact fields plus a resizable list of
/// credit card sub-entries, submitted as one payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerForm {
    pub details: CustomerDetailsForm,
    credit_cards: Vec<CreditCardForm>,
}

impl CustomerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit_cards(&self) -> &[CreditCardForm] {
        &self.credit_cards
    }

    pub fn credit_card_mut(&mut self, index: usize) -> Option<&mut CreditCardForm> {
        self.credit_cards.get_mut(index)
    }

    /// Append a blank sub-entry and return its index
    pub fn add_credit_card(&mut self) -> usize {
        self.credit_cards.push(CreditCardForm::blank());
        self.credit_cards.len() - 1
    }

    /// Remove the sub-entry at `index`, keeping the order of the rest
    pub fn remove_credit_card(&mut self, index: usize) -> Option<CreditCardForm> {
        if index < self.credit_cards.len() {
            Some(self.credit_cards.remove(index))
        } else {
            None
        }
    }

    /// Violations of the contact fields and of every sub-entry
    pub fn violations(&self) -> Vec<FieldViolation> {
        let mut out = self.details.violations();
        for (index, entry) in self.credit_cards.iter().enumerate() {
            let prefix = format!("credit_cards[{index}]");
            out.extend(entry.violations().into_iter().map(|v| v.prefixed(&prefix)));
        }
        out
    }

    pub fn is_valid(&self) -> bool {
        self.details.is_valid() && self.credit_cards.iter().all(FieldSet::is_valid)
    }

    /// Touch every field, sub-entries included
    pub fn mark_all_touched(&mut self) {
        self.details.mark_all_touched();
        for entry in &mut self.credit_cards {
            entry.mark_all_touched();
        }
    }

    /// True once any field anywhere in the form has been touched
    pub fn is_touched(&self) -> bool {
        self.details.touched().any() || self.credit_cards.iter().any(|c| c.touched().any())
    }

    /// True when every field of the form has been touched
    pub fn all_touched(&self) -> bool {
        let all = |form: &dyn FieldSet| form.fields().iter().all(|f| form.touched().is_touched(f.name));
        all(&self.details) && self.credit_cards.iter().all(|c| all(c))
    }

    /// The payload for the create call
    pub fn value(&self) -> Result<NewCustomer, Vec<FieldViolation>> {
        let violations = self.violations();
        if !violations.is_empty() {
            return Err(violations);
        }
        let credit_cards = self
            .credit_cards
            .iter()
            .map(CreditCardForm::to_new_card)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NewCustomer {
            first_name: self.details.first_name.clone(),
            last_name: self.details.last_name.clone(),
            email: self.details.email.clone(),
            credit_cards,
        })
    }
}
