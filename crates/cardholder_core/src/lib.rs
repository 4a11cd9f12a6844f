//! # Cardholder Core
//!
//! Domain layer for the cardholder console.
//!
//! - [`models`]: customers, credit cards, creation and patch payloads
//! - [`forms`]: editable form values with `validator` rules
//! - [`validation`]: field-level violations and touched tracking

pub mod forms;
pub mod models;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::forms::{CreditCardForm, CustomerDetailsForm, CustomerForm, FieldSet, FieldSpec};
    pub use crate::models::{
        CardId, CardType, CreditCard, CreditCardPatch, Customer, CustomerId, CustomerPatch,
        NewCreditCard, NewCustomer,
    };
    pub use crate::validation::{FieldViolation, Touched};
}
