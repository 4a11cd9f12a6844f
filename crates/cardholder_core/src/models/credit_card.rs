//! Credit card records and request payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::CustomerId;

/// Backend-assigned credit card identifier
pub type CardId = i64;

/// Card type accepted by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Credit,
    Debit,
}

impl CardType {
    /// Wire name of the card type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known card type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown card type '{0}', expected Credit or Debit")]
pub struct ParseCardTypeError(pub String);

impl FromStr for CardType {
    type Err = ParseCardTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit" => Ok(Self::Credit),
            "Debit" => Ok(Self::Debit),
            other => Err(ParseCardTypeError(other.to_string())),
        }
    }
}

/// A persisted credit card.
///
/// Always owned by exactly one customer through `customer_id`. The
/// console holds cards nested inside the customer it last fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCard {
    pub card_id: CardId,
    pub card_number: String,
    pub expiration_date: NaiveDate,
    /// Three-character verification code
    pub cvv: String,
    pub card_type: CardType,
    pub credit_limit: f64,
    pub current_balance: f64,
    pub customer_id: CustomerId,
}

/// Body of a credit card creation request.
///
/// `customer_id` is absent for cards nested inside a new customer; the
/// caller sets it when adding a card to an existing customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCreditCard {
    pub card_number: String,
    pub expiration_date: NaiveDate,
    pub cvv: String,
    pub card_type: CardType,
    pub credit_limit: f64,
    pub current_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
}

impl NewCreditCard {
    /// Attach the owning customer before submission
    pub fn owned_by(mut self, customer_id: CustomerId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }
}

/// Partial credit card update. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvv: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_balance: Option<f64>,
}

impl CreditCardPatch {
    /// Patch touching only the current balance
    pub fn balance(current_balance: f64) -> Self {
        Self {
            current_balance: Some(current_balance),
            ..Self::default()
        }
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
