//! Domain records exchanged with the backend.
//!
//! Persisted records (`Customer`, `CreditCard`) mirror the JSON served by
//! the REST API. Creation payloads (`New*`) carry no identifiers and patch
//! payloads (`*Patch`) carry only the fields being changed.

mod credit_card;
mod customer;

pub use credit_card::{CardId, CardType, CreditCard, CreditCardPatch, NewCreditCard, ParseCardTypeError};
pub use customer::{Customer, CustomerId, CustomerPatch, NewCustomer};
