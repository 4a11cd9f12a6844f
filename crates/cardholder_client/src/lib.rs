//! # Cardholder Client
//!
//! Data clients for the customer/credit card REST API.
//!
//! ## Endpoints
//! - `GET|POST /customers`, `GET|PUT|DELETE /customers/{id}`
//! - `GET|POST /credit-cards`, `GET|PUT|DELETE /credit-cards/{id}`
//!
//! Controllers depend on the [`CustomerApi`] and [`CreditCardApi`] traits;
//! [`CustomerClient`] and [`CreditCardClient`] implement them over a shared
//! [`ApiClient`].

pub mod api_client;
pub mod config;
pub mod credit_cards;
pub mod customers;
pub mod error;

pub use api_client::ApiClient;
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use credit_cards::{CreditCardApi, CreditCardClient};
pub use customers::{CustomerApi, CustomerClient};
pub use error::ApiError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ApiClient, ApiError, ClientConfig, CreditCardApi, CreditCardClient, CustomerApi,
        CustomerClient,
    };
}
