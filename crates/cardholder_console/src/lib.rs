//! # Cardholder Console
//!
//! Terminal front-end for managing customers and their credit cards.
//!
//! Uses ratatui for rendering and crossterm for terminal handling.
//!
//! ## Views
//! - **Home** (`/`): landing page
//! - **Customers** (`/customers`): customer table with delete
//! - **New Customer** (`/customers/form`): creation form with card entries
//! - **Customer Details** (`/customers/{id}`): contact panel, card table,
//!   and modals to edit the customer and add, edit or delete cards

pub mod app;
pub mod banner;
pub mod config;
pub mod controllers;
pub mod dialogs;
pub mod editor;
pub mod error;
pub mod navigation;
pub mod pending;
pub mod screens;
pub mod shell;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::TuiApp;
    pub use crate::config::{build_config, CliArgs, ConfigError, ConsoleConfig};
    pub use crate::controllers::{
        ActionOutcome, CustomerDetailController, CustomerFormController, CustomerListController,
        DetailState,
    };
    pub use crate::dialogs::{Dialogs, ScriptedDialogs};
    pub use crate::error::ConsoleError;
    pub use crate::navigation::{Navigator, Route};
    pub use crate::shell::{Shell, View};
}
