use std::sync::Arc;

use cardholder_client::CustomerApi;
use cardholder_core::models::{Customer, CustomerId};

use super::ActionOutcome;
use crate::banner::TransientBanner;
use crate::dialogs::Dialogs;

/// Shown when the customer list cannot be fetched
pub const FETCH_ERROR: &str = "Error fetching customers. Please try again later.";

/// Shown when deletion is requested for a customer without an id
pub const INVALID_ID: &str = "Customer ID is invalid.";

/// State and actions behind the customer table
pub struct CustomerListController {
    customers_api: Arc<dyn CustomerApi>,
    customers: Vec<Customer>,
    is_loading: bool,
    error: Option<String>,
    success_message: TransientBanner,
    error_message: TransientBanner,
}

impl CustomerListController {
    pub fn new(customers_api: Arc<dyn CustomerApi>) -> Self {
        Self {
            customers_api,
            customers: Vec::new(),
            is_loading: true,
            error: None,
            success_message: TransientBanner::default(),
            error_message: TransientBanner::default(),
        }
    }

    /// Fetch every customer, replacing the local collection
    pub async fn activate(&mut self) {
        self.is_loading = true;
        match self.customers_api.list_customers().await {
            Ok(customers) => {
                tracing::debug!(count = customers.len(), "customers loaded");
                self.customers = customers;
                self.error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "error fetching customers");
                self.error = Some(FETCH_ERROR.to_string());
            }
        }
        self.is_loading = false;
    }

    /// Delete a customer after confirmation.
    ///
    /// The local entry is removed by id, so the table order of the rest is
    /// preserved whatever the row index was.
    pub async fn delete_customer(
        &mut self,
        id: Option<CustomerId>,
        first_name: &str,
        last_name: &str,
        dialogs: &mut dyn Dialogs,
    ) -> ActionOutcome {
        let Some(id) = id else {
            self.error_message.show(INVALID_ID);
            return ActionOutcome::Rejected;
        };

        if !dialogs.confirm(&format!(
            "Are you sure you want to delete {first_name} {last_name}?"
        )) {
            return ActionOutcome::Declined;
        }

        match self.customers_api.delete_customer(id).await {
            Ok(()) => {
                self.customers.retain(|c| c.customer_id != Some(id));
                self.success_message.show(format!(
                    "Customer ({first_name} {last_name}) was deleted successfully."
                ));
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::error!(customer_id = id, error = %err, "failed to delete customer");
                self.error_message.show(format!(
                    "Failed to delete customer ({first_name} {last_name}). Please try again."
                ));
                ActionOutcome::Failed
            }
        }
    }

    /// Convenience for deleting the customer shown at `row`
    pub async fn delete_at(&mut self, row: usize, dialogs: &mut dyn Dialogs) -> ActionOutcome {
        let Some(customer) = self.customers.get(row) else {
            return ActionOutcome::Unavailable;
        };
        let (id, first, last) = (
            customer.customer_id,
            customer.first_name.clone(),
            customer.last_name.clone(),
        );
        self.delete_customer(id, &first, &last, dialogs).await
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Fetch failure message, if the list could not be loaded
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success_message(&self) -> Option<String> {
        self.success_message.current()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error_message.current()
    }
}
