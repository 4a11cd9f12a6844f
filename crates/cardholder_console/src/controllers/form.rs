use std::sync::Arc;

use cardholder_client::CustomerApi;
use cardholder_core::forms::CustomerForm;

use super::ActionOutcome;
use crate::navigation::{Navigator, Route};

/// Kept on the form when the create call fails
pub const CREATE_ERROR: &str = "Error creating customer. Please try again.";

/// State and actions behind the customer creation form
pub struct CustomerFormController {
    customers_api: Arc<dyn CustomerApi>,
    pub form: CustomerForm,
    error: Option<String>,
}

impl CustomerFormController {
    pub fn new(customers_api: Arc<dyn CustomerApi>) -> Self {
        Self {
            customers_api,
            form: CustomerForm::new(),
            error: None,
        }
    }

    /// Append a blank card sub-entry, returning its index
    pub fn add_credit_card(&mut self) -> usize {
        self.form.add_credit_card()
    }

    pub fn remove_credit_card(&mut self, index: usize) {
        self.form.remove_credit_card(index);
    }

    /// Last create failure, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Create the customer with all sub-entries in one call.
    ///
    /// An invalid form is marked touched and nothing is sent. On success
    /// the navigator moves to the customer list.
    pub async fn submit(&mut self, navigator: &mut Navigator) -> ActionOutcome {
        let customer = match self.form.value() {
            Ok(customer) => customer,
            Err(violations) => {
                tracing::debug!(count = violations.len(), "customer form invalid");
                self.form.mark_all_touched();
                return ActionOutcome::Rejected;
            }
        };

        match self.customers_api.create_customer(&customer).await {
            Ok(created) => {
                tracing::info!(customer_id = ?created.customer_id, "customer created from form");
                self.error = None;
                navigator.navigate_to(Route::CustomerList);
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::error!(error = %err, "error creating customer");
                self.error = Some(CREATE_ERROR.to_string());
                ActionOutcome::Failed
            }
        }
    }

    /// Leave for the customer list, discarding everything entered
    pub fn cancel(&mut self, navigator: &mut Navigator) {
        self.form = CustomerForm::new();
        navigator.navigate_to(Route::CustomerList);
    }
}
