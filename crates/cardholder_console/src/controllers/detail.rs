use std::sync::Arc;

use cardholder_client::{CreditCardApi, CustomerApi};
use cardholder_core::forms::{CreditCardForm, CustomerDetailsForm, FieldSet};
use cardholder_core::models::{CardId, CreditCard, Customer, CustomerId};

use super::ActionOutcome;
use crate::dialogs::Dialogs;

/// Shown when the customer cannot be loaded or the id is not a number
pub const LOAD_ERROR: &str = "Failed to load customer details.";

/// Lifecycle of the detail view
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Loaded(Customer),
    Error(String),
}

/// State and actions behind a single customer's page: the customer panel,
/// their cards, and three modal forms.
pub struct CustomerDetailController {
    customers_api: Arc<dyn CustomerApi>,
    cards_api: Arc<dyn CreditCardApi>,
    state: DetailState,

    edit_customer_open: bool,
    add_card_open: bool,
    edit_card_open: bool,
    selected_card_id: Option<CardId>,

    pub edit_customer_form: CustomerDetailsForm,
    pub add_card_form: CreditCardForm,
    pub edit_card_form: CreditCardForm,
}

impl CustomerDetailController {
    pub fn new(customers_api: Arc<dyn CustomerApi>, cards_api: Arc<dyn CreditCardApi>) -> Self {
        Self {
            customers_api,
            cards_api,
            state: DetailState::Loading,
            edit_customer_open: false,
            add_card_open: false,
            edit_card_open: false,
            selected_card_id: None,
            edit_customer_form: CustomerDetailsForm::new(),
            add_card_form: CreditCardForm::with_default_type(),
            edit_card_form: CreditCardForm::blank(),
        }
    }

    /// Load the customer named by the route's id segment
    pub async fn activate(&mut self, id_segment: &str) {
        self.state = DetailState::Loading;

        let Ok(id) = id_segment.trim().parse::<CustomerId>() else {
            tracing::warn!(segment = id_segment, "customer id is not a number");
            self.state = DetailState::Error(LOAD_ERROR.to_string());
            return;
        };

        self.state = match self.customers_api.get_customer(id).await {
            Ok(customer) => DetailState::Loaded(customer),
            Err(err) => {
                tracing::error!(customer_id = id, error = %err, "failed to load customer");
                DetailState::Error(LOAD_ERROR.to_string())
            }
        };
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, DetailState::Loading)
    }

    pub fn customer(&self) -> Option<&Customer> {
        match &self.state {
            DetailState::Loaded(customer) => Some(customer),
            _ => None,
        }
    }

    fn customer_mut(&mut self) -> Option<&mut Customer> {
        match &mut self.state {
            DetailState::Loaded(customer) => Some(customer),
            _ => None,
        }
    }

    pub fn is_edit_customer_open(&self) -> bool {
        self.edit_customer_open
    }

    pub fn is_add_card_open(&self) -> bool {
        self.add_card_open
    }

    pub fn is_edit_card_open(&self) -> bool {
        self.edit_card_open
    }

    pub fn selected_card_id(&self) -> Option<CardId> {
        self.selected_card_id
    }

    // --- Edit customer ---

    /// Open the edit modal pre-filled from the loaded customer
    pub fn open_edit_customer(&mut self) -> bool {
        let Some(customer) = self.customer() else {
            return false;
        };
        let form = CustomerDetailsForm::from_customer(customer);
        self.edit_customer_form = form;
        self.edit_customer_open = true;
        true
    }

    pub fn close_edit_customer(&mut self) {
        self.edit_customer_open = false;
    }

    /// Send the changed contact fields and merge the response locally
    pub async fn submit_edit_customer(&mut self, dialogs: &mut dyn Dialogs) -> ActionOutcome {
        let Some(id) = self.customer().and_then(|c| c.customer_id) else {
            return ActionOutcome::Unavailable;
        };
        let patch = match self.edit_customer_form.to_patch() {
            Ok(patch) => patch,
            Err(_) => {
                self.edit_customer_form.mark_all_touched();
                return ActionOutcome::Rejected;
            }
        };

        match self.customers_api.update_customer(id, &patch).await {
            Ok(updated) => {
                if let Some(customer) = self.customer_mut() {
                    customer.apply_update(updated);
                }
                dialogs.alert("Customer updated successfully!");
                self.edit_customer_open = false;
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::error!(customer_id = id, error = %err, "failed to update customer");
                dialogs.alert("Failed to update customer. Please try again.");
                ActionOutcome::Failed
            }
        }
    }

    // --- Add credit card ---

    pub fn open_add_card(&mut self) {
        self.add_card_open = true;
    }

    pub fn close_add_card(&mut self) {
        self.add_card_open = false;
    }

    /// Create a card owned by the loaded customer and append it locally
    pub async fn submit_add_card(&mut self, dialogs: &mut dyn Dialogs) -> ActionOutcome {
        let Some(customer_id) = self.customer().and_then(|c| c.customer_id) else {
            return ActionOutcome::Unavailable;
        };
        let card = match self.add_card_form.to_new_card() {
            Ok(card) => card.owned_by(customer_id),
            Err(_) => {
                self.add_card_form.mark_all_touched();
                return ActionOutcome::Rejected;
            }
        };

        match self.cards_api.create_credit_card(&card).await {
            Ok(created) => {
                dialogs.alert("Credit card added successfully!");
                self.add_card_open = false;
                if let Some(customer) = self.customer_mut() {
                    customer.push_card(created);
                }
                self.add_card_form = CreditCardForm::with_default_type();
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::error!(customer_id, error = %err, "failed to add credit card");
                dialogs.alert("Failed to add credit card. Please try again.");
                ActionOutcome::Failed
            }
        }
    }

    // --- Edit credit card ---

    pub fn open_edit_card(&mut self, card: &CreditCard) {
        self.selected_card_id = Some(card.card_id);
        self.edit_card_form = CreditCardForm::from_card(card);
        self.edit_card_open = true;
    }

    /// Open the edit modal for the card at `index` in the card table
    pub fn open_edit_card_at(&mut self, index: usize) -> bool {
        let Some(card) = self.customer().and_then(|c| c.cards().get(index)).cloned() else {
            return false;
        };
        self.open_edit_card(&card);
        true
    }

    pub fn close_edit_card(&mut self) {
        self.edit_card_open = false;
        self.selected_card_id = None;
    }

    /// Update the selected card and replace it locally.
    ///
    /// The local entry is found by id at response time, never by a row
    /// index captured when the modal opened.
    pub async fn submit_edit_card(&mut self, dialogs: &mut dyn Dialogs) -> ActionOutcome {
        let Some(card_id) = self.selected_card_id else {
            return ActionOutcome::Unavailable;
        };
        let patch = match self.edit_card_form.to_patch() {
            Ok(patch) => patch,
            Err(_) => {
                self.edit_card_form.mark_all_touched();
                return ActionOutcome::Rejected;
            }
        };

        match self.cards_api.update_credit_card(card_id, &patch).await {
            Ok(updated) => {
                dialogs.alert("Credit card updated successfully!");
                if let Some(customer) = self.customer_mut() {
                    if !customer.replace_card(card_id, updated) {
                        tracing::warn!(card_id, "updated card no longer in local list");
                    }
                }
                self.close_edit_card();
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::error!(card_id, error = %err, "failed to update credit card");
                dialogs.alert("Failed to update credit card. Please try again.");
                ActionOutcome::Failed
            }
        }
    }

    // --- Delete credit card ---

    /// Delete a card after confirmation and drop the entry at `index`
    pub async fn delete_credit_card(
        &mut self,
        card_id: CardId,
        index: usize,
        dialogs: &mut dyn Dialogs,
    ) -> ActionOutcome {
        if !dialogs.confirm("Are you sure you want to delete this credit card?") {
            return ActionOutcome::Declined;
        }

        match self.cards_api.delete_credit_card(card_id).await {
            Ok(()) => {
                dialogs.alert("Credit card deleted successfully.");
                if let Some(customer) = self.customer_mut() {
                    customer.remove_card_at(index);
                }
                ActionOutcome::Completed
            }
            Err(err) => {
                tracing::error!(card_id, error = %err, "failed to delete credit card");
                dialogs.alert("Failed to delete credit card. Please try again.");
                ActionOutcome::Failed
            }
        }
    }

    /// Delete the card shown at `index` in the card table
    pub async fn delete_card_at(&mut self, index: usize, dialogs: &mut dyn Dialogs) -> ActionOutcome {
        let Some(card_id) = self
            .customer()
            .and_then(|c| c.cards().get(index))
            .map(|card| card.card_id)
        else {
            return ActionOutcome::Unavailable;
        };
        self.delete_credit_card(card_id, index, dialogs).await
    }
}
