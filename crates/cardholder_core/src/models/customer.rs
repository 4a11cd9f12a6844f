//! Customer records and request payloads.

use serde::{Deserialize, Serialize};

use super::{CardId, CreditCard, NewCreditCard};

/// Backend-assigned customer identifier
pub type CustomerId = i64;

/// A customer as served by the backend.
///
/// `customer_id` is assigned by the backend and never changes afterwards.
/// `credit_cards` is `None` when a response leaves the collection out,
/// which matters when merging an update response into local state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_cards: Option<Vec<CreditCard>>,
}

impl Customer {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Nested cards, empty when the collection is absent
    pub fn cards(&self) -> &[CreditCard] {
        self.credit_cards.as_deref().unwrap_or(&[])
    }

    /// Append a card to the nested collection
    pub fn push_card(&mut self, card: CreditCard) {
        self.credit_cards.get_or_insert_with(Vec::new).push(card);
    }

    /// Replace the first card whose identifier equals `card_id`.
    ///
    /// Returns false, leaving the collection unchanged, when no card matches.
    pub fn replace_card(&mut self, card_id: CardId, card: CreditCard) -> bool {
        let Some(cards) = self.credit_cards.as_mut() else {
            return false;
        };
        match cards.iter().position(|c| c.card_id == card_id) {
            Some(index) => {
                cards[index] = card;
                true
            }
            None => false,
        }
    }

    /// Remove the card at `index`. Out-of-range indices are a no-op.
    pub fn remove_card_at(&mut self, index: usize) -> Option<CreditCard> {
        let cards = self.credit_cards.as_mut()?;
        if index < cards.len() {
            Some(cards.remove(index))
        } else {
            None
        }
    }

    /// Merge an update response into this record.
    ///
    /// Fields present in the response win. The card collection is only
    /// replaced when the response carries one.
    pub fn apply_update(&mut self, updated: Customer) {
        if updated.customer_id.is_some() {
            self.customer_id = updated.customer_id;
        }
        self.first_name = updated.first_name;
        self.last_name = updated.last_name;
        self.email = updated.email;
        if updated.credit_cards.is_some() {
            self.credit_cards = updated.credit_cards;
        }
    }
}

/// Body of a customer creation request, optionally with nested cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub credit_cards: Vec<NewCreditCard>,
}

/// Partial customer update. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
