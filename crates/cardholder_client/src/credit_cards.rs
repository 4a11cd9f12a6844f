//! Credit card data client.

use async_trait::async_trait;
use cardholder_core::models::{CardId, CreditCard, CreditCardPatch, NewCreditCard};

use crate::api_client::ApiClient;
use crate::error::ApiError;

const CREDIT_CARDS_PATH: &str = "credit-cards";

/// Credit card operations against the backend, scoped by card id.
///
/// Creation takes no customer id argument: the owning customer travels
/// inside the [`NewCreditCard`] payload.
#[async_trait]
pub trait CreditCardApi: Send + Sync {
    /// `GET /credit-cards`
    async fn list_credit_cards(&self) -> Result<Vec<CreditCard>, ApiError>;

    /// `GET /credit-cards/{id}`
    async fn get_credit_card(&self, id: CardId) -> Result<CreditCard, ApiError>;

    /// `POST /credit-cards`
    async fn create_credit_card(&self, card: &NewCreditCard) -> Result<CreditCard, ApiError>;

    /// `PUT /credit-cards/{id}` with only the changed fields
    async fn update_credit_card(
        &self,
        id: CardId,
        patch: &CreditCardPatch,
    ) -> Result<CreditCard, ApiError>;

    /// `DELETE /credit-cards/{id}`
    async fn delete_credit_card(&self, id: CardId) -> Result<(), ApiError>;
}

/// REST implementation of [`CreditCardApi`]
#[derive(Debug, Clone)]
pub struct CreditCardClient {
    api: ApiClient,
}

impl CreditCardClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn card_path(id: CardId) -> String {
    format!("{CREDIT_CARDS_PATH}/{id}")
}

#[async_trait]
impl CreditCardApi for CreditCardClient {
    async fn list_credit_cards(&self) -> Result<Vec<CreditCard>, ApiError> {
        self.api.get_json(CREDIT_CARDS_PATH).await
    }

    async fn get_credit_card(&self, id: CardId) -> Result<CreditCard, ApiError> {
        self.api.get_json(&card_path(id)).await
    }

    async fn create_credit_card(&self, card: &NewCreditCard) -> Result<CreditCard, ApiError> {
        let created: CreditCard = self.api.post_json(CREDIT_CARDS_PATH, card).await?;
        tracing::info!(
            card_id = created.card_id,
            customer_id = created.customer_id,
            "credit card created"
        );
        Ok(created)
    }

    async fn update_credit_card(
        &self,
        id: CardId,
        patch: &CreditCardPatch,
    ) -> Result<CreditCard, ApiError> {
        self.api.put_json(&card_path(id), patch).await
    }

    async fn delete_credit_card(&self, id: CardId) -> Result<(), ApiError> {
        self.api.delete(&card_path(id)).await?;
        tracing::info!(card_id = id, "credit card deleted");
        Ok(())
    }
}
