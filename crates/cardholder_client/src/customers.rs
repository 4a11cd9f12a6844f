//! Customer data client.

use async_trait::async_trait;
use cardholder_core::models::{Customer, CustomerId, CustomerPatch, NewCustomer};

use crate::api_client::ApiClient;
use crate::error::ApiError;

const CUSTOMERS_PATH: &str = "customers";

/// Customer operations against the backend.
///
/// One request per call; no retries and no caching.
#[async_trait]
pub trait CustomerApi: Send + Sync {
    /// `GET /customers`
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError>;

    /// `GET /customers/{id}`
    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError>;

    /// `POST /customers`
    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError>;

    /// `PUT /customers/{id}` with only the changed fields
    async fn update_customer(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Customer, ApiError>;

    /// `DELETE /customers/{id}`
    async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError>;
}

/// REST implementation of [`CustomerApi`]
#[derive(Debug, Clone)]
pub struct CustomerClient {
    api: ApiClient,
}

impl CustomerClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn customer_path(id: CustomerId) -> String {
    format!("{CUSTOMERS_PATH}/{id}")
}

#[async_trait]
impl CustomerApi for CustomerClient {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.api.get_json(CUSTOMERS_PATH).await
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        self.api.get_json(&customer_path(id)).await
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        let created: Customer = self.api.post_json(CUSTOMERS_PATH, customer).await?;
        tracing::info!(customer_id = ?created.customer_id, "customer created");
        Ok(created)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Customer, ApiError> {
        self.api.put_json(&customer_path(id), patch).await
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError> {
        self.api.delete(&customer_path(id)).await?;
        tracing::info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
