//! In-memory stand-ins for the data clients.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cardholder_client::{ApiError, CreditCardApi, CustomerApi};
use cardholder_core::models::{
    CardId, CardType, CreditCard, CreditCardPatch, Customer, CustomerId, CustomerPatch,
    NewCreditCard, NewCustomer,
};
use chrono::NaiveDate;
use reqwest::{Method, StatusCode};

fn server_error(method: Method, path: &str) -> ApiError {
    ApiError::status(
        method,
        format!("http://fake/api/{path}"),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}

fn not_found(method: Method, path: &str) -> ApiError {
    ApiError::status(method, format!("http://fake/api/{path}"), StatusCode::NOT_FOUND)
}

pub fn card(card_id: CardId, customer_id: CustomerId, current_balance: f64) -> CreditCard {
    CreditCard {
        card_id,
        card_number: format!("4111-0000-0000-{card_id:04}"),
        expiration_date: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
        cvv: "123".to_string(),
        card_type: CardType::Credit,
        credit_limit: 5000.0,
        current_balance,
        customer_id,
    }
}

pub fn customer(id: CustomerId, first: &str, last: &str, cards: Vec<CreditCard>) -> Customer {
    Customer {
        customer_id: Some(id),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
        credit_cards: Some(cards),
    }
}

/// Customer store recording every call
#[derive(Default)]
pub struct FakeCustomerApi {
    pub customers: Mutex<Vec<Customer>>,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<NewCustomer>>,
    pub patches: Mutex<Vec<(CustomerId, CustomerPatch)>>,
    pub fail: AtomicBool,
    /// Latency added to reads
    pub delay: Mutex<Option<Duration>>,
}

impl FakeCustomerApi {
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        Self {
            customers: Mutex::new(customers),
            ..Self::default()
        }
    }

    pub fn fail_requests(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn respond_after(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    fn record(&self, call: String) -> bool {
        self.calls.lock().unwrap().push(call);
        self.fail.load(Ordering::SeqCst)
    }

    async fn lag(&self) {
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CustomerApi for FakeCustomerApi {
    async fn list_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.lag().await;
        if self.record("list".to_string()) {
            return Err(server_error(Method::GET, "customers"));
        }
        Ok(self.customers.lock().unwrap().clone())
    }

    async fn get_customer(&self, id: CustomerId) -> Result<Customer, ApiError> {
        self.lag().await;
        let path = format!("customers/{id}");
        if self.record(format!("get {id}")) {
            return Err(server_error(Method::GET, &path));
        }
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.customer_id == Some(id))
            .cloned()
            .ok_or_else(|| not_found(Method::GET, &path))
    }

    async fn create_customer(&self, customer: &NewCustomer) -> Result<Customer, ApiError> {
        if self.record("create".to_string()) {
            return Err(server_error(Method::POST, "customers"));
        }
        self.created.lock().unwrap().push(customer.clone());

        let mut customers = self.customers.lock().unwrap();
        let id = customers.iter().filter_map(|c| c.customer_id).max().unwrap_or(0) + 1;
        let created = Customer {
            customer_id: Some(id),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
            credit_cards: Some(Vec::new()),
        };
        customers.push(created.clone());
        Ok(created)
    }

    async fn update_customer(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Customer, ApiError> {
        let path = format!("customers/{id}");
        if self.record(format!("update {id}")) {
            return Err(server_error(Method::PUT, &path));
        }
        self.patches.lock().unwrap().push((id, patch.clone()));

        let mut customers = self.customers.lock().unwrap();
        let stored = customers
            .iter_mut()
            .find(|c| c.customer_id == Some(id))
            .ok_or_else(|| not_found(Method::PUT, &path))?;
        if let Some(first_name) = &patch.first_name {
            stored.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            stored.last_name = last_name.clone();
        }
        if let Some(email) = &patch.email {
            stored.email = email.clone();
        }
        // Mirror a backend that answers without the nested cards
        Ok(Customer {
            credit_cards: None,
            ..stored.clone()
        })
    }

    async fn delete_customer(&self, id: CustomerId) -> Result<(), ApiError> {
        if self.record(format!("delete {id}")) {
            return Err(server_error(Method::DELETE, &format!("customers/{id}")));
        }
        self.customers
            .lock()
            .unwrap()
            .retain(|c| c.customer_id != Some(id));
        Ok(())
    }
}

/// Card store recording every call
#[derive(Default)]
pub struct FakeCreditCardApi {
    pub cards: Mutex<Vec<CreditCard>>,
    pub calls: Mutex<Vec<String>>,
    pub created: Mutex<Vec<NewCreditCard>>,
    pub patches: Mutex<Vec<(CardId, CreditCardPatch)>>,
    pub fail: AtomicBool,
}

impl FakeCreditCardApi {
    pub fn with_cards(cards: Vec<CreditCard>) -> Self {
        Self {
            cards: Mutex::new(cards),
            ..Self::default()
        }
    }

    pub fn fail_requests(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> bool {
        self.calls.lock().unwrap().push(call);
        self.fail.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CreditCardApi for FakeCreditCardApi {
    async fn list_credit_cards(&self) -> Result<Vec<CreditCard>, ApiError> {
        if self.record("list".to_string()) {
            return Err(server_error(Method::GET, "credit-cards"));
        }
        Ok(self.cards.lock().unwrap().clone())
    }

    async fn get_credit_card(&self, id: CardId) -> Result<CreditCard, ApiError> {
        let path = format!("credit-cards/{id}");
        if self.record(format!("get {id}")) {
            return Err(server_error(Method::GET, &path));
        }
        self.cards
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.card_id == id)
            .cloned()
            .ok_or_else(|| not_found(Method::GET, &path))
    }

    async fn create_credit_card(&self, card: &NewCreditCard) -> Result<CreditCard, ApiError> {
        if self.record("create".to_string()) {
            return Err(server_error(Method::POST, "credit-cards"));
        }
        self.created.lock().unwrap().push(card.clone());

        let mut cards = self.cards.lock().unwrap();
        let card_id = cards.iter().map(|c| c.card_id).max().unwrap_or(100) + 1;
        let created = CreditCard {
            card_id,
            card_number: card.card_number.clone(),
            expiration_date: card.expiration_date,
            cvv: card.cvv.clone(),
            card_type: card.card_type,
            credit_limit: card.credit_limit,
            current_balance: card.current_balance,
            customer_id: card.customer_id.unwrap_or_default(),
        };
        cards.push(created.clone());
        Ok(created)
    }

    async fn update_credit_card(
        &self,
        id: CardId,
        patch: &CreditCardPatch,
    ) -> Result<CreditCard, ApiError> {
        let path = format!("credit-cards/{id}");
        if self.record(format!("update {id}")) {
            return Err(server_error(Method::PUT, &path));
        }
        self.patches.lock().unwrap().push((id, patch.clone()));

        let mut cards = self.cards.lock().unwrap();
        let stored = cards
            .iter_mut()
            .find(|c| c.card_id == id)
            .ok_or_else(|| not_found(Method::PUT, &path))?;
        if let Some(v) = &patch.card_number {
            stored.card_number = v.clone();
        }
        if let Some(v) = patch.expiration_date {
            stored.expiration_date = v;
        }
        if let Some(v) = &patch.cvv {
            stored.cvv = v.clone();
        }
        if let Some(v) = patch.card_type {
            stored.card_type = v;
        }
        if let Some(v) = patch.credit_limit {
            stored.credit_limit = v;
        }
        if let Some(v) = patch.current_balance {
            stored.current_balance = v;
        }
        Ok(stored.clone())
    }

    async fn delete_credit_card(&self, id: CardId) -> Result<(), ApiError> {
        if self.record(format!("delete {id}")) {
            return Err(server_error(Method::DELETE, &format!("credit-cards/{id}")));
        }
        self.cards.lock().unwrap().retain(|c| c.card_id != id);
        Ok(())
    }
}
