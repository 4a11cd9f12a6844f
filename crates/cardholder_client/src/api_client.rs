//! Shared HTTP plumbing for the data clients.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// JSON-over-HTTP client bound to the API base address.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Create a new API client with reqwest defaults
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client honouring the configured timeout
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base address
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub(crate) async fn get_json<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.send(Method::GET, &url, self.client.get(&url)).await?;
        decode(Method::GET, url, response).await
    }

    pub(crate) async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.client.post(&url).json(body);
        let response = self.send(Method::POST, &url, request).await?;
        decode(Method::POST, url, response).await
    }

    pub(crate) async fn put_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let request = self.client.put(&url).json(body);
        let response = self.send(Method::PUT, &url, request).await?;
        decode(Method::PUT, url, response).await
    }

    /// DELETE; any response body is ignored
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        self.send(Method::DELETE, &url, self.client.delete(&url))
            .await
            .map(|_| ())
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        tracing::debug!(%method, %url, "sending request");

        let response = request.send().await.map_err(|source| {
            tracing::warn!(%method, %url, error = %source, "request failed");
            ApiError::Transport {
                method: method.clone(),
                url: url.to_string(),
                source,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            tracing::warn!(%method, %url, %status, "non-success response");
            Err(ApiError::status(method, url, status))
        }
    }
}

async fn decode<T>(method: Method, url: String, response: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    response.json::<T>().await.map_err(|source| {
        tracing::warn!(%method, %url, error = %source, "response body could not be decoded");
        ApiError::Transport {
            method,
            url,
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new("http://localhost:8080/api");
        assert_eq!(client.base_url(), "http://localhost:8080/api");
    }

    #[test]
    fn test_url_joins_single_slash() {
        let client = ApiClient::new("http://localhost:8080/api/");
        assert_eq!(client.url("/customers/5"), "http://localhost:8080/api/customers/5");
        assert_eq!(client.url("credit-cards"), "http://localhost:8080/api/credit-cards");
    }

    #[test]
    fn test_from_config_rejects_invalid_url() {
        let config = ClientConfig::new("ftp://example.com");
        assert!(ApiClient::from_config(&config).is_err());
    }
}
