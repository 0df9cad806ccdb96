//! HTTP client wrapper for the Alpaca REST API.
//!
//! Single-attempt: there is no retry or backoff, a failed call surfaces to
//! the caller immediately. Non-success responses keep their JSON bodies so
//! the HTTP layer can forward them verbatim.

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::api_types::ApiErrorBody;
use super::config::AlpacaConfig;
use super::error::AlpacaError;

/// HTTP client for the Alpaca API.
#[derive(Debug, Clone)]
pub struct AlpacaHttpClient {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
}

impl AlpacaHttpClient {
    /// Create a new HTTP client from config.
    ///
    /// Missing credentials are not an error here; requests go out with
    /// empty auth headers and fail upstream instead.
    pub fn new(config: &AlpacaConfig) -> Result<Self, AlpacaError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AlpacaError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, AlpacaError> {
        execute(self.request(Method::GET, path)).await
    }

    /// Make a GET request with query parameters.
    #[allow(clippy::future_not_send)]
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T, AlpacaError> {
        execute(self.request(Method::GET, path).query(query)).await
    }

    /// Make a POST request with a JSON body.
    #[allow(clippy::future_not_send)]
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AlpacaError> {
        execute(self.request(Method::POST, path).json(body)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("APCA-API-KEY-ID", &self.api_key)
            .header("APCA-API-SECRET-KEY", &self.api_secret)
    }
}

/// Send a request and decode the response.
async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, AlpacaError> {
    let response = request
        .send()
        .await
        .map_err(|e| AlpacaError::Http(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        let text = response
            .text()
            .await
            .map_err(|e| AlpacaError::Http(e.to_string()))?;
        if text.is_empty() {
            return serde_json::from_str("null").map_err(|e| AlpacaError::JsonParse(e.to_string()));
        }
        return serde_json::from_str(&text).map_err(|e| AlpacaError::JsonParse(e.to_string()));
    }

    let body = response.text().await.unwrap_or_default();
    Err(api_error(status, &body))
}

/// Build an API error from a non-success response, keeping the raw body
/// when it was JSON and pulling a message out of it when one exists.
fn api_error(status: StatusCode, body_text: &str) -> AlpacaError {
    let body: Option<serde_json::Value> = serde_json::from_str(body_text).ok();
    let message = body
        .as_ref()
        .and_then(|value| serde_json::from_value::<ApiErrorBody>(value.clone()).ok())
        .and_then(|parsed| parsed.message)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("upstream request failed")
                .to_string()
        });

    AlpacaError::Api {
        status: status.as_u16(),
        message,
        body,
    }
}
