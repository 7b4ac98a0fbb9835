//! Hosted backend client.
//!
//! The storefront keeps its `products` and `orders` tables in a hosted Postgres exposed
//! through a PostgREST-style API. Each table is a collection under `/rest/v1/`; filters
//! and ordering travel in the query string. Product images live in the `products`
//! storage bucket under `/storage/v1/object/`.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

mod catalog;
mod errors;
mod images;
mod orders;

pub use errors::BackendError;

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project address, e.g. `"https://abcd.supabase.co"`.
    pub url: String,

    /// Project API key, sent both as `apikey` and as a bearer token.
    pub api_key: String,
}

/// HTTP client for the hosted backend's REST tables.
#[derive(Debug, Clone)]
pub struct RestBackend {
    config: BackendConfig,
    http: Client,
}

impl RestBackend {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        table_url(&self.config.url, table, query)
    }

    fn request(&self, method: Method, table: &str, query: &str) -> RequestBuilder {
        self.http
            .request(method, self.table_url(table, query))
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Send a request expecting a JSON array of rows back.
    async fn rows<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>, BackendError> {
        let response = checked(request.send().await?).await?;

        Ok(response.json().await?)
    }
}

fn table_url(base: &str, table: &str, query: &str) -> String {
    let base = base.trim_end_matches('/');

    if query.is_empty() {
        format!("{base}/rest/v1/{table}")
    } else {
        format!("{base}/rest/v1/{table}?{query}")
    }
}

async fn checked(response: Response) -> Result<Response, BackendError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    Err(BackendError::UnexpectedResponse(format!(
        "request failed with status {status}: {text}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_joins_base_and_query() {
        assert_eq!(
            table_url("https://shop.example/", "products", "select=*&order=id.asc"),
            "https://shop.example/rest/v1/products?select=*&order=id.asc"
        );
        assert_eq!(
            table_url("https://shop.example", "orders", ""),
            "https://shop.example/rest/v1/orders"
        );
    }
}
