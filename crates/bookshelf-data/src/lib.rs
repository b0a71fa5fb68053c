//! HTTP client utilities for the bookshelf storefront.
//!
//! Provides a small builder API over `reqwest` for talking to JSON and
//! form-encoded HTTP APIs such as the hosted payment provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf_data::FetchClient;
//!
//! let client = FetchClient::new()?.with_base_url("https://api.stripe.com");
//!
//! let session: serde_json::Value = client
//!     .get("/v1/checkout/sessions/cs_test_123")
//!     .bearer_auth(secret_key)
//!     .send()
//!     .await?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for making outbound requests.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    timeout: Duration,
}

impl FetchClient {
    /// Create a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| FetchError::ClientError(e.to_string()))?;
        Ok(Self {
            http,
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = self.resolve(url.into());

        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, full_url).timeout(self.timeout),
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set the request body as form-encoded pairs.
    pub fn form<K: AsRef<str>, V: AsRef<str>>(mut self, pairs: &[(K, V)]) -> Self {
        self.builder = self.builder.form(pairs);
        self
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Inspect the request that will be sent.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and return the response.
    ///
    /// Non-2xx statuses are not errors here; callers inspect
    /// [`Response::is_success`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
            timeout,
        } = self.builder;

        let mut request = self.http.request(method.to_reqwest(), &url);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!(method = method.as_str(), %url, "sending request");
        let response = request.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(status, bytes = body.len(), "received response");

        Ok(Response::new(status, headers, body))
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Method, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_joining() {
        let client = FetchClient::new()
            .unwrap()
            .with_base_url("https://api.stripe.com/");
        let req = client.get("/v1/checkout/sessions/cs_1");
        assert_eq!(
            req.as_request().url(),
            "https://api.stripe.com/v1/checkout/sessions/cs_1"
        );

        let absolute = client.get("https://example.com/x");
        assert_eq!(absolute.as_request().url(), "https://example.com/x");
    }

    #[test]
    fn test_client_timeout_applied() {
        let client = FetchClient::new()
            .unwrap()
            .with_timeout(Duration::from_secs(5));
        let req = client.post("https://api.stripe.com/v1/checkout/sessions");
        assert_eq!(req.as_request().method(), Method::Post);
        assert_eq!(req.as_request().timeout, Some(Duration::from_secs(5)));
    }
}
