//! HTTP transport seam for the accessor layer.
//!
//! The accessor layer talks to the gateway through `ContentTransport` so
//! tests can substitute a recording mock. The real implementation wraps
//! reqwest and prefixes every path with `/api`.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;

#[async_trait]
pub trait ContentTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<Value, ClientError>;
    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError>;
    async fn put(&self, path: &str, body: Value) -> Result<Value, ClientError>;
    async fn delete(&self, path: &str) -> Result<Value, ClientError>;
}

/// reqwest-backed transport against a gateway base URL.
#[cfg(feature = "client")]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

#[cfg(feature = "client")]
impl HttpTransport {
    /// `base_url` is the gateway origin, e.g. `https://uisn.example.org`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn send(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(feature = "client")]
#[async_trait]
impl ContentTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send(reqwest::Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.send(reqwest::Method::POST, path, Some(body)).await
    }

    async fn put(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.send(reqwest::Method::PUT, path, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.send(reqwest::Method::DELETE, path, None).await
    }
}
