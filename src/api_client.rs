//! HTTP JSON transport for the dashboard API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Thin reqwest wrapper: URL joining, bearer auth, JSON in/out, and
/// response classification into [`StoreError`].
#[derive(Debug, Clone, Default)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
            bearer: None,
        }
    }

    /// Set the base URL for API requests. An empty base keeps paths
    /// relative (same-origin, the normal web deployment).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Attach a session token sent as `Authorization: Bearer`.
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn decorate(&self, mut rb: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        rb = rb.header("X-Request-Id", uuid::Uuid::new_v4().to_string());
        if let Some(token) = &self.bearer {
            rb = rb.bearer_auth(token);
        }
        rb
    }

    /// Run a prepared request and decode the JSON body. The body is read as
    /// text first so non-success responses keep their error envelope.
    async fn run_json<TRes: DeserializeOwned>(
        rb: reqwest::RequestBuilder,
    ) -> Result<TRes, StoreError> {
        let resp = rb
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();

        let text = resp
            .text()
            .await
            .map_err(|e| StoreError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(StoreError::from_status(status, &text));
        }

        // Void endpoints return an empty body; decode it as null.
        let text = if text.is_empty() { "null" } else { &text };
        serde_json::from_str(text).map_err(|e| StoreError::Unknown(format!("bad response body: {e}")))
    }

    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, StoreError> {
        let rb = self.decorate(self.client.get(self.url(path)));
        Self::run_json(rb).await
    }

    pub async fn post_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, StoreError> {
        let rb = self.decorate(self.client.post(self.url(path)).json(body));
        Self::run_json(rb).await
    }

    pub async fn put_json<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, StoreError> {
        let rb = self.decorate(self.client.put(self.url(path)).json(body));
        Self::run_json(rb).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), StoreError> {
        let rb = self.decorate(self.client.delete(self.url(path)));
        Self::run_json::<serde_json::Value>(rb).await.map(|_| ())
    }
}
