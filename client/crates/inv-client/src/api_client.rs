use crate::{ClientError, ClientResult, RequestInterceptor};

use inv_config::{Config, EndpointsConfig};

use std::sync::Arc;

use log::{debug, warn};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// HTTP client for the inventory REST backend
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    endpoints: EndpointsConfig,
    client: ReqwestClient,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
}

impl ApiClient {
    /// Create a client with default endpoint paths and no timeouts.
    ///
    /// # Arguments
    /// * `base_url` - Backend URL (e.g., "http://127.0.0.1:8080/api")
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints: EndpointsConfig::default(),
            client: ReqwestClient::new(),
            interceptors: Vec::new(),
        }
    }

    /// Create a client from configuration (base URL, endpoint paths, timeouts).
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.http.timeout())
            .connect_timeout(config.http.connect_timeout())
            .build()?;

        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            endpoints: config.endpoints.clone(),
            client,
            interceptors: Vec::new(),
        })
    }

    /// Append an interceptor; interceptors run in the order they were added.
    pub fn with_interceptor(mut self, interceptor: Arc<dyn RequestInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoints(&self) -> &EndpointsConfig {
        &self.endpoints
    }

    /// Start a request against a path relative to the base URL.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client.request(method, &url)
    }

    /// Run interceptors, send, and decode a JSON response.
    ///
    /// Response interceptors have already run by the time an error is returned,
    /// so a caller handling a 401 sees the post-logout state.
    pub async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let mut request = builder.build()?;

        for interceptor in &self.interceptors {
            interceptor.on_request(&mut request);
        }

        let url = request.url().clone();
        let method = request.method().clone();
        debug!("{method} {}", url.path());

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("{method} {} failed: {e}", url.path());
            ClientError::from_reqwest(e)
        })?;
        let status = response.status();

        for interceptor in &self.interceptors {
            interceptor.on_response(&url, status);
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            let err = Self::api_error(status, &body);
            warn!("{method} {} -> {status}", url.path());
            return Err(err);
        }

        if body.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }

        Ok(serde_json::from_slice(&body)?)
    }

    /// Map a non-success response body to an API error.
    ///
    /// Understands `{"error": {"code", "message"}}` and `{"message"}` bodies;
    /// anything else falls back to the status reason.
    fn api_error(status: StatusCode, body: &[u8]) -> ClientError {
        let parsed: Option<Value> = serde_json::from_slice(body).ok();
        let detail = parsed
            .as_ref()
            .map(|v| v.get("error").filter(|e| e.is_object()).unwrap_or(v));

        let code = detail
            .and_then(|d| d.get("code"))
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));

        let message = detail
            .and_then(|d| d.get("message"))
            .and_then(|v| v.as_str())
            .map(String::from)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        ClientError::api_error(status.as_u16(), code, message)
    }

    // =========================================================================
    // Generic JSON helpers for feature screens
    // =========================================================================

    pub async fn get_json(&self, path: &str) -> ClientResult<Value> {
        self.send(self.request(Method::GET, path)).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> ClientResult<Value> {
        self.send(self.request(Method::PUT, path).json(body)).await
    }

    pub async fn delete(&self, path: &str) -> ClientResult<Value> {
        self.send(self.request(Method::DELETE, path)).await
    }
}
