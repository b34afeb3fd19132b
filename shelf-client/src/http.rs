//! HTTP client for the catalog backend
//!
//! Builds URLs with query parameters, attaches bearer tokens, parses
//! JSON and normalizes errors. Typed resource methods live in
//! [`crate::api`].

use std::fmt::Display;
use std::sync::Arc;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use shared::ErrorBody;

use crate::session::{KvStore, TOKEN_KEY};
use crate::{ClientConfig, ClientError, ClientResult};

/// Query-string parameters
///
/// Entries are appended in insertion order; `None` values are skipped
/// and scalars (numbers, booleans) are stringified, mirroring the
/// backend's query conventions.
#[derive(Debug, Clone, Default)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one parameter
    pub fn set(&mut self, key: impl Into<String>, value: impl Display) -> &mut Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Append one parameter when the value is present
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<impl Display>) -> &mut Self {
        if let Some(value) = value {
            self.set(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

/// HTTP client for making requests to the catalog backend
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    token_store: Option<Arc<dyn KvStore>>,
    cancel: Option<CancellationToken>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            token_store: config.token_store.clone(),
            cancel: config.cancel.clone(),
        }
    }

    /// Set an explicit bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the cancellation token raced against every request
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Get the explicit token, if any
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Resolve the bearer token: explicit token first, then the
    /// persisted one from the key-value store
    fn auth_header(&self) -> Option<String> {
        let token = self.token.clone().or_else(|| {
            self.token_store
                .as_ref()
                .and_then(|store| store.get(TOKEN_KEY))
        })?;
        Some(format!("Bearer {}", token))
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(
            Method::GET,
            path,
            &QueryParams::new(),
            HeaderMap::new(),
            None::<&()>,
        )
        .await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> ClientResult<T> {
        self.request(Method::GET, path, params, HeaderMap::new(), None::<&()>)
            .await
    }

    /// Make a GET request with extra headers
    pub async fn get_with_headers<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: HeaderMap,
    ) -> ClientResult<T> {
        self.request(Method::GET, path, &QueryParams::new(), headers, None::<&()>)
            .await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(
            Method::POST,
            path,
            &QueryParams::new(),
            HeaderMap::new(),
            Some(body),
        )
        .await
    }

    /// Make a POST request with a JSON body and extra headers
    pub async fn post_with_headers<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        headers: HeaderMap,
    ) -> ClientResult<T> {
        self.request(Method::POST, path, &QueryParams::new(), headers, Some(body))
            .await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(
            Method::PUT,
            path,
            &QueryParams::new(),
            HeaderMap::new(),
            Some(body),
        )
        .await
    }

    /// Make a PATCH request with a JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.request(
            Method::PATCH,
            path,
            &QueryParams::new(),
            HeaderMap::new(),
            Some(body),
        )
        .await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(
            Method::DELETE,
            path,
            &QueryParams::new(),
            HeaderMap::new(),
            None::<&()>,
        )
        .await
    }

    /// Caller headers are merged over the defaults, so a caller can
    /// override `Content-Type` or `Authorization` per request.
    async fn request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
        headers: HeaderMap,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let url = self.url(path);

        let mut request = self
            .client
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json");
        if !params.is_empty() {
            request = request.query(params.as_slice());
        }
        if let Some(auth) = self.auth_header() {
            request = request.header(header::AUTHORIZATION, auth);
        }
        request = request.headers(headers);
        if let Some(body) = body {
            request = request.json(body);
        }

        match self.execute(request).await {
            Ok(value) => Ok(value),
            Err(err) => {
                tracing::error!(url = %url, error = %err, "API request failed");
                Err(err)
            }
        }
    }

    /// Send the request and read the body, racing the whole exchange
    /// against the cancellation token. A cancel during body streaming
    /// surfaces [`ClientError::Cancelled`] just like one before send.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ClientResult<T> {
        let exchange = async {
            let response = request.send().await?;
            Self::handle_response(response).await
        };

        match &self.cancel {
            Some(cancel) => tokio::select! {
                _ = cancel.cancelled() => Err(ClientError::Cancelled),
                result = exchange => result,
            },
            None => exchange.await,
        }
    }

    /// Handle the HTTP response: non-success statuses become
    /// [`ClientError::Api`] carrying the server's `message` field when
    /// the body parses, else a synthesized message with the status code.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorBody>(&text) {
                Ok(body) => body.message,
                Err(_) => synthesize_error_message(status),
            };
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(Into::into)
    }
}

fn synthesize_error_message(status: StatusCode) -> String {
    format!(
        "API error: server responded with {} {}, but returned invalid JSON",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Unknown")
    )
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_deref().map(|_| "<set>"))
            .finish()
    }
}
