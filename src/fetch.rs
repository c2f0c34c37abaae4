//! API gateway client: every backend call goes through here
//!
//! [`ApiClient::request`] adds the JSON content type, injects the bearer
//! token when the session holds one, and parses the body as JSON whatever
//! the status. Failures come back as a single [`Error`] carrying the
//! backend's own `message` when it sent one. Nothing is retried.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use log::{debug, warn};

use crate::config::ClientOptions;
use crate::error::{Error, Result, GENERIC_FAILURE};
use crate::session::SessionStore;

/// Envelope every backend endpoint answers with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A failed envelope carrying `message`
    pub fn failure<M: Into<String>>(message: M) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Unwrap the payload, turning `success: false` into a backend error
    pub fn into_data(self) -> Result<T> {
        if !self.success {
            return Err(Error::backend(
                None,
                self.message
                    .unwrap_or_else(|| "Request was not successful".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| Error::backend(None, "Response contained no data"))
    }
}

/// Per-request overrides: method, body, headers and query string
#[derive(Debug, Clone)]
pub struct RequestOptions {
    method: Method,
    headers: HeaderMap,
    query_params: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            query_params: Vec::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Add a header to the request, overriding the defaults
    ///
    /// Names or values that are not valid HTTP are skipped with a warning.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!("skipping invalid header '{}'", name),
        }
        self
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Add a JSON body to the request
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }
}

/// HTTP client bound to one backend and one session
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client for `options.base_url` reading tokens from `session`
    pub fn new(options: &ClientOptions, session: SessionStore) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = options.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self::with_client(&options.base_url, client, session))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_client(base_url: &str, client: Client, session: SessionStore) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(String, String)]) -> Result<Url> {
        let separator = if endpoint.starts_with('/') { "" } else { "/" };
        let mut url = Url::parse(&format!("{}{}{}", self.base_url, separator, endpoint))?;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn headers(&self, overrides: &HeaderMap) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = self.session.get() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                warn!("stored token is not a valid header value, request not sent");
                Error::validation("stored token is not a valid header value")
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    /// Execute a request against `endpoint` (a path relative to the base URL)
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse<T>> {
        let url = self.endpoint_url(endpoint, &options.query_params)?;
        debug!("{} {}", options.method, url);

        let mut req = self
            .client
            .request(options.method.clone(), url)
            .headers(self.headers(&options.headers)?);
        if let Some(body) = options.body {
            req = req.body(body);
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&text)
                .ok()
                .and_then(|body| body.get("message")?.as_str().map(str::to_string))
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            debug!("{} {} failed with {}: {}", options.method, endpoint, status, message);
            return Err(Error::backend(Some(status.as_u16()), message));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// GET `endpoint` and return its `data`
    pub async fn get_data<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.request::<T>(endpoint, RequestOptions::get())
            .await?
            .into_data()
    }

    /// POST `body` to `endpoint` and return its `data`
    pub async fn post_data<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        self.request::<T>(endpoint, RequestOptions::post().json(body)?)
            .await?
            .into_data()
    }
}
