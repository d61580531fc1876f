//! HTTP façade and the domain operation catalog
//!
//! Every outbound call goes through [`ApiClient::call`], which attaches the
//! session's bearer token, encodes the body, and turns every failure into an
//! [`ApiError`]. The operations in the submodules are thin typed wrappers
//! over it.

mod ai;
mod articles;
mod auth;
mod error;
mod users;

pub use error::{ApiError, ErrorKind};

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::session::Session;

/// Request body
#[derive(Debug, Default)]
pub enum Body {
    /// No body
    #[default]
    Empty,
    /// Structured value sent as `application/json`
    Json(serde_json::Value),
    /// Pre-built multipart payload, passed through untouched
    Multipart(reqwest::multipart::Form),
}

/// Method, body and extra headers of a façade call
#[derive(Debug)]
pub struct RequestOptions {
    /// HTTP method
    pub method: Method,
    /// Request body
    pub body: Body,
    /// Extra headers (an `Authorization` entry is ignored)
    pub headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    /// Options for `method` with no body
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: Body::Empty,
            headers: Vec::new(),
        }
    }

    /// `GET` with no body
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// `POST` with no body
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// `PUT` with no body
    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    /// `DELETE` with no body
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Attach a JSON body
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let value =
            serde_json::to_value(body).map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    /// Attach a multipart body
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Add an extra header
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Client for the Newsroom backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl ApiClient {
    /// Create a client for `base_url` using `session` for credentials
    pub fn new(base_url: &str, session: Arc<Session>) -> Self {
        Self::with_http_client(Client::new(), base_url, session)
    }

    /// Create a client around an existing `reqwest` client
    pub fn with_http_client(http: Client, base_url: &str, session: Arc<Session>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Create a client from configuration
    pub fn from_config(config: &Config, session: Arc<Session>) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_http_client(http, &config.api_base_url, session))
    }

    /// Base URL every path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session used for credentials
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Build full URL
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Perform one request and decode the JSON response into `T`
    pub async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let RequestOptions {
            method,
            body,
            headers,
        } = options;

        let mut request = self.http.request(method.clone(), &url);

        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::InvalidRequest(format!("Bad header name {name}: {e}")))?;
            if name == AUTHORIZATION {
                tracing::debug!("Dropping caller-supplied Authorization header");
                continue;
            }
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ApiError::InvalidRequest(format!("Bad value for {name}: {e}")))?;
            request = request.header(name, value);
        }

        if let Some(token) = self.session.credential() {
            request = request.bearer_auth(token);
        }

        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        tracing::debug!("{method} {url}");

        let response = request.send().await.map_err(|source| {
            tracing::warn!("{method} {url} failed: {source}");
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        tracing::debug!("{method} {url} -> {status}");

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            let message = error::error_message(status, &bytes);
            tracing::warn!("{method} {url} returned {status}: {message}");
            return Err(ApiError::Http { status, message });
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::warn!("{method} {url} returned an unexpected body: {e}");
            ApiError::Shape {
                url,
                message: e.to_string(),
            }
        })
    }
}

/// Encode a slug as a single path segment
fn segment(slug: &str) -> String {
    urlencoding::encode(slug).into_owned()
}
