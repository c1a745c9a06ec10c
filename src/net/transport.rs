//! HTTP transport seam.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: [`BrowserTransport`] answers every request with a transport
//! error; non-browser callers plug in their own [`Transport`] instead.
//!
//! DESIGN
//! ======
//! A transport only moves bytes. It never inspects status codes or bodies;
//! [`crate::net::ApiClient`] owns that interpretation so every transport
//! reports failures the same way.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::config::ApiConfig;
use super::error::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether the method changes server state (and so always carries the token).
    #[must_use]
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API call, relative to the configured origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path below the origin, e.g. `/companies/5/update`.
    pub path: String,
    /// Query pairs in send order. Encoding is left to the transport.
    pub query: Vec<(String, String)>,
    /// Bearer token to send, already stripped of quotes.
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), bearer: None, body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    #[must_use]
    pub fn with_query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// `Authorization` header value, if a token is attached.
    #[must_use]
    pub fn authorization(&self) -> Option<String> {
        self.bearer.as_ref().map(|token| format!("Bearer {token}"))
    }

    /// Path plus unencoded query, for logs and assertions.
    #[must_use]
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{query}", self.path)
    }
}

/// Status and body text of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves an [`ApiRequest`] over the wire.
///
/// Futures are not required to be `Send`: browser fetch futures are not.
#[async_trait(?Send)]
pub trait Transport: Send + Sync {
    /// # Errors
    ///
    /// [`ApiError::Transport`] when no HTTP response was received.
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// `fetch`-backed transport for the browser build.
#[derive(Clone, Debug, Default)]
pub struct BrowserTransport {
    config: ApiConfig,
}

impl BrowserTransport {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config }
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = self.config.url(&request.path);
            let builder = match request.method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            let builder = builder.query(request.query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
            let builder = match request.authorization() {
                Some(value) => builder.header("Authorization", &value),
                None => builder,
            };
            let prepared = match &request.body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let resp = prepared
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(RawResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&self.config, request);
            Err(ApiError::Transport("browser transport not available outside the browser".to_owned()))
        }
    }
}
