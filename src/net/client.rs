//! Shared request executor for every resource client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Resource clients build an [`ApiRequest`] and hand it here. This is the one
//! place the bearer token is attached and the one place responses are turned
//! into `Result`s, so all resources agree on auth and error shape.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;
use super::transport::{ApiRequest, Method, RawResponse, Transport};
use crate::session::token_store::TokenStore;

/// Token policy for one request.
///
/// Mutating requests carry the token under `Public` too; only `Anonymous`
/// keeps it off a POST/PATCH/DELETE.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
    /// Never sends the token (login and signup).
    Anonymous,
}

impl Access {
    fn attaches_token(self, method: Method) -> bool {
        match self {
            Self::Anonymous => false,
            Self::Protected => true,
            Self::Public => method.is_mutating(),
        }
    }
}

/// Injected handle to the transport and token slot.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    #[must_use]
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// Send `request` and return the parsed JSON body.
    ///
    /// The token is attached for [`Access::Protected`] requests and for
    /// mutating methods unless the request is [`Access::Anonymous`]. A
    /// missing token is not an error here: the request goes out without the
    /// header and the server decides.
    ///
    /// # Errors
    ///
    /// Transport failures, non-2xx statuses ([`ApiError::Http`]) and
    /// unparseable bodies ([`ApiError::Body`]) are all returned as-is.
    pub async fn execute(&self, mut request: ApiRequest, access: Access) -> Result<Value, ApiError> {
        if access.attaches_token(request.method) {
            request.bearer = self.tokens.token();
        }
        log::debug!("{} {} auth={}", request.method, request.target(), request.bearer.is_some());

        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            log::warn!("{} {} failed with HTTP {}", request.method, request.target(), response.status);
        }
        interpret(response)
    }
}

/// Turn a raw response into the caller-facing result.
///
/// # Errors
///
/// [`ApiError::Http`] for non-2xx, [`ApiError::Body`] for invalid JSON.
pub fn interpret(response: RawResponse) -> Result<Value, ApiError> {
    if !response.is_success() {
        return Err(ApiError::from_status(response.status, &response.body));
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&response.body)?)
}

/// The server's success envelope: `{"status":"success","data":...}`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    pub data: Option<T>,
}

/// Extract and type the `data` member of a success envelope.
///
/// # Errors
///
/// [`ApiError::Body`] when `body` is not an envelope or `data` has the wrong shape.
pub fn envelope_data<T: DeserializeOwned>(body: Value) -> Result<Option<T>, ApiError> {
    let envelope: Envelope<T> = serde_json::from_value(body)?;
    Ok(envelope.data)
}
