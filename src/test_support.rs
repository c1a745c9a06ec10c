//! Shared fixtures for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::net::client::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::{ApiRequest, RawResponse, Transport};
use crate::session::token_store::MemoryTokenStore;

/// Transport that records every request and replays queued responses.
///
/// With nothing queued it answers `200 {"status":"success"}`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<RawResponse, String>>>,
}

impl RecordingTransport {
    pub fn push_response(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn push_transport_error(&self, message: &str) {
        self.responses.lock().unwrap().push_back(Err(message.to_owned()));
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(ApiError::Transport(message)),
            None => Ok(RawResponse::new(200, r#"{"status":"success"}"#)),
        }
    }
}

/// An `ApiClient` over a recording transport and in-memory token slot.
pub struct Harness {
    pub transport: Arc<RecordingTransport>,
    pub tokens: Arc<MemoryTokenStore>,
    pub api: ApiClient,
}

impl Harness {
    pub fn new() -> Self {
        let transport = Arc::new(RecordingTransport::default());
        let tokens = Arc::new(MemoryTokenStore::new());
        let api = ApiClient::new(transport.clone(), tokens.clone());
        Self { transport, tokens, api }
    }

    /// Harness whose token slot holds `raw` exactly as written.
    pub fn with_token(raw: &str) -> Self {
        let harness = Self::new();
        crate::session::TokenStore::set(harness.tokens.as_ref(), raw);
        harness
    }
}
