//! `reqwest`-backed [`Transport`] for native callers.

use async_trait::async_trait;
use venturedesk::net::{ApiConfig, ApiError, ApiRequest, Method, RawResponse, Transport};

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { client: reqwest::Client::new(), config }
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.config.url(&request.path);
        let mut builder = self.client.request(method(request.method), url).query(&request.query);
        if let Some(value) = request.authorization() {
            builder = builder.header(reqwest::header::AUTHORIZATION, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::trace!(status, bytes = body.len(), "response received");
        Ok(RawResponse::new(status, body))
    }
}
