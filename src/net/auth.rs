//! Login, signup and logout.
//!
//! A successful login is the only thing that writes the token slot; logout is
//! the only thing that clears it. Both are last-writer-wins.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use serde_json::json;

use super::client::{Access, ApiClient, envelope_data};
use super::error::ApiError;
use super::transport::{ApiRequest, Method};
use super::types::LoginData;

pub const LOGIN_ENDPOINT: &str = "/login";
pub const SIGNUP_ENDPOINT: &str = "/signup";

#[derive(Clone, Debug)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// `POST /login {login, password}`; stores `data.token` on success.
    ///
    /// Sent without a bearer header even when a token is stored.
    ///
    /// The token is stored raw. Older quoted values are still read correctly
    /// because unquoting happens when the slot is read.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call ([`ApiError::Body`] when the success
    /// body is not a login envelope), or [`ApiError::MissingToken`] when it
    /// carries no token. The slot is left untouched on every error.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginData, ApiError> {
        let request = ApiRequest::new(Method::Post, LOGIN_ENDPOINT).with_body(credentials(login, password));
        let body = self.api.execute(request, Access::Anonymous).await?;
        let data = envelope_data::<LoginData>(body)?
            .filter(|data| !data.token.is_empty())
            .ok_or(ApiError::MissingToken)?;
        self.api.tokens().set(&data.token);
        log::info!("login succeeded for {login}");
        Ok(data)
    }

    /// `POST /signup {login, password}`. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Any [`ApiError`] from the call.
    pub async fn register(&self, login: &str, password: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::Post, SIGNUP_ENDPOINT).with_body(credentials(login, password));
        self.api.execute(request, Access::Anonymous).await?;
        Ok(())
    }

    /// Forget the stored token. Local only; the server keeps no session.
    pub fn logout(&self) {
        self.api.tokens().clear();
    }
}

fn credentials(login: &str, password: &str) -> serde_json::Value {
    json!({ "login": login, "password": password })
}
