//! Session inspection: reads identity claims out of the stored token.
//!
//! DESIGN
//! ======
//! Claims are decoded on every call instead of cached, so a token replaced by
//! a later login is reflected immediately. Only the payload segment is read;
//! the signature and `exp` are left to the server, which authorizes each
//! request independently. `is_authenticated` is a routing hint, not a
//! security boundary.

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;

use std::fmt;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use super::token_store::TokenStore;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("no session token stored")]
    MissingToken,
    #[error("malformed token: {0}")]
    Malformed(&'static str),
    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not a claims object: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Identity claims carried in the session token payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Claims {
    /// Subject (user) identifier. Numeric subjects are rendered as strings.
    #[serde(deserialize_with = "deserialize_string_like")]
    pub sub: String,
    /// Role name, e.g. `"admin"` or `"user"`.
    #[serde(deserialize_with = "deserialize_string_like")]
    pub role: String,
    /// Remaining claims (`exp`, `username`, ...) kept verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Decode the payload of a three-segment `header.payload.signature` token.
///
/// # Errors
///
/// Returns [`DecodeError`] when the token does not have exactly three
/// segments, the payload is not base64url, or it lacks `sub`/`role`.
pub fn decode_token(token: &str) -> Result<Claims, DecodeError> {
    let mut segments = token.split('.');
    let (Some(header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(DecodeError::Malformed("expected three dot-separated segments"));
    };
    if header.is_empty() || payload.is_empty() {
        return Err(DecodeError::Malformed("empty header or payload segment"));
    }
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Read-only view over the current session token.
#[derive(Clone)]
pub struct Session {
    tokens: Arc<dyn TokenStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl Session {
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenStore>) -> Self {
        Self { tokens }
    }

    /// True when the token slot holds a non-empty value. No validation.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.has_token()
    }

    /// Decode the stored token into claims.
    ///
    /// # Errors
    ///
    /// [`DecodeError::MissingToken`] when nothing is stored, otherwise any
    /// error from [`decode_token`].
    pub fn decode(&self) -> Result<Claims, DecodeError> {
        let token = self.tokens.token().ok_or(DecodeError::MissingToken)?;
        decode_token(&token)
    }

    /// # Errors
    ///
    /// See [`Session::decode`].
    pub fn subject_id(&self) -> Result<String, DecodeError> {
        self.decode().map(|claims| claims.sub)
    }

    /// # Errors
    ///
    /// See [`Session::decode`].
    pub fn role(&self) -> Result<String, DecodeError> {
        self.decode().map(|claims| claims.role)
    }
}

fn deserialize_string_like<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        _ => Err(D::Error::custom("expected string or number")),
    }
}
