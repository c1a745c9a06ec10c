//! Persistent slot holding the session's bearer token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser build keeps the token in `localStorage` under `user`. Values
//! written there may be JSON-stringified (wrapped in quotes), so
//! `TokenStore::token` strips wrapping quotes. That method is the only place
//! unquoting happens; callers never clean the value themselves.
//!
//! TRADE-OFFS
//! ==========
//! Single scalar slot, last writer wins. No expiry, encryption, or cross-tab
//! invalidation.

#[cfg(test)]
#[path = "token_store_test.rs"]
mod token_store_test;

use std::sync::{Arc, PoisonError, RwLock};

/// `localStorage` key holding the raw token string.
pub const TOKEN_STORAGE_KEY: &str = "user";

/// A single-value store for the session token.
pub trait TokenStore: Send + Sync {
    /// Persist `token`, overwriting any previous value.
    fn set(&self, token: &str);

    /// Raw stored value, or `None` when nothing is stored.
    fn get(&self) -> Option<String>;

    /// Remove the stored value.
    fn clear(&self);

    /// Stored token with surrounding quote characters removed.
    ///
    /// Returns `None` when the slot is missing or holds only quotes/nothing.
    fn token(&self) -> Option<String> {
        self.get()
            .map(|raw| unquote(&raw).to_owned())
            .filter(|token| !token.is_empty())
    }

    /// Whether the slot holds a non-empty raw value.
    fn has_token(&self) -> bool {
        self.get().is_some_and(|raw| !raw.is_empty())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn set(&self, token: &str) {
        (**self).set(token);
    }

    fn get(&self) -> Option<String> {
        (**self).get()
    }

    fn clear(&self) {
        (**self).clear();
    }
}

/// Strip any wrapping `"` characters left by JSON-stringified storage.
#[must_use]
pub fn unquote(raw: &str) -> &str {
    raw.trim_matches('"')
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local token slot. Used by tests and non-browser callers.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { slot: RwLock::new(Some(token.to_owned())) }
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &str) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn get(&self) -> Option<String> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// =============================================================================
// BROWSER STORE
// =============================================================================

/// Token slot backed by `window.localStorage`.
///
/// Outside the browser build every read returns `None` and writes are no-ops.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

#[cfg(feature = "csr")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Warning for a localStorage write that did not happen. `outcome` is `None`
/// when storage is unavailable.
#[cfg_attr(not(feature = "csr"), allow(dead_code))]
fn write_failure<E>(action: &str, outcome: Option<Result<(), E>>) -> Option<String> {
    match outcome {
        None => Some(format!("localStorage unavailable; session token not {action}")),
        Some(Err(_)) => Some(format!("localStorage rejected the write; session token not {action}")),
        Some(Ok(())) => None,
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn set(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            let outcome = local_storage().map(|storage| storage.set_item(TOKEN_STORAGE_KEY, token));
            if let Some(warning) = write_failure("persisted", outcome) {
                log::warn!("{warning}");
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn get(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.get_item(TOKEN_STORAGE_KEY).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            let outcome = local_storage().map(|storage| storage.remove_item(TOKEN_STORAGE_KEY));
            if let Some(warning) = write_failure("cleared", outcome) {
                log::warn!("{warning}");
            }
        }
    }
}
