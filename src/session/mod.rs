//! Client-side session handling.
//!
//! SYSTEM CONTEXT
//! ==============
//! `token_store` owns the single persisted bearer-token slot and `claims`
//! reads identity out of it. Neither validates signatures or expiry: the
//! server re-checks every protected request.

pub mod claims;
pub mod token_store;

pub use claims::{Claims, DecodeError, Session, decode_token};
pub use token_store::{LocalStorageTokenStore, MemoryTokenStore, TOKEN_STORAGE_KEY, TokenStore};
