//! Networking modules for the REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the seam to the HTTP stack, `client` attaches credentials
//! and interprets responses, `resource` is the generic CRUD wrapper, and
//! `resources` configures it for each server resource. `auth` covers login,
//! signup and logout; `types` holds the DTOs.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod resource;
pub mod resources;
pub mod transport;
pub mod types;

pub use client::{Access, ApiClient};
pub use config::ApiConfig;
pub use error::ApiError;
pub use resource::{ResourceClient, ResourceSpec};
pub use resources::ApiServices;
pub use transport::{ApiRequest, BrowserTransport, Method, RawResponse, Transport};
