//! API origin configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Origin the API listens on when nothing overrides it.
pub const DEFAULT_API_URL: &str = "http://localhost:8081";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    /// Build config for `base_url`, trimming trailing slashes.
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned() }
    }

    /// Config baked in at compile time from `VENTUREDESK_API_URL`.
    ///
    /// Browser bundles have no process environment, so the origin is fixed
    /// when the WASM is built. Falls back to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(option_env!("VENTUREDESK_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// Absolute URL for an API path such as `/companies/5`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
