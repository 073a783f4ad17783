//! API credential lookup.
//!
//! The key is read once at startup and never validated up front. A missing
//! key only surfaces when a request is attempted.

use std::fmt;

/// Environment variables checked for the credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// The generation service credential. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Read the credential from the process environment.
pub fn api_key_from_env() -> Option<ApiKey> {
    api_key_from(|name| std::env::var(name).ok())
}

/// Resolve the credential through `lookup`. Blank values are skipped.
pub fn api_key_from(lookup: impl Fn(&str) -> Option<String>) -> Option<ApiKey> {
    API_KEY_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(ApiKey)
}
