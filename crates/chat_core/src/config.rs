//! Environment-backed configuration

use std::env;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// Application configuration, read once at startup and passed explicitly
/// into the pipeline constructors.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Gemini API key. `None` is not a startup error; the first external
    /// call reports it as a configuration failure.
    pub api_key: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment. An unset or
    /// blank key is treated as absent.
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        Self { api_key }
    }
}
