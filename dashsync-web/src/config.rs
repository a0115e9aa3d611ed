//! Frontend configuration module
//!
//! Connection settings are baked in at compile time so the bundle can be
//! served from any static host.

use shared::config::ClientConfig;
use shared::config::client::{DEFAULT_API_KEY, DEFAULT_BASE_URL};

/// Frontend configuration for the directory service
#[derive(Debug, Clone)]
pub struct FrontendConfig {
    /// Base URL of the directory API
    pub api_base_url: String,
    /// Value for the `x-api-key` header; empty disables it
    pub api_key: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("DASHSYNC_API_BASE_URL")
                .unwrap_or(DEFAULT_BASE_URL)
                .to_string(),
            api_key: option_env!("DASHSYNC_API_KEY")
                .unwrap_or(DEFAULT_API_KEY)
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the shared client configuration, falling back to the hosted
    /// defaults if the baked-in base URL does not parse.
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::for_base_url(&self.api_base_url).unwrap_or_else(|err| {
            web_sys::console::error_1(&format!("{err}; using {DEFAULT_BASE_URL}").into());
            ClientConfig::with_defaults()
        });
        config.api_key = Some(self.api_key.clone()).filter(|key| !key.is_empty());
        config
    }
}
