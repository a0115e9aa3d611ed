use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[cfg(not(target_arch = "wasm32"))]
use std::{env, fs, path::Path};

/// Base URL of the hosted demo directory.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Public key the hosted demo expects on every request.
pub const DEFAULT_API_KEY: &str = "reqres-free-v1";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Errors raised while resolving a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration file: {0}")]
    Parse(String),

    #[error("unsupported configuration format '{0}'. Use 'toml' or 'json'.")]
    UnsupportedFormat(String),

    #[error("invalid {name} value '{value}': {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Connection settings for the remote user directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to.
    pub base_url: Url,

    /// Value for the `x-api-key` header, omitted when `None`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Log filter used by front ends that install a subscriber.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates the configuration pointing at the hosted demo API.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is an absolute URL"),
            api_key: Some(DEFAULT_API_KEY.to_string()),
            log_level: default_log_level(),
        }
    }

    /// Builds a configuration for `base_url`, keeping the other defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] when `base_url` is not an absolute URL.
    pub fn for_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::with_defaults()
        })
    }

    /// Joins `path` onto the base URL without dropping the base's last segment.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Loads the configuration from an optional file, then applies
    /// `DASHSYNC_*` environment overrides.
    ///
    /// # Arguments
    /// * `config_path` - Optional path to a `.toml` or `.json` file.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, or
    /// when an override holds an invalid value.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        if let Ok(base_url) = env::var("DASHSYNC_API_BASE_URL") {
            config.base_url = parse_base_url(&base_url)?;
        }
        if let Ok(api_key) = env::var("DASHSYNC_API_KEY") {
            config.api_key = Some(api_key).filter(|key| !key.is_empty());
        }
        if let Ok(log_level) = env::var("DASHSYNC_LOG_LEVEL") {
            config.log_level = log_level;
        }

        Ok(config)
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => {
                toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or_default().to_string(),
            )),
        }
    }

    /// Renders this configuration in the requested file format.
    ///
    /// # Errors
    /// Returns [`ConfigError::UnsupportedFormat`] for anything other than
    /// `toml` or `json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn render(&self, format: &str) -> Result<String, ConfigError> {
        match format {
            "toml" => toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string())),
            "json" => {
                serde_json::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))
            }
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|err| ConfigError::InvalidValue {
        name: "base_url",
        value: value.to_string(),
        reason: err.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            name: "base_url",
            value: value.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            std::env::remove_var("DASHSYNC_API_BASE_URL");
            std::env::remove_var("DASHSYNC_API_KEY");
            std::env::remove_var("DASHSYNC_LOG_LEVEL");
        }
    }

    #[test]
    fn test_config_with_defaults() {
        let config = ClientConfig::with_defaults();

        assert_eq!(config.base_url.as_str(), "https://reqres.in/api");
        assert_eq!(config.api_key.as_deref(), Some("reqres-free-v1"));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let config = ClientConfig::with_defaults();
        assert_eq!(config.endpoint("users"), "https://reqres.in/api/users");
        assert_eq!(config.endpoint("/login"), "https://reqres.in/api/login");

        let config = ClientConfig::for_base_url("http://127.0.0.1:9000/api/").unwrap();
        assert_eq!(config.endpoint("users/2"), "http://127.0.0.1:9000/api/users/2");
    }

    #[test]
    fn test_for_base_url_rejects_garbage() {
        let result = ClientConfig::for_base_url("not a url");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { name: "base_url", .. })
        ));
    }

    #[test]
    #[serial]
    fn test_load_config_with_defaults() {
        cleanup_env_vars();
        let config = ClientConfig::load(None).unwrap();
        assert_eq!(config, ClientConfig::with_defaults());
    }

    #[test]
    #[serial]
    fn test_load_config_with_environment_variables() {
        cleanup_env_vars();
        unsafe {
            std::env::set_var("DASHSYNC_API_BASE_URL", "http://localhost:4000/api");
            std::env::set_var("DASHSYNC_API_KEY", "");
            std::env::set_var("DASHSYNC_LOG_LEVEL", "debug");
        }

        let config = ClientConfig::load(None).unwrap();

        assert_eq!(config.base_url.as_str(), "http://localhost:4000/api");
        assert_eq!(config.api_key, None);
        assert_eq!(config.log_level, "debug");

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_load_config_from_toml_file() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("dashsync.toml");
        std::fs::write(
            &path,
            "base_url = \"http://directory.local/api\"\napi_key = \"secret\"\n",
        )?;

        let config = ClientConfig::load(Some(&path))?;

        assert_eq!(config.base_url.as_str(), "http://directory.local/api");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.log_level, "warn");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_from_json_file() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("dashsync.json");
        std::fs::write(
            &path,
            r#"{"base_url": "http://directory.local/api", "log_level": "info"}"#,
        )?;

        let config = ClientConfig::load(Some(&path))?;

        assert_eq!(config.api_key, None);
        assert_eq!(config.log_level, "info");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_rejects_unknown_extension() {
        cleanup_env_vars();
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dashsync.ini");
        std::fs::write(&path, "base_url=x").unwrap();

        let result = ClientConfig::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(ext)) if ext == "ini"));
    }

    #[test]
    fn test_render_supported_formats() {
        let config = ClientConfig::with_defaults();
        let rendered = config.render("toml").unwrap();
        assert!(rendered.contains("base_url = \"https://reqres.in/api\""));
        assert!(config.render("yaml").is_err());
    }
}
