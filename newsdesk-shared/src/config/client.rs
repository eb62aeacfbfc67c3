use serde::{Deserialize, Serialize};
use url::Url;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Environment variable naming the backend API base URL.
pub const API_URL_ENV: &str = "NEWSDESK_API_URL";

/// Errors raised while resolving client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration file: {0}")]
    Parse(String),
    #[error("unsupported configuration format; use 'yaml' or 'json'")]
    UnsupportedFormat,
    #[error("invalid API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Client-side configuration for reaching the newsroom backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to, e.g. `https://news.example.com/api`.
    pub api_url: Url,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    ///
    /// # Panics
    /// Never; [`DEFAULT_API_URL`] is a valid URL.
    pub fn with_defaults() -> Self {
        Self {
            api_url: Url::parse(DEFAULT_API_URL).expect("default API URL is valid"),
        }
    }

    /// Builds a configuration from a URL string, validating the scheme.
    pub fn from_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(raw)?,
        })
    }

    /// Configuration baked in at compile time, used by the browser build where
    /// there is no process environment. Falls back to [`DEFAULT_API_URL`].
    pub fn from_build_env() -> Self {
        option_env!("NEWSDESK_API_URL")
            .and_then(|raw| match Self::from_url(raw) {
                Ok(config) => Some(config),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring invalid compile-time API URL");
                    None
                }
            })
            .unwrap_or_default()
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Later sources win: defaults, then the optional YAML/JSON file, then
    /// `NEWSDESK_API_URL`, then `url_override`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_config(
        config_path: Option<&std::path::Path>,
        url_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::with_defaults();

        if let Some(path) = config_path {
            let content = std::fs::read_to_string(path)?;
            config = match path.extension().and_then(|ext| ext.to_str()) {
                Some("yaml" | "yml") => {
                    serde_yml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?
                }
                Some("json") => serde_json::from_str(&content)
                    .map_err(|err| ConfigError::Parse(err.to_string()))?,
                _ => return Err(ConfigError::UnsupportedFormat),
            };
            validate_scheme(&config.api_url)?;
        }

        if let Ok(raw) = std::env::var(API_URL_ENV)
            && !raw.trim().is_empty()
        {
            config.api_url = parse_api_url(raw.trim())?;
        }

        if let Some(raw) = url_override {
            config.api_url = parse_api_url(raw)?;
        }

        tracing::debug!(api_url = %config.api_url, "resolved client configuration");
        Ok(config)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.as_str().trim_end_matches('/')
    }

    /// Absolute URL for an endpoint path such as `/articles?limit=5`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url(), path.trim_start_matches('/'))
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    validate_scheme(&url)?;
    Ok(url)
}

fn validate_scheme(url: &Url) -> Result<(), ConfigError> {
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn cleanup_env_vars() {
        unsafe {
            std::env::remove_var(API_URL_ENV);
        }
    }

    #[test]
    fn test_config_with_defaults() {
        let config = ClientConfig::with_defaults();
        assert_eq!(config.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn test_endpoint_joins_single_slash() {
        let config = ClientConfig::from_url("https://news.example.com/api/").unwrap();
        assert_eq!(
            config.endpoint("/auth/login"),
            "https://news.example.com/api/auth/login"
        );
        assert_eq!(
            config.endpoint("articles?limit=5"),
            "https://news.example.com/api/articles?limit=5"
        );
    }

    #[test]
    fn test_endpoint_for_bare_host() {
        let config = ClientConfig::from_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(config.endpoint("/auth/profile"), "http://127.0.0.1:9000/auth/profile");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert!(matches!(
            ClientConfig::from_url("ftp://example.com/api"),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(ClientConfig::from_url("not a url").is_err());
    }

    #[test]
    #[serial]
    fn test_load_config_defaults() {
        cleanup_env_vars();
        let config = ClientConfig::load_config(None, None).unwrap();
        assert_eq!(config, ClientConfig::with_defaults());
    }

    #[test]
    #[serial]
    fn test_load_config_from_yaml_file() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let dir = TempDir::new()?;
        let path = dir.path().join("newsdesk.yaml");
        fs::write(&path, "api_url: https://yaml.example.com/api\n")?;

        let config = ClientConfig::load_config(Some(&path), None)?;
        assert_eq!(config.base_url(), "https://yaml.example.com/api");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_from_json_file() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let dir = TempDir::new()?;
        let path = dir.path().join("newsdesk.json");
        fs::write(&path, r#"{"api_url": "https://json.example.com/api"}"#)?;

        let config = ClientConfig::load_config(Some(&path), None)?;
        assert_eq!(config.base_url(), "https://json.example.com/api");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_config_unsupported_format() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("newsdesk.toml");
        fs::write(&path, "api_url = 'x'").unwrap();

        assert!(matches!(
            ClientConfig::load_config(Some(&path), None),
            Err(ConfigError::UnsupportedFormat)
        ));
    }

    #[test]
    #[serial]
    fn test_load_config_malformed_json() {
        cleanup_env_vars();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("newsdesk.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            ClientConfig::load_config(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    #[serial]
    fn test_load_config_nonexistent_file() {
        cleanup_env_vars();
        let result = ClientConfig::load_config(Some(std::path::Path::new("/nonexistent.yaml")), None);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file_and_override_wins() -> Result<(), Box<dyn std::error::Error>> {
        cleanup_env_vars();
        let dir = TempDir::new()?;
        let path = dir.path().join("newsdesk.yaml");
        fs::write(&path, "api_url: https://file.example.com/api\n")?;

        unsafe {
            std::env::set_var(API_URL_ENV, "https://env.example.com/api");
        }
        let config = ClientConfig::load_config(Some(&path), None)?;
        assert_eq!(config.base_url(), "https://env.example.com/api");

        let config = ClientConfig::load_config(Some(&path), Some("http://cli.example.com/api"))?;
        assert_eq!(config.base_url(), "http://cli.example.com/api");

        cleanup_env_vars();
        Ok(())
    }

    #[test]
    #[serial]
    fn test_invalid_environment_url() {
        unsafe {
            std::env::set_var(API_URL_ENV, "mailto:desk@example.com");
        }
        let result = ClientConfig::load_config(None, None);
        cleanup_env_vars();
        assert!(matches!(result, Err(ConfigError::InvalidUrl { .. })));
    }
}
