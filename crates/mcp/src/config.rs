// Server configuration: optional TOML file plus environment credentials

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use vnstock_sdk::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use vnstock_sdk::{TokenPolicy, VnstockClient};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fail the session when login returns no access_token.
    #[serde(default)]
    pub strict_token: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            strict_token: false,
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        // Load config file if it exists, otherwise use defaults
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .context("Failed to read configuration file")?;
            toml::from_str(&content).context("Failed to parse configuration file")
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn token_policy(&self) -> TokenPolicy {
        if self.api.strict_token {
            TokenPolicy::Strict
        } else {
            TokenPolicy::Permissive
        }
    }

    /// Build the API client; credentials come from the environment.
    pub fn build_client(&self) -> Result<VnstockClient> {
        VnstockClient::builder()
            .base_url(&self.api.base_url)
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .token_policy(self.token_policy())
            .credentials_from_env()
            .build()
            .context("Invalid Vnstock API configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.token_policy(), TokenPolicy::Permissive);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://localhost:8002\"\nstrict_token = true").unwrap();

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8002");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.token_policy(), TokenPolicy::Strict);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();

        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration file"));
    }

    #[test]
    fn test_build_client() {
        let mut config = ServerConfig::default();
        config.api.base_url = "http://localhost:8002/vnstock".to_string();
        config.api.timeout_secs = 10;

        let client = config.build_client().unwrap();
        assert_eq!(client.config().base_url.as_str(), "http://localhost:8002/vnstock");
        assert_eq!(client.config().timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_build_client_rejects_zero_timeout() {
        let mut config = ServerConfig::default();
        config.api.timeout_secs = 0;

        assert!(config.build_client().is_err());
    }
}
