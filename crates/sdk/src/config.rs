//! Configuration types for the Vnstock SDK.

use std::time::Duration;
use url::Url;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://72.60.233.159:8002";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Environment variable holding the login username.
pub const USERNAME_ENV: &str = "VNSTOCK_USERNAME";

/// Environment variable holding the login password.
pub const PASSWORD_ENV: &str = "VNSTOCK_PASSWORD";

/// What to do when a successful login response carries no `access_token`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenPolicy {
    /// Continue the session without a bearer token.
    #[default]
    Permissive,
    /// Treat the missing token as an authentication failure.
    Strict,
}

/// Configuration for the Vnstock client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Vnstock API.
    pub base_url: Url,
    /// Login username.
    pub username: Option<String>,
    /// Login password.
    pub password: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Handling of login responses without a token.
    pub token_policy: TokenPolicy,
}

impl ClientConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            token_policy: TokenPolicy::default(),
        }
    }

    /// Default configuration with credentials taken from the environment.
    pub fn from_env() -> Self {
        Self {
            username: env_credential(USERNAME_ENV),
            password: env_credential(PASSWORD_ENV),
            ..Self::default()
        }
    }

    /// Whether a login exchange should happen when a session opens.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        // DEFAULT_BASE_URL is a literal that always parses
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"))
    }
}

/// Read a credential, treating empty values as unset.
pub(crate) fn env_credential(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_new() {
        let url = Url::parse("https://example.com").unwrap();
        let config = ClientConfig::new(url.clone());

        assert_eq!(config.base_url, url);
        assert!(config.username.is_none());
        assert!(config.password.is_none());
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::default();

        assert_eq!(config.base_url.as_str(), "http://72.60.233.159:8002/");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.token_policy, TokenPolicy::Permissive);
    }

    #[test]
    fn test_has_credentials_requires_both() {
        let mut config = ClientConfig::default();
        assert!(!config.has_credentials());

        config.username = Some("analyst".to_string());
        assert!(!config.has_credentials());

        config.password = Some("secret".to_string());
        assert!(config.has_credentials());

        config.username = None;
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_env_credential_ignores_missing() {
        assert!(env_credential("VNSTOCK_SDK_TEST_SURELY_UNSET_VAR").is_none());
    }
}
