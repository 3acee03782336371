//! Main client for the Vnstock SDK.

use crate::api::StockApi;
use crate::config::{env_credential, ClientConfig, TokenPolicy, PASSWORD_ENV, USERNAME_ENV};
use crate::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{VnstockError, VnstockResult};
use crate::session::Session;
use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Entry point for the Vnstock API.
///
/// The client only holds configuration. Every call to [`VnstockClient::session`]
/// or [`VnstockClient::with_session`] opens a fresh, independent session with
/// its own connection and token; nothing is pooled or shared between them.
#[derive(Debug, Clone)]
pub struct VnstockClient {
    config: Arc<ClientConfig>,
}

impl VnstockClient {
    /// Create a new client builder.
    pub fn builder() -> VnstockClientBuilder {
        VnstockClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Default configuration with credentials from the environment.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open a new session, logging in if credentials are configured.
    pub async fn session(&self) -> VnstockResult<Session> {
        let mut session = Session::new(self.config.clone());
        session.open().await?;
        Ok(session)
    }

    /// Run `f` against the stock API of a fresh session.
    ///
    /// The session is closed whether `f` succeeds or fails. If the returned
    /// future is dropped early, dropping the session releases the transport.
    ///
    /// ```rust,no_run
    /// # async fn example() -> vnstock_sdk::VnstockResult<()> {
    /// let client = vnstock_sdk::VnstockClient::from_env();
    /// let overview = client
    ///     .with_session(|stock| Box::pin(async move { stock.company_overview("VNM").await }))
    ///     .await?;
    /// println!("{}", overview);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn with_session<T, F>(&self, f: F) -> VnstockResult<T>
    where
        F: for<'a> FnOnce(StockApi<'a>) -> BoxFuture<'a, VnstockResult<T>>,
    {
        let mut session = self.session().await?;
        let result = match session.stock() {
            Ok(stock) => f(stock).await,
            Err(e) => Err(e),
        };
        session.close();
        result
    }
}

/// Builder for creating a VnstockClient.
pub struct VnstockClientBuilder {
    base_url: String,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
    token_policy: TokenPolicy,
}

impl VnstockClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            token_policy: TokenPolicy::default(),
        }
    }

    /// Set the base URL of the Vnstock API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the login username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the login password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set both login credentials.
    pub fn credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username(username).password(password)
    }

    /// Take credentials from `VNSTOCK_USERNAME` / `VNSTOCK_PASSWORD`.
    pub fn credentials_from_env(mut self) -> Self {
        self.username = env_credential(USERNAME_ENV);
        self.password = env_credential(PASSWORD_ENV);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how a login response without `access_token` is handled.
    pub fn token_policy(mut self, policy: TokenPolicy) -> Self {
        self.token_policy = policy;
        self
    }

    /// Build the client.
    pub fn build(self) -> VnstockResult<VnstockClient> {
        if self.base_url.trim().is_empty() {
            return Err(VnstockError::Config("base_url is required".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(VnstockError::Config("timeout must be positive".to_string()));
        }

        let base_url = Url::parse(self.base_url.trim())?;

        let config = ClientConfig {
            base_url,
            username: self.username,
            password: self.password,
            timeout: self.timeout,
            token_policy: self.token_policy,
        };

        Ok(VnstockClient::new(config))
    }
}

impl Default for VnstockClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
