//! HTTP transport layer for the Vnstock SDK.
//!
//! [`HttpTransport`] owns the connection handle and the bearer token for one
//! session. The handle exists only between [`HttpTransport::open`] and
//! [`HttpTransport::close`]; dropping the transport releases it as well.

use crate::config::{ClientConfig, TokenPolicy};
use crate::error::{VnstockError, VnstockResult};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

/// Login endpoint, relative to the base URL.
pub const LOGIN_ENDPOINT: &str = "/auth/login";

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// HTTP transport for making API requests within one session.
pub struct HttpTransport {
    config: Arc<ClientConfig>,
    client: Option<Client>,
    token: Option<String>,
}

impl HttpTransport {
    /// Create an unopened transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            config,
            client: None,
            token: None,
        }
    }

    /// Configuration this transport was created with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether the connection handle is currently held.
    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    /// Whether a bearer token was obtained by `login()`.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Allocate the connection handle and log in if credentials are set.
    ///
    /// If the login exchange fails the handle is released before the error
    /// is returned. Opening an open transport does nothing.
    pub async fn open(&mut self) -> VnstockResult<()> {
        if self.client.is_some() {
            return Ok(());
        }

        let client = Client::builder().timeout(self.config.timeout).build()?;
        self.client = Some(client);
        debug!(base_url = %self.config.base_url, "Opened HTTP transport");

        if self.config.has_credentials() {
            if let Err(e) = self.login().await {
                self.close();
                return Err(e);
            }
        }

        Ok(())
    }

    /// Exchange the configured credentials for a bearer token.
    pub async fn login(&mut self) -> VnstockResult<()> {
        let client = self.client.as_ref().ok_or(VnstockError::ClientNotOpen)?;
        let (Some(username), Some(password)) = (
            self.config.username.as_deref(),
            self.config.password.as_deref(),
        ) else {
            return Err(VnstockError::Config(
                "login requires both username and password".to_string(),
            ));
        };

        let url = self.build_url(LOGIN_ENDPOINT)?;
        debug!(url = %url, "POST login");

        let response = client
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VnstockError::login_rejected(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| VnstockError::Authentication {
                status: None,
                message: format!("malformed login response: {}", e),
            })?;

        match body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
        {
            Some(token) => {
                self.token = Some(token.to_string());
                info!("Authenticated against Vnstock API");
            }
            None => match self.config.token_policy {
                TokenPolicy::Permissive => {
                    warn!("Login response has no access_token, continuing without bearer token");
                    self.token = None;
                }
                TokenPolicy::Strict => {
                    return Err(VnstockError::Authentication {
                        status: None,
                        message: "login response did not contain an access_token".to_string(),
                    });
                }
            },
        }

        Ok(())
    }

    /// Release the connection handle and forget the token.
    ///
    /// Returns `true` if a handle was actually released.
    pub fn close(&mut self) -> bool {
        self.token = None;
        match self.client.take() {
            Some(_) => {
                debug!("Closed HTTP transport");
                true
            }
            None => false,
        }
    }

    fn client(&self) -> VnstockResult<&Client> {
        self.client.as_ref().ok_or(VnstockError::ClientNotOpen)
    }

    /// Build a URL for the given endpoint, keeping any base path.
    fn build_url(&self, endpoint: &str) -> VnstockResult<Url> {
        let base = self.config.base_url.as_str().trim_end_matches('/');
        let url = if endpoint.starts_with('/') {
            format!("{}{}", base, endpoint)
        } else {
            format!("{}/{}", base, endpoint)
        };
        Ok(Url::parse(&url)?)
    }

    /// Caller headers first, then the session token over any Authorization.
    fn request_headers(&self, headers: Option<&HeaderMap>) -> VnstockResult<HeaderMap> {
        let mut all = headers.cloned().unwrap_or_default();

        if let Some(ref token) = self.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                VnstockError::Authentication {
                    status: None,
                    message: "access token is not a valid header value".to_string(),
                }
            })?;
            value.set_sensitive(true);
            all.insert(header::AUTHORIZATION, value);
        }

        Ok(all)
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> VnstockResult<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), "Request returned error status");
            return Err(VnstockError::Request {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Execute a GET request.
    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> VnstockResult<T> {
        self.get_with_headers(endpoint, None).await
    }

    /// Execute a GET request with extra headers.
    pub async fn get_with_headers<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: Option<&HeaderMap>,
    ) -> VnstockResult<T> {
        let client = self.client()?;
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "GET request");

        let request = client.get(url).headers(self.request_headers(headers)?);
        self.execute(request).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        query: &Q,
    ) -> VnstockResult<T> {
        let client = self.client()?;
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "GET request with query");

        let request = client
            .get(url)
            .query(query)
            .headers(self.request_headers(None)?);
        self.execute(request).await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> VnstockResult<T> {
        self.post_with_headers(endpoint, body, None).await
    }

    /// Execute a POST request with a JSON body and extra headers.
    pub async fn post_with_headers<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
        headers: Option<&HeaderMap>,
    ) -> VnstockResult<T> {
        let client = self.client()?;
        let url = self.build_url(endpoint)?;
        debug!(url = %url, "POST request");

        let request = client
            .post(url)
            .json(body)
            .headers(self.request_headers(headers)?);
        self.execute(request).await
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.config.base_url.as_str())
            .field("open", &self.is_open())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new(Url::parse(base_url).unwrap()))
    }

    fn create_config_with_login(base_url: &str, token_policy: TokenPolicy) -> Arc<ClientConfig> {
        Arc::new(ClientConfig {
            base_url: Url::parse(base_url).unwrap(),
            username: Some("analyst".to_string()),
            password: Some("hunter2".to_string()),
            timeout: Duration::from_secs(5),
            token_policy,
        })
    }

    async fn mount_login(server: &MockServer, response: ResponseTemplate, expected: u64) {
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"username": "analyst", "password": "hunter2"})))
            .respond_with(response)
            .expect(expected)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_get_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["VNM", "FPT"])))
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        let result: Value = transport.get("/api/v1/symbols").await.unwrap();
        assert_eq!(result, json!(["VNM", "FPT"]));
    }

    #[tokio::test]
    async fn test_get_with_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .and(query_param("exchange", "HOSE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["VNM"])))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        let result: Value = transport
            .get_with_query("/api/v1/symbols", &[("exchange", "HOSE")])
            .await
            .unwrap();
        assert_eq!(result, json!(["VNM"]));
    }

    #[tokio::test]
    async fn test_post_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/company/overview"))
            .and(body_json(json!({"symbol": "VNM"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"symbol": "VNM", "industry": "Food"})),
            )
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        let result: Value = transport
            .post("/api/v1/company/overview", &json!({"symbol": "VNM"}))
            .await
            .unwrap();
        assert_eq!(result["industry"], "Food");
    }

    #[tokio::test]
    async fn test_login_attaches_bearer_token() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-123"})),
            1,
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["VNM"])))
            .expect(2)
            .mount(&server)
            .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        transport.open().await.unwrap();
        assert!(transport.has_token());

        let _: Value = transport.get("/api/v1/symbols").await.unwrap();
        let _: Value = transport.get("/api/v1/symbols").await.unwrap();
    }

    #[tokio::test]
    async fn test_no_credentials_skips_login() {
        let server = MockServer::start().await;
        mount_login(&server, ResponseTemplate::new(200), 0).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();
        assert!(!transport.has_token());

        let _: Value = transport.get("/api/v1/symbols").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_login_without_access_token_proceeds_tokenless() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"token_type": "bearer"})),
            1,
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["FPT"])))
            .mount(&server)
            .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        transport.open().await.unwrap();
        assert!(transport.is_open());
        assert!(!transport.has_token());

        let result: Value = transport.get("/api/v1/symbols").await.unwrap();
        assert_eq!(result, json!(["FPT"]));

        let requests = server.received_requests().await.unwrap();
        let data_request = requests
            .iter()
            .find(|r| r.url.path() == "/api/v1/symbols")
            .unwrap();
        assert!(!data_request.headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_empty_access_token_sends_no_authorization() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})),
            1,
        )
        .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["VNM"])))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        transport.open().await.unwrap();
        assert!(!transport.has_token());

        let _: Value = transport.get("/api/v1/symbols").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let data_request = requests
            .iter()
            .find(|r| r.url.path() == "/api/v1/symbols")
            .unwrap();
        assert!(!data_request.headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_empty_token() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"access_token": ""})),
            1,
        )
        .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Strict));
        let err = transport.open().await.unwrap_err();
        assert!(err.is_authentication());
    }

    #[tokio::test]
    async fn test_strict_policy_rejects_missing_token() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({})),
            1,
        )
        .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Strict));
        let err = transport.open().await.unwrap_err();

        assert!(err.is_authentication());
        assert!(!transport.is_open());
    }

    #[tokio::test]
    async fn test_login_failure_releases_handle() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(401).set_body_string("invalid credentials"),
            1,
        )
        .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        let err = transport.open().await.unwrap_err();

        match err {
            VnstockError::Authentication { status, message } => {
                assert_eq!(status, Some(401));
                assert_eq!(message, "invalid credentials");
            }
            other => panic!("Expected Authentication error, got {:?}", other),
        }
        assert!(!transport.is_open());
        assert!(!transport.close());
    }

    #[tokio::test]
    async fn test_malformed_login_response() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_string("<html>oops</html>"),
            1,
        )
        .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        let err = transport.open().await.unwrap_err();

        match err {
            VnstockError::Authentication { status, message } => {
                assert_eq!(status, None);
                assert!(message.contains("malformed login response"));
            }
            other => panic!("Expected Authentication error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_open_twice_logs_in_once() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok"})),
            1,
        )
        .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        transport.open().await.unwrap();
        transport.open().await.unwrap();
        assert!(transport.is_open());
    }

    #[tokio::test]
    async fn test_session_token_overrides_caller_authorization() {
        let server = MockServer::start().await;
        mount_login(
            &server,
            ResponseTemplate::new(200).set_body_json(json!({"access_token": "tok-abc"})),
            1,
        )
        .await;

        Mock::given(method("POST"))
            .and(path("/api/v1/financial/ratios"))
            .and(header("Authorization", "Bearer tok-abc"))
            .and(header("x-request-id", "req-7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pe": 12.5})))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport =
            HttpTransport::new(create_config_with_login(&server.uri(), TokenPolicy::Permissive));
        transport.open().await.unwrap();

        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-7"));
        headers.insert(reqwest::header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));

        let result: Value = transport
            .post_with_headers("/api/v1/financial/ratios", &json!({"symbol": "VNM"}), Some(&headers))
            .await
            .unwrap();
        assert_eq!(result["pe"], 12.5);
    }

    #[tokio::test]
    async fn test_caller_authorization_kept_without_token() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .and(header("Authorization", "Basic Zm9vOmJhcg=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::AUTHORIZATION, HeaderValue::from_static("Basic Zm9vOmJhcg=="));

        let _: Value = transport
            .get_with_headers("/api/v1/symbols", Some(&headers))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_on_non_success_keeps_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/company/news"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        let result: VnstockResult<Value> = transport
            .post("/api/v1/company/news", &json!({"symbol": "VNM"}))
            .await;
        match result {
            Err(VnstockError::Request { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream unavailable");
            }
            other => panic!("Expected Request error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_json_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/symbols"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        let result: VnstockResult<Value> = transport.get("/api/v1/symbols").await;
        assert!(matches!(result, Err(VnstockError::Json(_))));
    }

    #[tokio::test]
    async fn test_requests_rejected_when_not_open() {
        let mut transport = HttpTransport::new(create_config("http://localhost:9"));

        let get: VnstockResult<Value> = transport.get("/api/v1/symbols").await;
        assert!(matches!(get, Err(VnstockError::ClientNotOpen)));

        let post: VnstockResult<Value> = transport.post("/api/v1/trading/stats", &json!({})).await;
        assert!(matches!(post, Err(VnstockError::ClientNotOpen)));

        assert!(matches!(
            transport.login().await,
            Err(VnstockError::ClientNotOpen)
        ));
    }

    #[tokio::test]
    async fn test_requests_rejected_after_close() {
        let server = MockServer::start().await;
        let mut transport = HttpTransport::new(create_config(&server.uri()));
        transport.open().await.unwrap();

        assert!(transport.close());
        assert!(!transport.close());

        let get: VnstockResult<Value> = transport.get("/api/v1/symbols").await;
        assert!(matches!(get, Err(VnstockError::ClientNotOpen)));
    }

    #[test]
    fn test_build_url() {
        let transport = HttpTransport::new(create_config("http://localhost:8002"));

        let url = transport.build_url("/api/v1/symbols").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8002/api/v1/symbols");
    }

    #[test]
    fn test_build_url_keeps_base_path() {
        let transport = HttpTransport::new(create_config("http://localhost:8002/vnstock/"));

        let url = transport.build_url("/auth/login").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8002/vnstock/auth/login");

        let url = transport.build_url("api/v1/symbols").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8002/vnstock/api/v1/symbols");
    }

    #[test]
    fn test_debug_redacts_token() {
        let mut transport = HttpTransport::new(create_config("http://localhost:8002"));
        transport.token = Some("secret-token".to_string());

        let debug = format!("{:?}", transport);
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("<redacted>"));
    }
}
