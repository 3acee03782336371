//! Error types for the Vnstock SDK.

/// Result type for SDK operations.
pub type VnstockResult<T> = Result<T, VnstockError>;

/// Error types that can occur when talking to the Vnstock API.
#[derive(Debug, thiserror::Error)]
pub enum VnstockError {
    /// Login exchange was rejected or returned something unusable.
    #[error("Authentication failed{}: {message}", status_suffix(.status))]
    Authentication {
        status: Option<u16>,
        message: String,
    },

    /// Upstream answered a data request with a non-success status.
    #[error("Request failed (status {status}): {body}")]
    Request { status: u16, body: String },

    /// Transport used before `open()` or after `close()`.
    #[error("Client is not open; call open() before issuing requests")]
    ClientNotOpen,

    /// Session accessed before it was opened or after it was closed.
    #[error("Session is not open")]
    NotOpen,

    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

fn status_suffix(status: &Option<u16>) -> String {
    match status {
        Some(status) => format!(" (status {})", status),
        None => String::new(),
    }
}

impl VnstockError {
    /// Build an authentication error from a rejected login response.
    pub(crate) fn login_rejected(status: u16, body: &str) -> Self {
        Self::Authentication {
            status: Some(status),
            message: if body.is_empty() {
                "login rejected".to_string()
            } else {
                body.to_string()
            },
        }
    }

    /// True for failures of the login exchange.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// True when the transport or session was used outside its scope.
    pub fn is_not_open(&self) -> bool {
        matches!(self, Self::ClientNotOpen | Self::NotOpen)
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } => *status,
            Self::Request { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
