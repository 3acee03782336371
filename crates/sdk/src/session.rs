//! Scoped sessions pairing one transport with one unit of work.

use crate::api::StockApi;
use crate::config::ClientConfig;
use crate::error::{VnstockError, VnstockResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use tracing::debug;

/// One authenticated session against the Vnstock API.
///
/// A session owns exactly one [`HttpTransport`]. Services handed out by
/// [`Session::stock`] borrow it, so they cannot outlive the session. The
/// transport is released by [`Session::close`] or, failing that, when the
/// session is dropped (which also covers a cancelled future).
#[derive(Debug)]
pub struct Session {
    transport: HttpTransport,
}

impl Session {
    /// Create a session that is not yet open.
    pub fn new(config: Arc<ClientConfig>) -> Self {
        Self {
            transport: HttpTransport::new(config),
        }
    }

    /// Open the transport, logging in if credentials are configured.
    pub async fn open(&mut self) -> VnstockResult<()> {
        self.transport.open().await
    }

    /// Whether the session still holds an open transport.
    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Get the stock API for this session.
    pub fn stock(&self) -> VnstockResult<StockApi<'_>> {
        if !self.transport.is_open() {
            return Err(VnstockError::NotOpen);
        }
        Ok(StockApi::new(&self.transport))
    }

    /// Release the transport. Returns `true` if it was still open.
    pub fn close(&mut self) -> bool {
        self.transport.close()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.transport.close() {
            debug!("Session dropped while open, transport released");
        }
    }
}
