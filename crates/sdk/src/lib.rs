//! # Vnstock SDK
//!
//! Rust client for the Vnstock stock market data API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vnstock_sdk::{VnstockClient, VnstockResult};
//!
//! #[tokio::main]
//! async fn main() -> VnstockResult<()> {
//!     // Build client
//!     let client = VnstockClient::builder()
//!         .base_url("http://localhost:8002")
//!         .credentials("analyst", "secret")
//!         .build()?;
//!
//!     // One session per unit of work
//!     let mut session = client.session().await?;
//!     let symbols = session.stock()?.symbols().await?;
//!     println!("Symbols: {}", symbols);
//!     session.close();
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod transport;

// Re-export main client
pub use api::{StockApi, DEFAULT_INTERVAL};
pub use client::{VnstockClient, VnstockClientBuilder};
pub use config::{ClientConfig, TokenPolicy};
pub use error::{VnstockError, VnstockResult};
pub use session::Session;
pub use transport::HttpTransport;
