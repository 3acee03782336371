//! Basic SDK usage example.
//!
//! This example demonstrates how to open a session against the Vnstock API
//! and fetch a few datasets for one symbol.
//!
//! Run with: cargo run --example basic_usage

use vnstock_sdk::{VnstockClient, VnstockResult, DEFAULT_INTERVAL};
use std::time::Duration;

#[tokio::main]
async fn main() -> VnstockResult<()> {
    // Initialize tracing for debug output
    tracing_subscriber::fmt::init();

    // Build the client; credentials are optional
    let client = VnstockClient::builder()
        .base_url("http://localhost:8002")
        .credentials_from_env()
        .timeout(Duration::from_secs(30))
        .build()?;

    // Explicit session: open, use, close
    println!("Listing symbols...");
    let mut session = client.session().await?;
    let symbols = session.stock()?.symbols().await;
    session.close();
    println!("Symbols: {}", symbols?);

    // Scoped helper: the session is closed on every exit path
    println!("\nFetching price history for VNM...");
    let history = client
        .with_session(|stock| {
            Box::pin(async move {
                stock
                    .price_history("VNM", "2023-01-01", "2023-12-31", DEFAULT_INTERVAL)
                    .await
            })
        })
        .await?;

    match history.as_array() {
        Some(rows) => {
            println!("Found {} rows", rows.len());
            for row in rows.iter().take(5) {
                println!("  {}", row);
            }
        }
        None => println!("{}", history),
    }

    Ok(())
}
