// Trading data tools: price history and trading statistics

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::format::render;
use crate::tools::{json_schema_object, json_schema_string, json_schema_string_with_default, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use vnstock_sdk::{VnstockClient, DEFAULT_INTERVAL};

/// Tool to fetch OHLCV price history
pub struct PriceHistoryTool {
    client: VnstockClient,
}

impl PriceHistoryTool {
    pub fn new(client: VnstockClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct PriceHistoryArgs {
    symbol: String,
    start_date: String,
    end_date: String,
    #[serde(default = "default_interval")]
    interval: String,
}

fn default_interval() -> String {
    DEFAULT_INTERVAL.to_string()
}

#[async_trait::async_trait]
impl Tool for PriceHistoryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_price_history".to_string(),
            description: "Get price history for a symbol.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("Stock symbol (e.g., 'VNM')"),
                    "start_date": json_schema_string("Start date in YYYY-MM-DD format"),
                    "end_date": json_schema_string("End date in YYYY-MM-DD format"),
                    "interval": json_schema_string_with_default("Time interval ('D', 'W', 'M')", DEFAULT_INTERVAL)
                }),
                vec!["symbol", "start_date", "end_date"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: PriceHistoryArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_price_history")?;

        let result = {
            let (symbol, start, end, interval) = (
                args.symbol.clone(),
                args.start_date.clone(),
                args.end_date.clone(),
                args.interval.clone(),
            );
            self.client
                .with_session(move |stock| {
                    Box::pin(async move {
                        stock.price_history(&symbol, &start, &end, &interval).await
                    })
                })
                .await
        };

        Ok(render(
            result,
            &format!(
                "Price history for {} from {} to {}",
                args.symbol, args.start_date, args.end_date
            ),
            &format!("fetching price history for {}", args.symbol),
        ))
    }
}

/// Tool to fetch trading statistics
pub struct TradingStatsTool {
    client: VnstockClient,
}

impl TradingStatsTool {
    pub fn new(client: VnstockClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct TradingStatsArgs {
    symbol: String,
    start_date: String,
    end_date: String,
}

#[async_trait::async_trait]
impl Tool for TradingStatsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_trading_stats".to_string(),
            description: "Get trading statistics for a symbol.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("Stock symbol (e.g., 'VNM')"),
                    "start_date": json_schema_string("Start date in YYYY-MM-DD format"),
                    "end_date": json_schema_string("End date in YYYY-MM-DD format")
                }),
                vec!["symbol", "start_date", "end_date"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: TradingStatsArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_trading_stats")?;

        let result = {
            let (symbol, start, end) = (
                args.symbol.clone(),
                args.start_date.clone(),
                args.end_date.clone(),
            );
            self.client
                .with_session(move |stock| {
                    Box::pin(async move { stock.trading_stats(&symbol, &start, &end).await })
                })
                .await
        };

        Ok(render(
            result,
            &format!("Trading stats for {}", args.symbol),
            &format!("fetching trading stats for {}", args.symbol),
        ))
    }
}
