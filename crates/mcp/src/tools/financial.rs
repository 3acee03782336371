// Financial ratio tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::format::render;
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use vnstock_sdk::VnstockClient;

/// Tool to get financial ratios for a symbol
pub struct FinancialRatiosTool {
    client: VnstockClient,
}

impl FinancialRatiosTool {
    pub fn new(client: VnstockClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct FinancialRatiosArgs {
    symbol: String,
}

#[async_trait::async_trait]
impl Tool for FinancialRatiosTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_financial_ratios".to_string(),
            description: "Get financial ratios for a symbol.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "symbol": json_schema_string("Stock symbol (e.g., 'VNM')")
                }),
                vec!["symbol"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: FinancialRatiosArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_financial_ratios")?;

        let result = {
            let symbol = args.symbol.clone();
            self.client
                .with_session(move |stock| {
                    Box::pin(async move { stock.financial_ratios(&symbol).await })
                })
                .await
        };

        Ok(render(
            result,
            &format!("Financial Ratios for {}", args.symbol),
            &format!("fetching financial ratios for {}", args.symbol),
        ))
    }
}
