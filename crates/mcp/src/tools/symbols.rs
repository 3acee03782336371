// Symbol listing tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::format::render;
use crate::tools::{json_schema_object, Tool};
use anyhow::Result;
use vnstock_sdk::VnstockClient;

/// Tool to list every symbol the API knows about
pub struct GetSymbolsTool {
    client: VnstockClient,
}

impl GetSymbolsTool {
    pub fn new(client: VnstockClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for GetSymbolsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_symbols".to_string(),
            description: "Get list of available stock symbols.".to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        let result = self
            .client
            .with_session(|stock| Box::pin(async move { stock.symbols().await }))
            .await;

        Ok(render(result, "Available symbols", "fetching symbols"))
    }
}
