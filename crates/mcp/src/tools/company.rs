// Company information tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::format::render;
use crate::tools::{json_schema_object, json_schema_string, Tool};
use anyhow::{Context, Result};
use serde::Deserialize;
use vnstock_sdk::VnstockClient;

#[derive(Debug, Deserialize)]
struct SymbolArgs {
    symbol: String,
}

fn symbol_schema() -> serde_json::Value {
    json_schema_object(
        serde_json::json!({
            "symbol": json_schema_string("Stock symbol (e.g., 'VNM')")
        }),
        vec!["symbol"],
    )
}

/// Tool to get a company overview
pub struct CompanyOverviewTool {
    client: VnstockClient,
}

impl CompanyOverviewTool {
    pub fn new(client: VnstockClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CompanyOverviewTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_company_overview".to_string(),
            description: "Get overview for a specific company symbol.".to_string(),
            input_schema: symbol_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SymbolArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_company_overview")?;
        let symbol = args.symbol;

        let result = {
            let symbol = symbol.clone();
            self.client
                .with_session(move |stock| {
                    Box::pin(async move { stock.company_overview(&symbol).await })
                })
                .await
        };

        Ok(render(
            result,
            &format!("Company Overview for {}", symbol),
            &format!("fetching overview for {}", symbol),
        ))
    }
}

/// Tool to get recent company news
pub struct CompanyNewsTool {
    client: VnstockClient,
}

impl CompanyNewsTool {
    pub fn new(client: VnstockClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for CompanyNewsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get_company_news".to_string(),
            description: "Get news for a specific company symbol.".to_string(),
            input_schema: symbol_schema(),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: SymbolArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for get_company_news")?;
        let symbol = args.symbol;

        let result = {
            let symbol = symbol.clone();
            self.client
                .with_session(move |stock| {
                    Box::pin(async move { stock.company_news(&symbol).await })
                })
                .await
        };

        Ok(render(
            result,
            &format!("News for {}", symbol),
            &format!("fetching news for {}", symbol),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::client_for;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_company_overview() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/company/overview"))
            .and(body_json(json!({"symbol": "VNM"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"company_name": "Vinamilk"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let tool = CompanyOverviewTool::new(client_for(&server));
        let result = tool.execute(json!({"symbol": "VNM"})).await.unwrap();

        assert!(!result.is_error());
        assert_eq!(
            result.as_text(),
            r#"Company Overview for VNM: {"company_name":"Vinamilk"}"#
        );
    }

    #[tokio::test]
    async fn test_company_overview_missing_symbol() {
        let server = MockServer::start().await;
        let tool = CompanyOverviewTool::new(client_for(&server));

        let err = tool.execute(json!({})).await.unwrap_err();
        assert!(err.to_string().contains("get_company_overview"));
    }

    #[tokio::test]
    async fn test_company_news_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/company/news"))
            .respond_with(ResponseTemplate::new(404).set_body_string("symbol not found"))
            .expect(1)
            .mount(&server)
            .await;

        let tool = CompanyNewsTool::new(client_for(&server));
        let result = tool.execute(json!({"symbol": "ZZZ"})).await.unwrap();

        assert!(result.is_error());
        let text = result.as_text();
        assert!(text.starts_with("Error fetching news for ZZZ: "));
        assert!(text.contains("404"));
        assert!(text.contains("symbol not found"));
    }
}
