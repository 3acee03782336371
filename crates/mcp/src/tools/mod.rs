pub mod company;
pub mod financial;
pub mod symbols;
pub mod trading;
mod format;
mod registry;

pub use company::{CompanyNewsTool, CompanyOverviewTool};
pub use financial::FinancialRatiosTool;
pub use symbols::GetSymbolsTool;
pub use trading::{PriceHistoryTool, TradingStatsTool};
pub use registry::{
    json_schema_object, json_schema_string, json_schema_string_with_default, Tool, ToolRegistry,
};

use std::sync::Arc;
use vnstock_sdk::VnstockClient;

/// Registry holding every Vnstock tool, all sharing `client`'s configuration.
pub fn vnstock_registry(client: VnstockClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(GetSymbolsTool::new(client.clone())));
    registry.register(Arc::new(CompanyOverviewTool::new(client.clone())));
    registry.register(Arc::new(CompanyNewsTool::new(client.clone())));
    registry.register(Arc::new(PriceHistoryTool::new(client.clone())));
    registry.register(Arc::new(FinancialRatiosTool::new(client.clone())));
    registry.register(Arc::new(TradingStatsTool::new(client)));

    registry
}
