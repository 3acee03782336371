// Rendering of upstream results into tool output

use crate::protocol::{CallToolResult, ToolContent};
use serde_json::Value;
use tracing::warn;
use vnstock_sdk::VnstockResult;

/// Render a service result as tool text.
///
/// Success becomes `"<heading>: <compact json>"`; any error becomes
/// `"Error <action>: <error>"` flagged as an error result.
pub(crate) fn render(result: VnstockResult<Value>, heading: &str, action: &str) -> CallToolResult {
    match result {
        Ok(data) => CallToolResult::text(format!("{}: {}", heading, data)),
        Err(e) => {
            warn!(error = %e, "Error {}", action);
            CallToolResult {
                content: vec![ToolContent::text(format!("Error {}: {}", action, e))],
                is_error: Some(true),
            }
        }
    }
}
