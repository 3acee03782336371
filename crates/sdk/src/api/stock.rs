//! Stock market data endpoints.

use crate::error::VnstockResult;
use crate::transport::HttpTransport;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Interval used by price history when the caller does not pick one.
pub const DEFAULT_INTERVAL: &str = "D";

pub const SYMBOLS_ENDPOINT: &str = "/api/v1/symbols";
pub const COMPANY_OVERVIEW_ENDPOINT: &str = "/api/v1/company/overview";
pub const COMPANY_NEWS_ENDPOINT: &str = "/api/v1/company/news";
pub const PRICE_HISTORY_ENDPOINT: &str = "/api/v1/trading/price-history";
pub const FINANCIAL_RATIOS_ENDPOINT: &str = "/api/v1/financial/ratios";
pub const TRADING_STATS_ENDPOINT: &str = "/api/v1/trading/stats";

/// Stock API translating each operation into one upstream call.
///
/// Holds no state of its own; it borrows the transport of an open session
/// and cannot outlive it. Responses are returned exactly as decoded.
#[derive(Debug, Clone, Copy)]
pub struct StockApi<'a> {
    transport: &'a HttpTransport,
}

impl<'a> StockApi<'a> {
    pub fn new(transport: &'a HttpTransport) -> Self {
        Self { transport }
    }

    /// List available stock symbols.
    pub async fn symbols(&self) -> VnstockResult<Value> {
        self.transport.get(SYMBOLS_ENDPOINT).await
    }

    /// Get company overview information.
    pub async fn company_overview(&self, symbol: &str) -> VnstockResult<Value> {
        self.transport
            .post(COMPANY_OVERVIEW_ENDPOINT, &SymbolRequest::new(symbol))
            .await
    }

    /// Get company news.
    pub async fn company_news(&self, symbol: &str) -> VnstockResult<Value> {
        self.transport
            .post(COMPANY_NEWS_ENDPOINT, &SymbolRequest::new(symbol))
            .await
    }

    /// Get price history for a symbol between two dates.
    ///
    /// Dates and interval are passed through untouched; the upstream API
    /// rejects values it does not understand.
    pub async fn price_history(
        &self,
        symbol: &str,
        start: &str,
        end: &str,
        interval: &str,
    ) -> VnstockResult<Value> {
        let request = PriceHistoryRequest {
            symbol: symbol.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            interval: interval.to_string(),
        };
        self.transport.post(PRICE_HISTORY_ENDPOINT, &request).await
    }

    /// Get financial ratio data.
    pub async fn financial_ratios(&self, symbol: &str) -> VnstockResult<Value> {
        self.transport
            .post(FINANCIAL_RATIOS_ENDPOINT, &SymbolRequest::new(symbol))
            .await
    }

    /// Get trading statistics between two dates.
    pub async fn trading_stats(&self, symbol: &str, start: &str, end: &str) -> VnstockResult<Value> {
        let request = TradingStatsRequest {
            symbol: symbol.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        };
        self.transport.post(TRADING_STATS_ENDPOINT, &request).await
    }
}

/// Payload for single-symbol endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolRequest {
    pub symbol: String,
}

impl SymbolRequest {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }
}

/// Payload for the price history endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceHistoryRequest {
    pub symbol: String,
    pub start: String,
    pub end: String,
    pub interval: String,
}

/// Payload for the trading statistics endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingStatsRequest {
    pub symbol: String,
    pub start: String,
    pub end: String,
}
