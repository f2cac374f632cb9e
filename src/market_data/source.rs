// =============================================================================
// Series Source — boundary to whatever supplies bars and quotes
// =============================================================================
//
// Implementations must return bars in strictly ascending time order.  Failures
// are reported as `DataUnavailable` / `QuoteUnavailable`; retries, if any, are
// the implementation's business.
// =============================================================================

use crate::error::AnalysisError;
use crate::market_data::Candle;

pub trait SeriesSource {
    /// Fetch the most recent `limit` bars of `symbol` at `interval`.
    async fn fetch_series(
        &self,
        symbol: &str,
        interval: &str,
        limit: u32,
    ) -> Result<Vec<Candle>, AnalysisError>;

    /// Latest traded price of `symbol`.
    async fn latest_price(&self, symbol: &str) -> Result<f64, AnalysisError>;
}
