use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// A single OHLCV bar. Immutable once it is part of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Bar open time in epoch milliseconds; the series timestamp.
    pub open_time: i64,
    pub close_time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        open_time: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        close_time: i64,
    ) -> Self {
        Self {
            open_time,
            close_time,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

/// Close prices of `candles`, oldest first.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Check that `candles` is strictly ascending by `open_time`, which also
/// rules out duplicate timestamps.
pub fn validate_series(symbol: &str, candles: &[Candle]) -> Result<(), AnalysisError> {
    for (idx, pair) in candles.windows(2).enumerate() {
        if pair[1].open_time <= pair[0].open_time {
            return Err(AnalysisError::InvalidSeries {
                symbol: symbol.to_string(),
                reason: format!(
                    "bar {} open_time {} does not follow {}",
                    idx + 1,
                    pair[1].open_time,
                    pair[0].open_time
                ),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open_time: i64, close: f64) -> Candle {
        Candle::new(open_time, close, close, close, close, 1.0, open_time + 59_999)
    }

    #[test]
    fn closes_are_extracted_in_order() {
        let candles = vec![bar(0, 1.0), bar(60_000, 2.0), bar(120_000, 3.0)];
        assert_eq!(closes(&candles), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn ascending_series_is_valid() {
        let candles = vec![bar(0, 1.0), bar(60_000, 2.0)];
        assert!(validate_series("BTCUSDT", &candles).is_ok());
        assert!(validate_series("BTCUSDT", &[]).is_ok());
    }

    #[test]
    fn duplicate_timestamp_is_rejected() {
        let candles = vec![bar(0, 1.0), bar(60_000, 2.0), bar(60_000, 3.0)];
        let err = validate_series("BTCUSDT", &candles).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSeries { .. }));
    }

    #[test]
    fn descending_series_is_rejected() {
        let candles = vec![bar(60_000, 1.0), bar(0, 2.0)];
        assert!(validate_series("ETHUSDT", &candles).is_err());
    }
}
