// =============================================================================
// Screener — batch sideways + golden-cross scan
// =============================================================================
//
// For each candidate symbol: fetch its series, skip it below `min_bars`, and
// keep it only when the trailing window is sideways AND a (potential) golden
// cross is present.  A failing symbol is logged and excluded; it never aborts
// the batch.  Symbols are fetched concurrently but results are collected by
// input index, so the output order always matches the candidate order.
// =============================================================================

pub mod cross;
pub mod sideways;

use futures_util::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ScreenerParams;
use crate::error::AnalysisError;
use crate::market_data::{closes, validate_series, SeriesSource};
use crate::types::CrossSignal;

pub use cross::check_golden_cross;
pub use sideways::check_sideways;

/// A symbol that passed the screen, with the cross label that qualified it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenResult {
    pub symbol: String,
    pub signal: CrossSignal,
}

/// Per-symbol verdict of one screening pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenOutcome {
    Matched(CrossSignal),
    NoMatch {
        sideways: bool,
        cross: Option<CrossSignal>,
    },
    Skipped {
        bars: usize,
    },
    Failed(AnalysisError),
}

/// Screen one already-fetched series.
pub fn evaluate_closes(closes: &[f64], params: &ScreenerParams) -> ScreenOutcome {
    if closes.len() < params.min_bars {
        return ScreenOutcome::Skipped { bars: closes.len() };
    }

    let sideways = check_sideways(closes, params).is_some_and(|c| c.is_sideways);
    let cross = check_golden_cross(closes, params);

    match (sideways, cross) {
        (true, Some(signal)) => ScreenOutcome::Matched(signal),
        _ => ScreenOutcome::NoMatch { sideways, cross },
    }
}

/// Fetch and screen a single symbol.
pub async fn screen_symbol<S: SeriesSource>(
    source: &S,
    symbol: &str,
    interval: &str,
    limit: u32,
    params: &ScreenerParams,
) -> ScreenOutcome {
    let candles = match source.fetch_series(symbol, interval, limit).await {
        Ok(candles) => candles,
        Err(e) => return ScreenOutcome::Failed(e),
    };
    if let Err(e) = validate_series(symbol, &candles) {
        return ScreenOutcome::Failed(e);
    }
    evaluate_closes(&closes(&candles), params)
}

/// Screen every symbol in `symbols`, returning matches in input order.
pub async fn run_screen<S: SeriesSource>(
    source: &S,
    symbols: &[String],
    interval: &str,
    limit: u32,
    params: &ScreenerParams,
) -> Vec<ScreenResult> {
    let tasks = symbols
        .iter()
        .map(|symbol| screen_symbol(source, symbol, interval, limit, params));
    // join_all yields outputs positionally, independent of completion order.
    let outcomes = join_all(tasks).await;

    let mut results = Vec::new();
    let mut failed = 0usize;
    for (symbol, outcome) in symbols.iter().zip(outcomes) {
        match outcome {
            ScreenOutcome::Matched(signal) => {
                info!(symbol = %symbol, signal = %signal, "screen match");
                results.push(ScreenResult {
                    symbol: symbol.clone(),
                    signal,
                });
            }
            ScreenOutcome::NoMatch { sideways, cross } => {
                debug!(symbol = %symbol, sideways, cross = ?cross, "screen: no match");
            }
            ScreenOutcome::Skipped { bars } => {
                debug!(
                    symbol = %symbol,
                    bars,
                    min_bars = params.min_bars,
                    "screen: insufficient data, skipped"
                );
            }
            ScreenOutcome::Failed(e) => {
                failed += 1;
                warn!(symbol = %symbol, error = %e, "screen: symbol excluded");
            }
        }
    }

    info!(
        candidates = symbols.len(),
        matched = results.len(),
        failed,
        "screening pass complete"
    );
    results
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::Candle;
    use std::collections::HashMap;

    /// Flat at 100 for 80 bars, then 20 bars just below: sideways and the
    /// short MA sits within 1 % under the long MA.
    fn approaching() -> Vec<f64> {
        let mut closes = vec![100.0; 80];
        closes.extend(std::iter::repeat(99.9).take(20));
        closes
    }

    /// Same dip, then a last bar that lifts MA20 over MA50.
    fn crossing() -> Vec<f64> {
        let mut closes = vec![100.0; 80];
        closes.extend(std::iter::repeat(99.9).take(19));
        closes.push(104.0);
        closes
    }

    struct MemorySource {
        series: HashMap<String, Vec<Candle>>,
    }

    impl MemorySource {
        fn new() -> Self {
            Self {
                series: HashMap::new(),
            }
        }

        fn with(mut self, symbol: &str, closes: &[f64]) -> Self {
            let candles = closes
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    let t = i as i64 * 86_400_000;
                    Candle::new(t, c, c, c, c, 1.0, t + 86_399_999)
                })
                .collect();
            self.series.insert(symbol.to_string(), candles);
            self
        }

        fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
            self.series.insert(symbol.to_string(), candles);
            self
        }
    }

    impl SeriesSource for MemorySource {
        async fn fetch_series(
            &self,
            symbol: &str,
            _interval: &str,
            _limit: u32,
        ) -> Result<Vec<Candle>, AnalysisError> {
            self.series
                .get(symbol)
                .cloned()
                .ok_or_else(|| AnalysisError::DataUnavailable {
                    symbol: symbol.to_string(),
                    reason: "not found".to_string(),
                })
        }

        async fn latest_price(&self, symbol: &str) -> Result<f64, AnalysisError> {
            Err(AnalysisError::QuoteUnavailable {
                symbol: symbol.to_string(),
                reason: "not used".to_string(),
            })
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    // ---- evaluate_closes -------------------------------------------------

    #[test]
    fn constant_series_is_excluded() {
        let outcome = evaluate_closes(&[10.0; 60], &ScreenerParams::default());
        assert_eq!(
            outcome,
            ScreenOutcome::NoMatch {
                sideways: true,
                cross: None
            }
        );
    }

    #[test]
    fn fifty_nine_bars_are_skipped() {
        let outcome = evaluate_closes(&[10.0; 59], &ScreenerParams::default());
        assert_eq!(outcome, ScreenOutcome::Skipped { bars: 59 });
    }

    #[test]
    fn approaching_cross_in_range_matches() {
        let outcome = evaluate_closes(&approaching(), &ScreenerParams::default());
        assert_eq!(
            outcome,
            ScreenOutcome::Matched(CrossSignal::PotentialGoldenCross)
        );
    }

    #[test]
    fn breakout_in_range_matches_golden() {
        let outcome = evaluate_closes(&crossing(), &ScreenerParams::default());
        assert_eq!(outcome, ScreenOutcome::Matched(CrossSignal::GoldenCross));
    }

    #[test]
    fn cross_without_sideways_is_excluded() {
        let params = ScreenerParams {
            max_range: 0.0001,
            ..ScreenerParams::default()
        };
        let outcome = evaluate_closes(&approaching(), &params);
        assert_eq!(
            outcome,
            ScreenOutcome::NoMatch {
                sideways: false,
                cross: Some(CrossSignal::PotentialGoldenCross)
            }
        );
    }

    // ---- run_screen ------------------------------------------------------

    #[tokio::test]
    async fn results_follow_input_order() {
        let source = MemorySource::new()
            .with("AAA", &crossing())
            .with("BBB", &[10.0; 80])
            .with("CCC", &approaching());
        let results = run_screen(
            &source,
            &symbols(&["CCC", "BBB", "AAA"]),
            "1d",
            180,
            &ScreenerParams::default(),
        )
        .await;
        assert_eq!(
            results,
            vec![
                ScreenResult {
                    symbol: "CCC".to_string(),
                    signal: CrossSignal::PotentialGoldenCross
                },
                ScreenResult {
                    symbol: "AAA".to_string(),
                    signal: CrossSignal::GoldenCross
                },
            ]
        );
    }

    #[tokio::test]
    async fn failing_symbol_does_not_abort_batch() {
        let source = MemorySource::new()
            .with("AAA", &approaching())
            .with("SHORT", &[10.0; 59]);
        let results = run_screen(
            &source,
            &symbols(&["MISSING", "SHORT", "AAA"]),
            "1d",
            180,
            &ScreenerParams::default(),
        )
        .await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].symbol, "AAA");
    }

    #[tokio::test]
    async fn unordered_series_is_reported_as_failure() {
        let candles = vec![
            Candle::new(86_400_000, 1.0, 1.0, 1.0, 1.0, 1.0, 0),
            Candle::new(0, 1.0, 1.0, 1.0, 1.0, 1.0, 0),
        ];
        let source = MemorySource::new().with_candles("BAD", candles);
        let outcome =
            screen_symbol(&source, "BAD", "1d", 180, &ScreenerParams::default()).await;
        assert!(matches!(
            outcome,
            ScreenOutcome::Failed(AnalysisError::InvalidSeries { .. })
        ));
    }

    #[tokio::test]
    async fn empty_candidate_list_yields_nothing() {
        let source = MemorySource::new();
        let results = run_screen(&source, &[], "1d", 180, &ScreenerParams::default()).await;
        assert!(results.is_empty());
    }
}
