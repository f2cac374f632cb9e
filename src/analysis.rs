// =============================================================================
// Signal Classifier — single-symbol advanced analysis
// =============================================================================
//
// Decision procedure (evaluated in this fixed order):
//
//   1. Regime:  price > MA_long => Bullish
//               price < MA_long => Bearish
//               otherwise       => Sideways (no signal possible)
//   2. Bullish: BUY  when MA_short > MA_long AND RSI < overbought
//   3. Bearish: SELL when MA_short < MA_long AND RSI > oversold
//   4. RSI annotation (Overbought / Oversold / Neutral) is informational only.
//
// Nothing is cached between calls; every evaluation is recomputed from the
// series it is given.
// =============================================================================

use serde::Serialize;
use tracing::{debug, instrument};

use crate::config::{AppConfig, ClassifierParams};
use crate::error::AnalysisError;
use crate::indicators::rsi::rsi_condition;
use crate::indicators::{IndicatorRequest, IndicatorSet};
use crate::market_data::{closes, validate_series, SeriesSource};
use crate::types::{Regime, RsiCondition, TradeSignal};

/// Outcome of the classifier for the latest bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub regime: Regime,
    pub signal: TradeSignal,
    pub rsi_condition: RsiCondition,
    pub ma_short: f64,
    pub ma_long: f64,
    pub rsi: f64,
}

impl Classification {
    /// Human-readable regime verdict, including whether the signal is
    /// confirmed.
    pub fn regime_text(&self) -> String {
        match (self.regime, self.signal) {
            (Regime::Bullish, TradeSignal::Buy) => {
                "Bullish trend (price above long MA), BUY confirmed".to_string()
            }
            (Regime::Bullish, _) => {
                "Bullish trend (price above long MA), buy not yet confirmed".to_string()
            }
            (Regime::Bearish, TradeSignal::Sell) => {
                "Bearish trend (price below long MA), SELL confirmed".to_string()
            }
            (Regime::Bearish, _) => {
                "Bearish trend (price below long MA), sell not yet confirmed".to_string()
            }
            (Regime::Sideways, _) => "Sideways (price at long MA), no signal".to_string(),
        }
    }

    pub fn rsi_condition_text(&self) -> String {
        match self.rsi_condition {
            RsiCondition::Overbought => format!("RSI {:.2}: Overbought", self.rsi),
            RsiCondition::Oversold => format!("RSI {:.2}: Oversold", self.rsi),
            RsiCondition::Neutral => format!("RSI {:.2}: Neutral", self.rsi),
        }
    }
}

/// Classify the latest bar of `closes` against `current_price`.
///
/// Returns `InsufficientData` when the series is shorter than
/// `params.min_bars` or any required indicator is still undefined.
pub fn classify(
    closes: &[f64],
    current_price: f64,
    params: &ClassifierParams,
) -> Result<Classification, AnalysisError> {
    if closes.len() < params.min_bars {
        return Err(AnalysisError::insufficient(
            "signal classifier",
            params.min_bars,
            closes.len(),
        ));
    }

    let request = IndicatorRequest::new()
        .with_sma(params.ma_short)
        .with_sma(params.ma_long)
        .with_rsi(params.rsi_period);
    let set = IndicatorSet::compute(closes, &request);

    let ma_short = latest_sma(&set, params.ma_short)?;
    let ma_long = latest_sma(&set, params.ma_long)?;
    let rsi = match set.rsi() {
        Some(series) => series.require_latest(&format!("RSI{}", params.rsi_period))?,
        None => {
            return Err(AnalysisError::insufficient(
                format!("RSI{}", params.rsi_period),
                params.rsi_period + 1,
                closes.len(),
            ))
        }
    };

    let regime = if current_price > ma_long {
        Regime::Bullish
    } else if current_price < ma_long {
        Regime::Bearish
    } else {
        Regime::Sideways
    };

    let signal = match regime {
        Regime::Bullish if ma_short > ma_long && rsi < params.overbought => TradeSignal::Buy,
        Regime::Bearish if ma_short < ma_long && rsi > params.oversold => TradeSignal::Sell,
        _ => TradeSignal::None,
    };

    let classification = Classification {
        regime,
        signal,
        rsi_condition: rsi_condition(rsi, params.overbought, params.oversold),
        ma_short,
        ma_long,
        rsi,
    };

    debug!(
        regime = %classification.regime,
        signal = %classification.signal,
        rsi = format!("{:.2}", rsi),
        "classification complete"
    );

    Ok(classification)
}

fn latest_sma(set: &IndicatorSet, window: usize) -> Result<f64, AnalysisError> {
    let what = format!("MA{window}");
    match set.sma(window) {
        Some(series) => series.require_latest(&what),
        None => Err(AnalysisError::insufficient(what, window, set.len)),
    }
}

// =============================================================================
// Presenter record
// =============================================================================

/// Everything a presenter needs to render one analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub symbol: String,
    pub timeframe: String,
    pub current_price: f64,
    pub ma_short_window: usize,
    pub ma_short: f64,
    pub ma_long_window: usize,
    pub ma_long: f64,
    pub rsi: f64,
    pub signal: TradeSignal,
    pub regime: Regime,
    pub rsi_condition: RsiCondition,
    pub regime_text: String,
    pub rsi_condition_text: String,
}

/// Fetch `symbol` from `source` and classify it with the configured params.
#[instrument(skip(source, config), name = "analysis::analyze_symbol")]
pub async fn analyze_symbol<S: SeriesSource>(
    source: &S,
    symbol: &str,
    config: &AppConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let candles = source
        .fetch_series(symbol, &config.timeframe, config.analysis_limit)
        .await?;
    validate_series(symbol, &candles)?;
    let current_price = source.latest_price(symbol).await?;

    let params = &config.classifier;
    let classification = classify(&closes(&candles), current_price, params)?;

    Ok(AnalysisReport {
        symbol: symbol.to_string(),
        timeframe: config.timeframe.clone(),
        current_price,
        ma_short_window: params.ma_short,
        ma_short: classification.ma_short,
        ma_long_window: params.ma_long,
        ma_long: classification.ma_long,
        rsi: classification.rsi,
        signal: classification.signal,
        regime: classification.regime,
        rsi_condition: classification.rsi_condition,
        regime_text: classification.regime_text(),
        rsi_condition_text: classification.rsi_condition_text(),
    })
}
