// =============================================================================
// Configuration — every threshold and window the engine uses lives here
// =============================================================================
//
// Nothing inside the indicator / classifier / screener code is hardcoded: the
// functions receive these params.  All fields carry `#[serde(default)]` so a
// partial (or empty) JSON file still loads.
//
// Persistence uses an atomic tmp + rename pattern.
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_timeframe() -> String {
    "1d".to_string()
}

fn default_analysis_limit() -> u32 {
    300
}

fn default_analysis_interval_secs() -> u64 {
    60
}

fn default_screen_interval() -> String {
    "1d".to_string()
}

fn default_screen_limit() -> u32 {
    180
}

fn default_candidates() -> Vec<String> {
    [
        "BTCUSDT", "ETHUSDT", "BNBUSDT", "XRPUSDT", "SOLUSDT", "ADAUSDT", "DOGEUSDT",
        "LINKUSDT", "DOTUSDT", "LTCUSDT",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_news_calendar_path() -> String {
    "news_calendar.json".to_string()
}

fn default_news_horizon_days() -> i64 {
    7
}

fn default_ma_short() -> usize {
    50
}

fn default_ma_long() -> usize {
    200
}

fn default_rsi_period() -> usize {
    14
}

fn default_overbought() -> f64 {
    70.0
}

fn default_oversold() -> f64 {
    30.0
}

fn default_classifier_min_bars() -> usize {
    200
}

fn default_lookback() -> usize {
    50
}

fn default_sideways_ma_window() -> usize {
    50
}

fn default_max_range() -> f64 {
    0.15
}

fn default_slope_tolerance() -> f64 {
    0.001
}

fn default_short_window() -> usize {
    20
}

fn default_long_window() -> usize {
    50
}

fn default_near_cross_pct() -> f64 {
    0.01
}

fn default_screener_min_bars() -> usize {
    60
}

// =============================================================================
// ClassifierParams
// =============================================================================

/// Windows and RSI cut-offs for the single-symbol signal classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierParams {
    /// Short moving-average window.
    #[serde(default = "default_ma_short")]
    pub ma_short: usize,

    /// Long moving-average window; also the regime reference.
    #[serde(default = "default_ma_long")]
    pub ma_long: usize,

    #[serde(default = "default_rsi_period")]
    pub rsi_period: usize,

    /// RSI strictly above this is overbought; BUY requires RSI below it.
    #[serde(default = "default_overbought")]
    pub overbought: f64,

    /// RSI strictly below this is oversold; SELL requires RSI above it.
    #[serde(default = "default_oversold")]
    pub oversold: f64,

    /// Minimum bars of history before any signal is produced.
    #[serde(default = "default_classifier_min_bars")]
    pub min_bars: usize,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        Self {
            ma_short: default_ma_short(),
            ma_long: default_ma_long(),
            rsi_period: default_rsi_period(),
            overbought: default_overbought(),
            oversold: default_oversold(),
            min_bars: default_classifier_min_bars(),
        }
    }
}

// =============================================================================
// ScreenerParams
// =============================================================================

/// Sideways and golden-cross parameters for the batch screener.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerParams {
    /// Trailing bars inspected by the sideways test.
    #[serde(default = "default_lookback")]
    pub lookback: usize,

    /// MA window whose slope the sideways test measures.
    #[serde(default = "default_sideways_ma_window")]
    pub ma_window: usize,

    /// Maximum (max - min) / mean of trailing closes.
    #[serde(default = "default_max_range")]
    pub max_range: f64,

    /// Maximum absolute MA slope per bar.
    #[serde(default = "default_slope_tolerance")]
    pub slope_tolerance: f64,

    #[serde(default = "default_short_window")]
    pub short_window: usize,

    #[serde(default = "default_long_window")]
    pub long_window: usize,

    /// Fraction of the long MA within which a short MA below it counts as
    /// approaching (0.01 = 1 %).
    #[serde(default = "default_near_cross_pct")]
    pub near_cross_pct: f64,

    /// Symbols with fewer bars are skipped.
    #[serde(default = "default_screener_min_bars")]
    pub min_bars: usize,
}

impl Default for ScreenerParams {
    fn default() -> Self {
        Self {
            lookback: default_lookback(),
            ma_window: default_sideways_ma_window(),
            max_range: default_max_range(),
            slope_tolerance: default_slope_tolerance(),
            short_window: default_short_window(),
            long_window: default_long_window(),
            near_cross_pct: default_near_cross_pct(),
            min_bars: default_screener_min_bars(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    // --- Interactive analysis -------------------------------------------

    /// Symbol analysed when `/analyze` is given no argument.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Kline interval used for analysis, also shown as the timeframe label.
    #[serde(default = "default_timeframe")]
    pub timeframe: String,

    /// Bars fetched per analysis.
    #[serde(default = "default_analysis_limit")]
    pub analysis_limit: u32,

    /// Minimum seconds between two accepted analysis requests.
    #[serde(default = "default_analysis_interval_secs")]
    pub analysis_interval_secs: u64,

    // --- Screener -------------------------------------------------------

    #[serde(default = "default_screen_interval")]
    pub screen_interval: String,

    /// Bars fetched per candidate symbol.
    #[serde(default = "default_screen_limit")]
    pub screen_limit: u32,

    #[serde(default = "default_candidates")]
    pub candidates: Vec<String>,

    // --- News -----------------------------------------------------------

    #[serde(default = "default_news_calendar_path")]
    pub news_calendar_path: String,

    /// Days ahead (inclusive) for which upcoming events are reported.
    #[serde(default = "default_news_horizon_days")]
    pub news_horizon_days: i64,

    // --- Rule parameters ------------------------------------------------

    #[serde(default)]
    pub classifier: ClassifierParams,

    #[serde(default)]
    pub screener: ScreenerParams,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            timeframe: default_timeframe(),
            analysis_limit: default_analysis_limit(),
            analysis_interval_secs: default_analysis_interval_secs(),
            screen_interval: default_screen_interval(),
            screen_limit: default_screen_limit(),
            candidates: default_candidates(),
            news_calendar_path: default_news_calendar_path(),
            news_horizon_days: default_news_horizon_days(),
            classifier: ClassifierParams::default(),
            screener: ScreenerParams::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// A missing file is an error so the caller can fall back to defaults with
    /// a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            symbol = %config.symbol,
            candidates = config.candidates.len(),
            "config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "config saved (atomic)");
        Ok(())
    }

    /// Apply overrides from `lookup` (normally `std::env::var`).
    ///
    /// - `TREND_SCREENER_SYMBOL`: analysis symbol
    /// - `TREND_SCREENER_CANDIDATES`: comma-separated screener symbols
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(symbol) = lookup("TREND_SCREENER_SYMBOL") {
            let symbol = symbol.trim().to_uppercase();
            if !symbol.is_empty() {
                self.symbol = symbol;
            }
        }
        if let Some(list) = lookup("TREND_SCREENER_CANDIDATES") {
            let candidates = parse_symbol_list(&list);
            if !candidates.is_empty() {
                self.candidates = candidates;
            }
        }
    }
}

/// Split a comma-separated symbol list, trimming and upper-casing entries.
pub fn parse_symbol_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect()
}
