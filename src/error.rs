use thiserror::Error;

/// Typed error taxonomy for the analysis core.
///
/// `InsufficientData` is a recoverable marker that callers branch on; the
/// source failures abort the pass for a single symbol only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    // -- Lookback -----------------------------------------------------------
    #[error("insufficient data for {what}: need {required} bars, have {available}")]
    InsufficientData {
        what: String,
        required: usize,
        available: usize,
    },

    // -- Sources ------------------------------------------------------------
    #[error("series unavailable for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    #[error("quote unavailable for {symbol}: {reason}")]
    QuoteUnavailable { symbol: String, reason: String },

    #[error("invalid series for {symbol}: {reason}")]
    InvalidSeries { symbol: String, reason: String },
}

impl AnalysisError {
    pub fn insufficient(what: impl Into<String>, required: usize, available: usize) -> Self {
        Self::InsufficientData {
            what: what.into(),
            required,
            available,
        }
    }

    /// `true` for the recoverable lookback marker.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}
