// =============================================================================
// Indicator Engine — request in, aligned IndicatorSet out
// =============================================================================
//
// Pure function of the input closes.  An indicator whose lookback exceeds the
// series length is reported as `InsufficientData` instead of failing the
// whole set, so callers must check definedness before use.
// =============================================================================

use crate::error::AnalysisError;
use crate::indicators::rsi::calculate_rsi;
use crate::indicators::sma::calculate_sma;

/// Which indicators to compute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorRequest {
    pub sma_windows: Vec<usize>,
    pub rsi_period: Option<usize>,
}

impl IndicatorRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sma(mut self, window: usize) -> Self {
        if !self.sma_windows.contains(&window) {
            self.sma_windows.push(window);
        }
        self
    }

    pub fn with_rsi(mut self, period: usize) -> Self {
        self.rsi_period = Some(period);
        self
    }
}

/// One derived series, aligned index-for-index with the input closes.
#[derive(Debug, Clone, PartialEq)]
pub enum IndicatorSeries {
    Defined(Vec<Option<f64>>),
    InsufficientData { required: usize, available: usize },
}

impl IndicatorSeries {
    fn from_values(values: Vec<Option<f64>>, required: usize) -> Self {
        if values.len() < required {
            Self::InsufficientData {
                required,
                available: values.len(),
            }
        } else {
            Self::Defined(values)
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    /// Value at `index`, `None` when undefined there or for the whole series.
    pub fn at(&self, index: usize) -> Option<f64> {
        match self {
            Self::Defined(values) => values.get(index).copied().flatten(),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Most recent value.
    pub fn latest(&self) -> Option<f64> {
        match self {
            Self::Defined(values) => values.last().copied().flatten(),
            Self::InsufficientData { .. } => None,
        }
    }

    /// Second most recent value.
    pub fn previous(&self) -> Option<f64> {
        match self {
            Self::Defined(values) if values.len() >= 2 => values[values.len() - 2],
            _ => None,
        }
    }

    /// Latest value, or an `InsufficientData` error naming `what`.
    pub fn require_latest(&self, what: &str) -> Result<f64, AnalysisError> {
        match self {
            Self::InsufficientData {
                required,
                available,
            } => Err(AnalysisError::insufficient(what, *required, *available)),
            Self::Defined(values) => self
                .latest()
                .ok_or_else(|| AnalysisError::insufficient(what, values.len(), values.len())),
        }
    }
}

/// Per-timestamp derived values for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    /// Number of bars the set was computed from.
    pub len: usize,
    pub smas: Vec<(usize, IndicatorSeries)>,
    pub rsi: Option<(usize, IndicatorSeries)>,
}

impl IndicatorSet {
    /// Compute every indicator in `request` over `closes`.
    pub fn compute(closes: &[f64], request: &IndicatorRequest) -> Self {
        let smas = request
            .sma_windows
            .iter()
            .map(|&window| {
                let series = IndicatorSeries::from_values(calculate_sma(closes, window), window);
                (window, series)
            })
            .collect();

        let rsi = request.rsi_period.map(|period| {
            let series = IndicatorSeries::from_values(calculate_rsi(closes, period), period + 1);
            (period, series)
        });

        Self {
            len: closes.len(),
            smas,
            rsi,
        }
    }

    /// The SMA series for `window`, if it was requested.
    pub fn sma(&self, window: usize) -> Option<&IndicatorSeries> {
        self.smas
            .iter()
            .find(|(w, _)| *w == window)
            .map(|(_, series)| series)
    }

    /// The RSI series, if it was requested.
    pub fn rsi(&self) -> Option<&IndicatorSeries> {
        self.rsi.as_ref().map(|(_, series)| series)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(n: usize) -> Vec<f64> {
        (1..=n).map(|i| i as f64).collect()
    }

    #[test]
    fn request_builder_deduplicates_windows() {
        let req = IndicatorRequest::new().with_sma(50).with_sma(200).with_sma(50).with_rsi(14);
        assert_eq!(req.sma_windows, vec![50, 200]);
        assert_eq!(req.rsi_period, Some(14));
    }

    #[test]
    fn set_is_aligned_with_series() {
        let closes = ramp(30);
        let req = IndicatorRequest::new().with_sma(5).with_rsi(14);
        let set = IndicatorSet::compute(&closes, &req);
        assert_eq!(set.len, 30);
        let sma = set.sma(5).unwrap();
        assert!(sma.at(30).is_none());
        assert!(sma.at(3).is_none());
        assert!((sma.at(4).unwrap() - 3.0).abs() < 1e-12);
        assert!((sma.latest().unwrap() - 28.0).abs() < 1e-12);
        assert!((sma.previous().unwrap() - 27.0).abs() < 1e-12);
        let rsi = set.rsi().unwrap();
        assert!(rsi.at(13).is_none());
        assert_eq!(rsi.latest(), Some(100.0));
    }

    #[test]
    fn long_window_reports_insufficient_data() {
        let closes = ramp(120);
        let req = IndicatorRequest::new().with_sma(50).with_sma(200).with_rsi(14);
        let set = IndicatorSet::compute(&closes, &req);
        assert!(set.sma(50).unwrap().is_defined());
        let ma200 = set.sma(200).unwrap();
        assert_eq!(
            *ma200,
            IndicatorSeries::InsufficientData {
                required: 200,
                available: 120
            }
        );
        assert!(ma200.latest().is_none());
        let err = ma200.require_latest("MA200").unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn rsi_requires_period_plus_one_bars() {
        let req = IndicatorRequest::new().with_rsi(14);
        let short = IndicatorSet::compute(&ramp(14), &req);
        assert!(!short.rsi().unwrap().is_defined());
        let enough = IndicatorSet::compute(&ramp(15), &req);
        assert!(enough.rsi().unwrap().is_defined());
        assert_eq!(enough.rsi().unwrap().latest(), Some(100.0));
    }

    #[test]
    fn unrequested_indicator_is_absent() {
        let set = IndicatorSet::compute(&ramp(10), &IndicatorRequest::new().with_sma(3));
        assert!(set.sma(20).is_none());
        assert!(set.rsi().is_none());
    }
}
