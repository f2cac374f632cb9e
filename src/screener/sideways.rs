// =============================================================================
// Sideways Detector
// =============================================================================
//
// Over the trailing `lookback` closes:
//
//   price_range = (max(close) - min(close)) / mean(close)
//   slope       = (MA[last] - MA[first]) / lookback
//
// where MA is the `ma_window` SMA of the full series sampled at the first and
// last index of the trailing window.  When the MA is still undefined at the
// window start, the earliest defined index inside the window is used instead.
//
// Sideways  <=>  price_range <= max_range  AND  |slope| < slope_tolerance
//
// `price_range` is a ratio and unchanged by rescaling the closes; `slope` is
// in price units per bar, so the same drift on a higher-priced instrument can
// fail the slope test.
// =============================================================================

use serde::Serialize;

use crate::config::ScreenerParams;
use crate::indicators::{IndicatorRequest, IndicatorSet};

/// Metrics behind one sideways verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SidewaysCheck {
    pub price_range: f64,
    pub slope: f64,
    pub is_sideways: bool,
}

/// Run the sideways test on `closes` (oldest first).
///
/// Returns `None` when:
/// - `lookback` is zero or longer than the series.
/// - The trailing mean is zero or non-finite.
/// - The MA is undefined at the last bar.
pub fn check_sideways(closes: &[f64], params: &ScreenerParams) -> Option<SidewaysCheck> {
    let lookback = params.lookback;
    if lookback == 0 || closes.len() < lookback {
        return None;
    }

    let start = closes.len() - lookback;
    let price_range = price_range(&closes[start..])?;

    let set = IndicatorSet::compute(closes, &IndicatorRequest::new().with_sma(params.ma_window));
    let ma = set.sma(params.ma_window)?;
    if !ma.is_defined() {
        return None;
    }
    let last = ma.latest()?;
    let first = (start..closes.len()).find_map(|i| ma.at(i))?;
    let slope = (last - first) / lookback as f64;
    if !slope.is_finite() {
        return None;
    }

    Some(SidewaysCheck {
        price_range,
        slope,
        is_sideways: price_range <= params.max_range && slope.abs() < params.slope_tolerance,
    })
}

/// `(max - min) / mean` of `closes`, scale-invariant.
pub fn price_range(closes: &[f64]) -> Option<f64> {
    if closes.is_empty() {
        return None;
    }

    let (min, max) = closes
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| {
            (lo.min(c), hi.max(c))
        });
    let mean = closes.iter().sum::<f64>() / closes.len() as f64;
    if mean == 0.0 || !mean.is_finite() {
        return None;
    }

    let range = (max - min) / mean;
    range.is_finite().then_some(range)
}
