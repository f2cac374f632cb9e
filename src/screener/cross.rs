// =============================================================================
// Golden-Cross Detector
// =============================================================================
//
// Compares the short and long SMA over the full series at the last two bars:
//
//   GoldenCross           prev_short <  prev_long  AND  cur_short >= cur_long
//   PotentialGoldenCross  cur_short  <  cur_long   AND
//                         (cur_short - cur_long) > -near_pct * cur_long
//
// The prior-bar comparison is strict and the last-bar comparison inclusive,
// so touching the long MA from below counts as a cross while a bar that
// starts level does not.
// =============================================================================

use crate::config::ScreenerParams;
use crate::indicators::{IndicatorRequest, IndicatorSeries, IndicatorSet};
use crate::types::CrossSignal;

/// Classify the last two bars of aligned `short` / `long` MA series.
///
/// Returns `None` when neither rule fires or the last values are undefined.
pub fn detect_cross(
    short: &IndicatorSeries,
    long: &IndicatorSeries,
    near_pct: f64,
) -> Option<CrossSignal> {
    let cur_short = short.latest()?;
    let cur_long = long.latest()?;

    if let (Some(prev_short), Some(prev_long)) = (short.previous(), long.previous()) {
        if prev_short < prev_long && cur_short >= cur_long {
            return Some(CrossSignal::GoldenCross);
        }
    }

    if cur_short < cur_long && (cur_short - cur_long) > -near_pct * cur_long {
        return Some(CrossSignal::PotentialGoldenCross);
    }

    None
}

/// Compute the configured short / long SMAs over `closes` and classify the
/// cross state.
pub fn check_golden_cross(closes: &[f64], params: &ScreenerParams) -> Option<CrossSignal> {
    let request = IndicatorRequest::new()
        .with_sma(params.short_window)
        .with_sma(params.long_window);
    let set = IndicatorSet::compute(closes, &request);
    detect_cross(
        set.sma(params.short_window)?,
        set.sma(params.long_window)?,
        params.near_cross_pct,
    )
}
