// =============================================================================
// Relative Strength Index (RSI) — Wilder's Smoothing
// =============================================================================
//
// RSI measures the speed and magnitude of recent price changes to evaluate
// whether an asset is overbought or oversold.
//
// Step 1 — Compute price changes (deltas) from consecutive closes.
// Step 2 — Split into gains (positive deltas, else 0) and losses (negated
//          negative deltas, else 0).
// Step 3 — Seed average gain / average loss with the SMA of the first `period`
//          gains / losses, then apply Wilder's smoothing (alpha = 1 / period):
//            avg_gain = (prev_avg_gain * (period - 1) + current_gain) / period
//            avg_loss = (prev_avg_loss * (period - 1) + current_loss) / period
// Step 4 — RS  = avg_gain / avg_loss   (avg_loss == 0 => RSI = 100)
//          RSI = 100 - 100 / (1 + RS)
//
// The output is aligned with the closes: the first `period` entries are
// `None` because `period` deltas are needed before the first value.
// =============================================================================

use crate::types::RsiCondition;

/// Compute the aligned RSI series for `closes` and `period`.
///
/// # Edge cases
/// - `period == 0` => every entry `None`
/// - `closes.len() < period + 1` => every entry `None`
/// - Average loss of zero (including a flat market) => 100.0.
/// - A non-finite value stops the series; later entries stay `None`.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if period == 0 || closes.len() < period + 1 {
        return result;
    }

    // --- Compute price deltas ------------------------------------------------
    let deltas: Vec<f64> = closes.windows(2).map(|w| w[1] - w[0]).collect();

    // --- Seed averages with SMA of first `period` deltas ---------------------
    if deltas[..period].iter().any(|d| !d.is_finite()) {
        return result;
    }
    let (sum_gain, sum_loss) = deltas[..period]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(g, l), &d| {
            let (gain, loss) = split_delta(d);
            (g + gain, l + loss)
        });

    let period_f = period as f64;
    let mut avg_gain = sum_gain / period_f;
    let mut avg_loss = sum_loss / period_f;

    // deltas[k] ends at close index k + 1.
    match rsi_from_averages(avg_gain, avg_loss) {
        Some(rsi) => result[period] = Some(rsi),
        None => return result,
    }

    // --- Wilder's smoothing for subsequent values ----------------------------
    for (k, &delta) in deltas.iter().enumerate().skip(period) {
        if !delta.is_finite() {
            break;
        }
        let (gain, loss) = split_delta(delta);

        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;

        match rsi_from_averages(avg_gain, avg_loss) {
            Some(rsi) => result[k + 1] = Some(rsi),
            None => break,
        }
    }

    result
}

/// Classify an RSI reading against the overbought / oversold cut-offs.
///
/// Both comparisons are strict: a reading exactly on a cut-off is neutral.
pub fn rsi_condition(value: f64, overbought: f64, oversold: f64) -> RsiCondition {
    if value > overbought {
        RsiCondition::Overbought
    } else if value < oversold {
        RsiCondition::Oversold
    } else {
        RsiCondition::Neutral
    }
}

// =============================================================================
// Internal helpers
// =============================================================================

fn split_delta(delta: f64) -> (f64, f64) {
    if delta > 0.0 {
        (delta, 0.0)
    } else if delta < 0.0 {
        (0.0, -delta)
    } else {
        (0.0, 0.0)
    }
}

/// Convert average gain / average loss into an RSI value in [0, 100].
///
/// Returns `None` when the result is non-finite.
fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> Option<f64> {
    if !avg_gain.is_finite() || !avg_loss.is_finite() {
        return None;
    }

    let rsi = if avg_loss == 0.0 {
        100.0
    } else {
        let rs = avg_gain / avg_loss;
        100.0 - 100.0 / (1.0 + rs)
    };

    if rsi.is_finite() {
        Some(rsi.clamp(0.0, 100.0))
    } else {
        None
    }
}
