// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================
//
// SMA_i = mean(close_{i-window+1} ..= close_i)
//
// The output is aligned index-for-index with the input closes: the first
// `window - 1` entries are `None` because there is not enough history yet.
// =============================================================================

/// Compute the aligned SMA series for `closes` over `window` bars.
///
/// # Edge cases
/// - `window == 0` => every entry `None`
/// - `closes.len() < window` => every entry `None`
/// - A non-finite mean is reported as `None` for that index only.
pub fn calculate_sma(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; closes.len()];
    if window == 0 || closes.len() < window {
        return result;
    }

    let divisor = window as f64;
    for (offset, slice) in closes.windows(window).enumerate() {
        let mean = slice.iter().sum::<f64>() / divisor;
        if mean.is_finite() {
            result[offset + window - 1] = Some(mean);
        }
    }

    result
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_empty_input() {
        assert!(calculate_sma(&[], 5).is_empty());
    }

    #[test]
    fn sma_window_zero() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0], 0);
        assert_eq!(sma, vec![None, None, None]);
    }

    #[test]
    fn sma_shorter_than_window_is_all_undefined() {
        let sma = calculate_sma(&[1.0, 2.0, 3.0, 4.0], 5);
        assert_eq!(sma.len(), 4);
        assert!(sma.iter().all(Option::is_none));
    }

    #[test]
    fn sma_leading_entries_undefined() {
        let closes: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let sma = calculate_sma(&closes, 4);
        assert_eq!(sma.len(), closes.len());
        for entry in &sma[..3] {
            assert!(entry.is_none());
        }
        for entry in &sma[3..] {
            assert!(entry.is_some());
        }
    }

    #[test]
    fn sma_equals_trailing_mean() {
        let closes = vec![2.0, 4.0, 6.0, 8.0, 10.0, 3.0, 7.0];
        let window = 3;
        let sma = calculate_sma(&closes, window);
        for i in (window - 1)..closes.len() {
            let expected = closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
            let got = sma[i].unwrap();
            assert!((got - expected).abs() < 1e-12, "index {i}: got {got}, expected {expected}");
        }
    }

    #[test]
    fn sma_window_equals_length() {
        let sma = calculate_sma(&[2.0, 4.0, 6.0], 3);
        assert!(sma[..2].iter().all(Option::is_none));
        assert!((sma[2].unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn sma_constant_series_is_exact() {
        let closes = vec![10.0; 60];
        let sma20 = calculate_sma(&closes, 20);
        let sma50 = calculate_sma(&closes, 50);
        assert_eq!(sma20[59], Some(10.0));
        assert_eq!(sma50[59], Some(10.0));
    }

    #[test]
    fn sma_nan_only_poisons_windows_containing_it() {
        let closes = vec![1.0, 2.0, f64::NAN, 4.0, 5.0, 6.0];
        let sma = calculate_sma(&closes, 2);
        assert_eq!(sma[1], Some(1.5));
        assert!(sma[2].is_none());
        assert!(sma[3].is_none());
        assert_eq!(sma[4], Some(4.5));
    }
}
