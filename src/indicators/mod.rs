// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free implementations of the indicators used by the
// classifier and the screener.  Series are aligned with the input closes and
// use `None` for the leading entries that lack history.

pub mod engine;
pub mod rsi;
pub mod sma;

pub use engine::{IndicatorRequest, IndicatorSeries, IndicatorSet};
