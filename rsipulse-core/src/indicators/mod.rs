//! Indicator implementations.
//!
//! The dashboard needs exactly one indicator: the windowed-mean RSI,
//! computed per timeframe over the close column of a fetched series.
//! Undefined positions are `None`, never a NaN sentinel.

pub mod rsi;

pub use rsi::Rsi;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
