//! Mathematical utilities: least squares and rounding.

pub mod ols;

pub use ols::*;

/// Round to 2 decimal places (half away from zero).
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
