//! OK/NG classification of evaluator output.

use sweep_types::{Classification, Interval};

/// OK iff `y` is finite and `interval.min <= y <= interval.max`.
///
/// NaN and infinite outputs are always NG, however wide the interval.
pub fn classify(y: f64, interval: &Interval) -> Classification {
    if y.is_finite() && interval.contains(y) {
        Classification::Ok
    } else {
        Classification::Ng
    }
}
