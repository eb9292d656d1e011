//! Per-attribute similarity functions
//!
//! Each function returns an unweighted similarity where 1.0 means identical.

use orderflow_core::Category;

/// Relative price similarity: `1 - |a - b| / max(a, b)`
///
/// Equal prices (including both zero) are a perfect match. When the prices
/// differ but the larger one is not positive the ratio is undefined and the
/// similarity is 0.0. The result is not clamped: prices of opposite sign
/// give a negative similarity.
pub fn price_similarity(a: f64, b: f64) -> f64 {
    if a == b {
        return 1.0;
    }
    let max = a.max(b);
    if max <= 0.0 {
        return 0.0;
    }
    1.0 - (a - b).abs() / max
}

/// Exact label match
///
/// Two missing labels match, so a product with empty categories is still
/// identical to itself. A missing label never matches a present one.
pub fn category_similarity(a: Option<&Category>, b: Option<&Category>) -> f64 {
    if a == b {
        1.0
    } else {
        0.0
    }
}

/// Round to 5 decimal places, half away from zero
pub fn round5(value: f64) -> f64 {
    (value * 100_000.0).round() / 100_000.0
}
