//! Estimation error measures and the theoretical standard errors of both sketches.

use std::f64::consts::E;

/// Return `|estimate - actual|`
#[inline]
pub fn absolute_error(estimate: f64, actual: usize) -> f64 {
    (estimate - actual as f64).abs()
}

/// Return `|estimate - actual| / actual`.
///
/// Zero when both are zero, infinite when only `actual` is zero.
#[inline]
pub fn relative_error(estimate: f64, actual: usize) -> f64 {
    if actual == 0 {
        return if estimate == 0.0 { 0.0 } else { f64::INFINITY };
    }
    absolute_error(estimate, actual) / actual as f64
}

/// Return error rate `1 / sqrt(m)` associated with `m` counters
#[inline]
pub fn error_rate_from_counters(m: usize) -> f64 {
    1.0 / (m as f64).sqrt()
}

/// Return expected relative standard error `1.04 / sqrt(m)` of HyperLogLog with `m` registers
#[inline]
pub fn hyperloglog_standard_error(m: usize) -> f64 {
    1.04 / (m as f64).sqrt()
}

/// Return approximate relative standard error `sqrt((n / (k * e))^(1/k) - 1)` of
/// Recordinality with `k` records over `n` distinct items.
pub fn recordinality_standard_error(n: usize, k: usize) -> f64 {
    if k == 0 {
        return f64::INFINITY;
    }
    let base = n as f64 / (k as f64 * E);
    let variance = base.powf(1.0 / k as f64) - 1.0;
    variance.max(0.0).sqrt()
}
