//! Power ratio → firing delay ratio by bisection.
//!
//! [`power_ratio`] is monotonic decreasing, so the interval `[lo, hi]` keeps
//! the root bracketed: a target above `P(mid)` needs a smaller delay.
//! The iteration count is fixed; there is no convergence test.

use triac_common::consts::BISECTION_ITERATIONS;

use super::transfer::power_ratio;

/// Firing delay ratio whose [`power_ratio`] equals `duty`.
///
/// `duty ≤ 0` saturates to delay 1 and `duty ≥ 1` to delay 0. Both are exact.
#[inline]
pub fn duty_to_phase(duty: f64) -> f64 {
    duty_to_phase_with(duty, BISECTION_ITERATIONS)
}

/// [`duty_to_phase`] with an explicit bisection iteration count.
pub fn duty_to_phase_with(duty: f64, iterations: u32) -> f64 {
    if duty <= 0.0 {
        return 1.0;
    }
    if duty >= 1.0 {
        return 0.0;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    for _ in 0..iterations {
        let mid = (lo + hi) / 2.0;
        if duty > power_ratio(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo + hi) / 2.0
}
