//! Odd current harmonics of a resistive load under phase control.
//!
//! The current is a sine cut off before the firing angle `α = π·(1 − fire)`
//! in each half-cycle. For odd `n`, the Fourier coefficients over one
//! half-cycle are:
//!
//! ```text
//! n = 1:  a₁ = (cos 2α − 1) / 2π
//!         b₁ = (π − α + ½·sin 2α) / π
//! n > 1:  aₙ = [1/(n−1) − 1/(n+1) + cos((n+1)α)/(n+1) − cos((n−1)α)/(n−1)] / π
//!         bₙ = [sin((n+1)α)/(n+1) − sin((n−1)α)/(n−1)] / π
//! ```
//!
//! Each harmonic is reported as `100 · |cₙ| / |c₁|` percent of the fundamental.

use core::f64::consts::PI;

/// Maximum number of harmonics returned (H1, H3, …, H41).
pub const MAX_HARMONICS: usize = 21;

/// Fundamental magnitude below which the load is considered not conducting.
const MIN_FUNDAMENTAL: f64 = 1e-3;

/// Harmonic magnitudes in percent of the fundamental: `[H1, H3, H5, …]`.
pub type Harmonics = heapless::Vec<f64, MAX_HARMONICS>;

/// First `count` odd harmonics (H1 = 100%) for conduction ratio `fire_ratio`.
///
/// `count` is capped at [`MAX_HARMONICS`]. Returns `None` when the load
/// barely conducts (fundamental below 0.1% of a full sine).
pub fn harmonics(fire_ratio: f64, count: usize) -> Option<Harmonics> {
    let alpha = PI * (1.0 - fire_ratio.clamp(0.0, 1.0));
    let fundamental = magnitude(alpha, 1);
    if fundamental <= MIN_FUNDAMENTAL {
        return None;
    }

    let series = (0..count.min(MAX_HARMONICS) as u32)
        .map(|i| 100.0 * magnitude(alpha, 2 * i + 1) / fundamental)
        .collect();
    Some(series)
}

/// Total harmonic distortion (ratio, not percent) of a harmonic series.
pub fn total_harmonic_distortion(series: &[f64]) -> f64 {
    match series.split_first() {
        Some((&h1, rest)) if h1 > 0.0 => rest.iter().map(|h| h * h).sum::<f64>().sqrt() / h1,
        _ => 0.0,
    }
}

fn magnitude(alpha: f64, n: u32) -> f64 {
    let (a, b) = if n == 1 {
        (
            ((2.0 * alpha).cos() - 1.0) / (2.0 * PI),
            (PI - alpha + 0.5 * (2.0 * alpha).sin()) / PI,
        )
    } else {
        let lo = f64::from(n - 1);
        let hi = f64::from(n + 1);
        (
            (1.0 / lo - 1.0 / hi + (hi * alpha).cos() / hi - (lo * alpha).cos() / lo) / PI,
            ((hi * alpha).sin() / hi - (lo * alpha).sin() / lo) / PI,
        )
    };
    a.hypot(b)
}
