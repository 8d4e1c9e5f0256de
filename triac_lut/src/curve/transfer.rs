//! Firing delay ratio → delivered power ratio for a resistive load.
//!
//! ```text
//! P(φ) = sin(2π·φ) / (2π) − φ + 1        φ ∈ [0, 1]
//! ```
//!
//! `φ = 0` fires right after the zero-cross (full power), `φ = 1` fires at the
//! end of the half-cycle (no power). Strictly decreasing on `[0, 1]`.

use core::f64::consts::TAU;

/// Power ratio delivered when the gate fires at delay ratio `phase`.
#[inline]
pub fn power_ratio(phase: f64) -> f64 {
    (TAU * phase).sin() / TAU - phase + 1.0
}
