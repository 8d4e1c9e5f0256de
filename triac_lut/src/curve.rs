//! Continuous firing delay ↔ power curve.
//!
//! Offline only: both functions use floating point and transcendental math.
//! The run-time path reads the frozen table built from them instead.

pub mod inverter;
pub mod transfer;

pub use inverter::{duty_to_phase, duty_to_phase_with};
pub use transfer::power_ratio;
