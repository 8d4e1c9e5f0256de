//! Phase-control dimmer helpers built on the lookup engine.
//!
//! Duty remapping, the conduction ("fire") ratio applied to the hardware,
//! and the power / harmonic metrics derived from it. Zero-cross detection,
//! timers and gate pulses stay with the caller.

pub mod harmonics;
pub mod limits;
pub mod phase_control;

pub use harmonics::{Harmonics, MAX_HARMONICS, harmonics, total_harmonic_distortion};
pub use limits::DutyCycleLimits;
pub use phase_control::PhaseControl;
