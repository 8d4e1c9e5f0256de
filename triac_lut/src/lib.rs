//! # TRIAC Firing Delay LUT
//!
//! Linearizes the power delivered by a phase-controlled TRIAC dimmer.
//! A requested power ratio is turned into the wait after the mains
//! zero-cross at which the gate must fire so the load receives that
//! fraction of full power.
//!
//! ## Pipeline
//!
//! 1. **curve**: continuous firing delay ↔ power transfer function and its
//!    bisection inverse (offline, floating point)
//! 2. **table**: frozen `u16` table of firing delay ratios sampled at
//!    evenly spaced duties
//! 3. **lookup**: fixed-point interpolation engine (run-time, integer only)
//! 4. **validate**: structural and accuracy checks of a table + engine pair
//! 5. **export**: C / Rust / CSV / JSON artifacts for firmware builds
//!
//! **dimmer** wraps the engine with the duty remapping and metrics a
//! phase-control output driver needs.
//!
//! ## Run-Time Path
//!
//! [`FiringDelayLookup`] borrows the frozen table and performs no
//! allocation, locking or floating point. Everything else is offline.

pub mod curve;
pub mod dimmer;
pub mod error;
pub mod export;
pub mod lookup;
pub mod table;
pub mod validate;

pub use error::LutError;
pub use lookup::{FiringDelayLookup, LookupTrace, firing_delay_max, firing_delays_scale};
pub use table::FiringTable;
pub use validate::{Checks, Finding, SweepSummary, ValidationReport, Validator};
