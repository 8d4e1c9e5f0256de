//! Workspace-wide constants for the firing delay table.
//!
//! Single source of truth for table geometry limits and defaults.
//! Imported by all crates; no duplication permitted.

use static_assertions::const_assert;

/// Minimum table length (one interpolation pair).
pub const MIN_TABLE_LEN: usize = 2;

/// Maximum table length (capacity of the fixed-size table storage).
pub const MAX_TABLE_LEN: usize = 1024;

/// Default table length.
pub const DEFAULT_TABLE_LEN: usize = 80;

/// Minimum quantized duty resolution in bits.
pub const MIN_RESOLUTION_BITS: u8 = 1;

/// Maximum quantized duty resolution in bits (the table is 16-bit fixed point).
pub const MAX_RESOLUTION_BITS: u8 = 16;

/// Default quantized duty resolution in bits.
pub const DEFAULT_RESOLUTION_BITS: u8 = 12;

/// Full-scale 16-bit firing delay (duty 0 → fire at the end of the half-cycle).
pub const FULL_DELAY: u16 = 0xFFFF;

/// Fixed-point fraction width used by the lookup engine.
pub const FRACTION_BITS: u32 = 16;

/// Fixed-point fraction mask.
pub const FRACTION_MASK: u32 = (1 << FRACTION_BITS) - 1;

/// Bisection iterations used by the curve inverter (~2⁻³² interval width).
pub const BISECTION_ITERATIONS: u32 = 32;

/// Default semi-period for validation in µs (50 Hz mains).
pub const DEFAULT_SEMI_PERIOD_US: u32 = 10_000;

/// Default interpolation error bound in percent of the 16-bit range.
pub const DEFAULT_ERROR_BOUND_PCT: f64 = 1.0;

/// Default name of the exported table symbol.
pub const DEFAULT_ARRAY_NAME: &str = "FIRING_DELAYS";

// The fixed-point slot `d · SCALE + SCALE/2` stays below `len << 16`.
const_assert!((MAX_TABLE_LEN as u64) << FRACTION_BITS <= u32::MAX as u64);
const_assert!(MIN_TABLE_LEN >= 2);
const_assert!(DEFAULT_TABLE_LEN >= MIN_TABLE_LEN && DEFAULT_TABLE_LEN <= MAX_TABLE_LEN);
const_assert!(DEFAULT_RESOLUTION_BITS >= MIN_RESOLUTION_BITS);
const_assert!(DEFAULT_RESOLUTION_BITS <= MAX_RESOLUTION_BITS);
