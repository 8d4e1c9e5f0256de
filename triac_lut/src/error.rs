//! Error type for table construction and engine setup.
//!
//! The lookup hot path never fails; these errors only arise offline or
//! during initialization, before the first lookup.

use thiserror::Error;

/// Table construction / engine configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LutError {
    /// Table length outside the supported range.
    #[error("table length {len} out of range [{min}, {max}]")]
    TableLength {
        /// Requested length.
        len: usize,
        /// Minimum supported length.
        min: usize,
        /// Maximum supported length.
        max: usize,
    },

    /// Duty sample resolution outside `[1, 16]` bits.
    #[error("duty resolution of {bits} bits out of range [1, 16]")]
    Resolution {
        /// Requested resolution.
        bits: u8,
    },

    /// An entry is smaller than its successor.
    #[error("table not monotonic at index {index}: 0x{value:04x} < 0x{next:04x}")]
    NotMonotonic {
        /// Index of the offending entry.
        index: usize,
        /// Entry at `index`.
        value: u16,
        /// Entry at `index + 1`.
        next: u16,
    },

    /// First or last entry is not the full-scale / zero delay.
    #[error("table entry {index} is 0x{value:04x}, expected 0x{expected:04x}")]
    BadBoundary {
        /// Index of the boundary entry.
        index: usize,
        /// Observed value.
        value: u16,
        /// Required value.
        expected: u16,
    },

    /// Power LUT enabled without a known semi-period.
    #[error("power LUT needs a semi-period > 0")]
    MissingSemiPeriod,

    /// Writing an export artifact failed.
    #[error("failed to format table: {0}")]
    Format(#[from] std::fmt::Error),

    /// Serializing the JSON artifact failed.
    #[error("failed to serialize table: {0}")]
    Json(String),
}
