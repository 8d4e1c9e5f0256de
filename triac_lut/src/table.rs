//! Firing delay lookup table.
//!
//! Entry `i` holds the 16-bit firing delay for duty `i / (N − 1)`:
//!
//! ```text
//! table[i] = round(duty_to_phase(i / (N − 1)) × 0xFFFF)
//! ```
//!
//! Invariants (checked on every construction path):
//! - `2 ≤ N ≤ MAX_TABLE_LEN`
//! - `table[0] == 0xFFFF`, `table[N − 1] == 0`
//! - non-increasing
//!
//! The table is built once during initialization and never mutated; there
//! is no `&mut` access after construction.

use serde::Serialize;
use tracing::debug;
use triac_common::prelude::{FULL_DELAY, MAX_TABLE_LEN, MIN_TABLE_LEN};

use crate::curve::duty_to_phase;
use crate::error::LutError;

/// Fixed-capacity backing storage (no heap).
pub type TableStorage = heapless::Vec<u16, MAX_TABLE_LEN>;

/// Frozen, validated firing delay table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FiringTable {
    delays: TableStorage,
}

impl FiringTable {
    /// Sample the curve inverter at `len` evenly spaced duties.
    ///
    /// # Errors
    ///
    /// - [`LutError::TableLength`] if `len` is outside `[2, MAX_TABLE_LEN]`
    /// - [`LutError::NotMonotonic`] if the rounded samples ever increase
    pub fn build(len: usize) -> Result<Self, LutError> {
        check_len(len)?;

        let last = (len - 1) as f64;
        let mut delays = TableStorage::new();
        for i in 0..len {
            let phase = duty_to_phase(i as f64 / last);
            delays
                .push(quantize_phase(phase))
                .map_err(|_| length_error(len))?;
        }

        check_monotonic(&delays)?;
        debug!(
            "Built firing delay table: len={}, first=0x{:04x}, mid=0x{:04x}, last=0x{:04x}",
            len,
            delays[0],
            delays[len / 2],
            delays[len - 1]
        );
        Ok(Self { delays })
    }

    /// Adopt an externally supplied table (e.g. a compiled-in array).
    ///
    /// # Errors
    ///
    /// - [`LutError::TableLength`] on bad length
    /// - [`LutError::BadBoundary`] if the endpoints are not `0xFFFF` / `0`
    /// - [`LutError::NotMonotonic`] on the first increasing pair
    pub fn from_slice(delays: &[u16]) -> Result<Self, LutError> {
        check_len(delays.len())?;
        check_boundaries(delays)?;
        check_monotonic(delays)?;

        let mut storage = TableStorage::new();
        for &delay in delays {
            storage
                .push(delay)
                .map_err(|_| length_error(delays.len()))?;
        }
        Ok(Self { delays: storage })
    }

    /// Table entries.
    #[inline]
    pub fn as_slice(&self) -> &[u16] {
        &self.delays
    }

    /// Number of entries N.
    #[inline]
    pub fn len(&self) -> usize {
        self.delays.len()
    }

    /// Always false: a table holds at least two entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }

    /// Duty ratio represented by entry `index`.
    #[inline]
    pub fn duty_at(&self, index: usize) -> f64 {
        index as f64 / (self.len() - 1) as f64
    }

    /// Delay ratio stored at entry `index`, in `[0, 1]`.
    #[inline]
    pub fn ratio_at(&self, index: usize) -> Option<f64> {
        self.delays
            .get(index)
            .map(|&d| f64::from(d) / f64::from(FULL_DELAY))
    }
}

impl AsRef<[u16]> for FiringTable {
    fn as_ref(&self) -> &[u16] {
        self.as_slice()
    }
}

/// Scale a delay ratio to 16 bits, rounding to nearest and clamping.
#[inline]
pub fn quantize_phase(phase: f64) -> u16 {
    (phase * f64::from(FULL_DELAY))
        .round()
        .clamp(0.0, f64::from(FULL_DELAY)) as u16
}

/// First index `i` with `delays[i] < delays[i + 1]`, as an error.
pub fn check_monotonic(delays: &[u16]) -> Result<(), LutError> {
    match delays.windows(2).position(|w| w[0] < w[1]) {
        Some(index) => Err(LutError::NotMonotonic {
            index,
            value: delays[index],
            next: delays[index + 1],
        }),
        None => Ok(()),
    }
}

fn check_boundaries(delays: &[u16]) -> Result<(), LutError> {
    let last = delays.len() - 1;
    if delays[0] != FULL_DELAY {
        return Err(LutError::BadBoundary {
            index: 0,
            value: delays[0],
            expected: FULL_DELAY,
        });
    }
    if delays[last] != 0 {
        return Err(LutError::BadBoundary {
            index: last,
            value: delays[last],
            expected: 0,
        });
    }
    Ok(())
}

fn check_len(len: usize) -> Result<(), LutError> {
    if (MIN_TABLE_LEN..=MAX_TABLE_LEN).contains(&len) {
        Ok(())
    } else {
        Err(length_error(len))
    }
}

fn length_error(len: usize) -> LutError {
    LutError::TableLength {
        len,
        min: MIN_TABLE_LEN,
        max: MAX_TABLE_LEN,
    }
}
