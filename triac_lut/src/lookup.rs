//! Fixed-point firing delay lookup (run-time critical path).
//!
//! Maps a quantized duty sample `d ∈ [0, 2^R − 1]` to a wait time after the
//! zero-cross, using integer arithmetic only:
//!
//! ```text
//! slot     = d · SCALE + SCALE/2          SCALE = (N − 1) · 2^(16 − R)
//! index    = min(slot >> 16, N − 2)
//! fraction = slot & 0xFFFF
//! delay    = a − (((a − b) · fraction) >> 16)     a = table[index], b = table[index + 1]
//! result   = (delay · P) >> 16
//! ```
//!
//! The engine holds a shared borrow of the frozen table and no other state:
//! no allocation, no locking, no loops. Safe to call from a timer callback.
//! Duty samples above `FIRING_DELAY_MAX` are saturated on entry.

use static_assertions::const_assert_eq;
use triac_common::consts::{
    FRACTION_BITS, FRACTION_MASK, MAX_RESOLUTION_BITS, MAX_TABLE_LEN, MIN_RESOLUTION_BITS,
    MIN_TABLE_LEN,
};

use crate::error::LutError;
use crate::table::{FiringTable, check_monotonic};

/// Largest valid quantized duty sample for `bits` of resolution.
#[inline]
pub const fn firing_delay_max(bits: u8) -> u32 {
    (1 << bits) - 1
}

/// Fixed-point step between duty-sample units and table-index units.
#[inline]
pub const fn firing_delays_scale(len: usize, bits: u8) -> u32 {
    (len as u32 - 1) * (1 << (FRACTION_BITS - bits as u32))
}

const_assert_eq!(firing_delay_max(12), 4095);
const_assert_eq!(firing_delays_scale(80, 12), 1264);
const_assert_eq!(firing_delays_scale(200, 12), 3184);

/// Every intermediate value of one lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupTrace {
    /// Duty sample after entry saturation.
    pub duty: u32,
    /// Fixed-point table position (integer part = index, low 16 bits = fraction).
    pub slot: u32,
    /// Lower table index of the interpolation pair.
    pub index: usize,
    /// `table[index]`.
    pub a: u32,
    /// `table[index + 1]`, or 0 past the end.
    pub b: u32,
    /// Interpolation fraction (1/65536 units).
    pub fraction: u32,
    /// Interpolated 16-bit delay ratio.
    pub delay: u16,
}

/// Fixed-point lookup engine over a frozen table.
#[derive(Debug, Clone, Copy)]
pub struct FiringDelayLookup<'a> {
    table: &'a [u16],
    resolution_bits: u8,
    max_duty: u32,
    scale: u32,
}

impl<'a> FiringDelayLookup<'a> {
    /// Engine over a table produced by [`FiringTable`].
    ///
    /// `resolution_bits` must match the resolution the caller quantizes
    /// duty samples with; a mismatch is not detectable here.
    ///
    /// # Errors
    ///
    /// [`LutError::Resolution`] if `resolution_bits` is outside `[1, 16]`.
    pub fn new(table: &'a FiringTable, resolution_bits: u8) -> Result<Self, LutError> {
        Self::with_checked_table(table.as_slice(), resolution_bits)
    }

    /// Engine over a raw table, e.g. a compiled-in `static` array.
    ///
    /// # Errors
    ///
    /// - [`LutError::TableLength`] on bad length
    /// - [`LutError::NotMonotonic`] on an increasing pair
    /// - [`LutError::Resolution`] on bad resolution
    pub fn from_slice(table: &'a [u16], resolution_bits: u8) -> Result<Self, LutError> {
        if !(MIN_TABLE_LEN..=MAX_TABLE_LEN).contains(&table.len()) {
            return Err(LutError::TableLength {
                len: table.len(),
                min: MIN_TABLE_LEN,
                max: MAX_TABLE_LEN,
            });
        }
        check_monotonic(table)?;
        Self::with_checked_table(table, resolution_bits)
    }

    fn with_checked_table(table: &'a [u16], resolution_bits: u8) -> Result<Self, LutError> {
        if !(MIN_RESOLUTION_BITS..=MAX_RESOLUTION_BITS).contains(&resolution_bits) {
            return Err(LutError::Resolution {
                bits: resolution_bits,
            });
        }
        Ok(Self {
            table,
            resolution_bits,
            max_duty: firing_delay_max(resolution_bits),
            scale: firing_delays_scale(table.len(), resolution_bits),
        })
    }

    /// Underlying table.
    #[inline]
    pub fn table(&self) -> &'a [u16] {
        self.table
    }

    /// Duty sample resolution R.
    #[inline]
    pub fn resolution_bits(&self) -> u8 {
        self.resolution_bits
    }

    /// `FIRING_DELAY_MAX = 2^R − 1`.
    #[inline]
    pub fn max_duty(&self) -> u32 {
        self.max_duty
    }

    /// `SCALE = (N − 1) · 2^(16 − R)`.
    #[inline]
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Quantize a duty ratio to a sample, truncating. Clamped to `[0, 1]`.
    #[inline]
    pub fn quantize(&self, duty: f32) -> u32 {
        (duty.clamp(0.0, 1.0) * self.max_duty as f32) as u32
    }

    /// Interpolated 16-bit delay ratio for duty sample `duty`.
    #[inline]
    pub fn delay_ratio(&self, duty: u32) -> u16 {
        self.trace(duty).delay
    }

    /// Firing delay for duty sample `duty`, in the time units of `semi_period`.
    #[inline]
    pub fn firing_delay(&self, duty: u32, semi_period: u32) -> u32 {
        let delay = u64::from(self.delay_ratio(duty));
        ((delay * u64::from(semi_period)) >> FRACTION_BITS) as u32
    }

    /// Run one lookup and return every intermediate value.
    #[inline]
    pub fn trace(&self, duty: u32) -> LookupTrace {
        let duty = duty.min(self.max_duty);
        let slot = duty * self.scale + (self.scale >> 1);

        let last_pair = self.table.len() - 2;
        let mut index = (slot >> FRACTION_BITS) as usize;
        if index > last_pair {
            index = last_pair;
        }

        let a = u32::from(self.table[index]);
        let b = self.table.get(index + 1).copied().map_or(0, u32::from);
        let fraction = slot & FRACTION_MASK;
        let delay = a - (((a - b) * fraction) >> FRACTION_BITS);

        LookupTrace {
            duty,
            slot,
            index,
            a,
            b,
            fraction,
            delay: delay as u16,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
