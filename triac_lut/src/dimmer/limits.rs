//! User duty cycle limit and `[min, max]` remapping.
//!
//! The user duty `d ∈ [0, limit]` is remapped linearly onto `[min, max]`:
//!
//! ```text
//! mapped = min + d · (max − min)
//! ```
//!
//! `min ≤ max` always holds: each bound is clamped against the other.

/// Duty cycle limit and remapping bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyCycleLimits {
    limit: f32,
    min: f32,
    max: f32,
}

impl Default for DutyCycleLimits {
    fn default() -> Self {
        Self {
            limit: 1.0,
            min: 0.0,
            max: 1.0,
        }
    }
}

impl DutyCycleLimits {
    /// Upper bound on the user duty, clamped to `[0, 1]`.
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.clamp(0.0, 1.0);
    }

    /// New "0" of the remapped range, clamped to `[0, max]`.
    pub fn set_min(&mut self, min: f32) {
        self.min = min.clamp(0.0, self.max);
    }

    /// New "1" of the remapped range, clamped to `[min, 1]`.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.clamp(self.min, 1.0);
    }

    #[inline]
    pub fn limit(&self) -> f32 {
        self.limit
    }

    #[inline]
    pub fn min(&self) -> f32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Clamp a user duty to `[0, limit]`.
    #[inline]
    pub fn constrain(&self, duty: f32) -> f32 {
        duty.clamp(0.0, self.limit)
    }

    /// Remap a constrained duty onto `[min, max]`.
    #[inline]
    pub fn map(&self, duty: f32) -> f32 {
        self.min + duty * (self.max - self.min)
    }
}
