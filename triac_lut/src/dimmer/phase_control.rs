//! Phase-control dimmer state: user duty → conduction ratio.
//!
//! With the power LUT enabled, the remapped duty is treated as a power ratio
//! and converted through the lookup engine:
//!
//! ```text
//! fire = 1 − firing_delay(quantize(mapped), P) / P
//! ```
//!
//! `mapped == 0` and `mapped == 1` short-circuit to fire ratios 0 and 1 so
//! the endpoints are exact regardless of the engine's rounding bias.
//! Without the LUT the mapped duty is used as the conduction ratio directly.

use crate::curve::power_ratio;
use crate::error::LutError;
use crate::lookup::FiringDelayLookup;

use super::harmonics::{Harmonics, harmonics};
use super::limits::DutyCycleLimits;

/// Dimmer state for one phase-controlled output.
#[derive(Debug, Clone, Copy)]
pub struct PhaseControl<'a> {
    engine: FiringDelayLookup<'a>,
    limits: DutyCycleLimits,
    duty_cycle: f32,
    fire_ratio: f32,
    power_lut: bool,
    semi_period: u32,
    enabled: bool,
    online: bool,
}

impl<'a> PhaseControl<'a> {
    /// Disabled, offline dimmer at zero duty, power LUT disabled.
    pub fn new(engine: FiringDelayLookup<'a>) -> Self {
        Self {
            engine,
            limits: DutyCycleLimits::default(),
            duty_cycle: 0.0,
            fire_ratio: 0.0,
            power_lut: false,
            semi_period: 0,
            enabled: false,
            online: false,
        }
    }

    // ─── Power LUT ──────────────────────────────────────────────

    /// Enable the power LUT.
    ///
    /// A non-zero `semi_period` replaces the stored one; zero keeps it.
    ///
    /// # Errors
    ///
    /// [`LutError::MissingSemiPeriod`] if no semi-period is known.
    pub fn enable_power_lut(&mut self, semi_period: u32) -> Result<(), LutError> {
        if semi_period > 0 {
            self.semi_period = semi_period;
        } else if self.semi_period == 0 {
            return Err(LutError::MissingSemiPeriod);
        }
        self.power_lut = true;
        self.apply();
        Ok(())
    }

    /// Disable the power LUT. The stored semi-period is kept.
    pub fn disable_power_lut(&mut self) {
        self.power_lut = false;
        self.apply();
    }

    #[inline]
    pub fn is_power_lut_enabled(&self) -> bool {
        self.power_lut
    }

    /// Update the measured semi-period (e.g. once per half-cycle).
    pub fn set_semi_period(&mut self, semi_period: u32) {
        self.semi_period = semi_period;
        self.apply();
    }

    /// Semi-period used by the LUT, 0 when the LUT is disabled.
    #[inline]
    pub fn power_lut_semi_period(&self) -> u32 {
        if self.power_lut { self.semi_period } else { 0 }
    }

    // ─── State ──────────────────────────────────────────────────

    /// Mark the output driver initialized.
    pub fn begin(&mut self) {
        self.enabled = true;
    }

    /// Release the output driver. Duty settings are kept.
    pub fn end(&mut self) {
        self.enabled = false;
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Mark the output online/offline (e.g. zero-cross signal present).
    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    /// Enabled, online, and with the LUT enabled, a semi-period is known.
    #[inline]
    pub fn is_online(&self) -> bool {
        self.enabled && self.online && (!self.power_lut || self.semi_period > 0)
    }

    #[inline]
    pub fn is_on(&self) -> bool {
        self.is_online() && self.duty_cycle > 0.0
    }

    #[inline]
    pub fn is_on_at_full_power(&self) -> bool {
        self.duty_cycle >= self.limits.max()
    }

    // ─── Duty Cycle ─────────────────────────────────────────────

    /// Set the user duty in `[0, 1]`; returns whether the output is online.
    pub fn set_duty_cycle(&mut self, duty: f32) -> bool {
        self.duty_cycle = self.limits.constrain(duty);
        self.apply();
        self.is_online()
    }

    /// Cap the user duty; lowers the current duty if it exceeds the cap.
    pub fn set_duty_cycle_limit(&mut self, limit: f32) {
        self.limits.set_limit(limit);
        if self.duty_cycle > self.limits.limit() {
            self.set_duty_cycle(self.limits.limit());
        }
    }

    /// New "0" of the remapped range.
    pub fn set_duty_cycle_min(&mut self, min: f32) {
        self.limits.set_min(min);
        self.set_duty_cycle(self.duty_cycle);
    }

    /// New "1" of the remapped range.
    pub fn set_duty_cycle_max(&mut self, max: f32) {
        self.limits.set_max(max);
        self.set_duty_cycle(self.duty_cycle);
    }

    #[inline]
    pub fn limits(&self) -> &DutyCycleLimits {
        &self.limits
    }

    /// User duty as last set (after the limit).
    #[inline]
    pub fn duty_cycle(&self) -> f32 {
        self.duty_cycle
    }

    /// User duty remapped onto `[min, max]`.
    #[inline]
    pub fn duty_cycle_mapped(&self) -> f32 {
        self.limits.map(self.duty_cycle)
    }

    /// Conduction ratio applied to the hardware; 0 while offline.
    #[inline]
    pub fn duty_cycle_fire(&self) -> f32 {
        if self.is_online() { self.fire_ratio } else { 0.0 }
    }

    // ─── Metrics ────────────────────────────────────────────────

    /// Wait after the zero-cross before firing, in semi-period units.
    ///
    /// Equals the semi-period at zero conduction and 0 at full conduction.
    /// `None` while no semi-period is known.
    pub fn firing_delay(&self) -> Option<u32> {
        if self.semi_period == 0 {
            return None;
        }
        let wait = self.semi_period as f32 * (1.0 - self.duty_cycle_fire());
        Some(wait.round() as u32)
    }

    /// Delivered power ratio.
    ///
    /// With the LUT, the mapped duty already is the linearized power ratio.
    /// Without it, the conduction ratio is linear in time and the power
    /// follows the sine-integral curve.
    pub fn power_ratio(&self) -> f32 {
        if self.power_lut {
            self.duty_cycle_mapped()
        } else {
            power_ratio(1.0 - f64::from(self.duty_cycle_fire())) as f32
        }
    }

    /// Odd current harmonics at the current conduction ratio.
    pub fn harmonics(&self, count: usize) -> Option<Harmonics> {
        harmonics(f64::from(self.duty_cycle_fire()), count)
    }

    fn apply(&mut self) {
        let mapped = self.duty_cycle_mapped();
        self.fire_ratio = if !self.power_lut {
            mapped
        } else if mapped <= 0.0 {
            0.0
        } else if mapped >= 1.0 {
            1.0
        } else if self.semi_period > 0 {
            let sample = self.engine.quantize(mapped);
            let delay = self.engine.firing_delay(sample, self.semi_period);
            1.0 - delay as f32 / self.semi_period as f32
        } else {
            mapped
        };
    }
}
