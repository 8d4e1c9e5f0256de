//! Offline consistency checks for a firing delay table.
//!
//! Checks the structural invariants of the table and compares the engine's
//! interpolated delay against the exact inverter result at sample duties.
//! Findings are reported, never raised: the validator is a diagnostic and
//! does not stop the generator.

use bitflags::bitflags;
use serde::{Serialize, Serializer};
use tracing::{info, warn};
use triac_common::config::ValidationConfig;
use triac_common::consts::{
    DEFAULT_ERROR_BOUND_PCT, DEFAULT_SEMI_PERIOD_US, FULL_DELAY, MAX_TABLE_LEN, MIN_TABLE_LEN,
};

use crate::curve::duty_to_phase;
use crate::lookup::FiringDelayLookup;
use crate::table::quantize_phase;

bitflags! {
    /// Set of validator checks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Checks: u8 {
        /// Entries never increase.
        const MONOTONIC     = 0x01;
        /// First entry is the full-scale delay.
        const FIRST_ENTRY   = 0x02;
        /// Last entry is zero delay.
        const LAST_ENTRY    = 0x04;
        /// Interpolation error stays under the bound.
        const INTERPOLATION = 0x08;
        /// Length within `[MIN_TABLE_LEN, MAX_TABLE_LEN]`.
        const LENGTH        = 0x10;
    }
}

impl Default for Checks {
    fn default() -> Self {
        Self::empty()
    }
}

/// One failed check, with observed vs expected values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Finding {
    /// Length outside `[MIN_TABLE_LEN, MAX_TABLE_LEN]`.
    TableLength {
        /// Observed length.
        len: usize,
        /// Minimum supported length.
        min: usize,
        /// Maximum supported length.
        max: usize,
    },
    /// `table[index] < table[index + 1]`.
    NotMonotonic {
        /// Index of the smaller entry.
        index: usize,
        /// `table[index]`.
        value: u16,
        /// `table[index + 1]`.
        next: u16,
    },
    /// `table[0] != 0xFFFF`.
    FirstEntry {
        /// Observed first entry, `None` for an empty table.
        observed: Option<u16>,
        /// Required value.
        expected: u16,
    },
    /// `table[N − 1] != 0`.
    LastEntry {
        /// Observed last entry, `None` for an empty table.
        observed: Option<u16>,
        /// Required value.
        expected: u16,
    },
    /// Interpolated delay too far from the exact inverse.
    Interpolation {
        /// Quantized duty sample.
        sample: u32,
        /// Interpolated 16-bit delay.
        observed: u16,
        /// Exact delay, rounded to 16 bits.
        expected: u16,
        /// `|observed − expected|` in percent of the 16-bit range.
        error_pct: f64,
    },
    /// Checks that could not run. Counted as failed.
    Skipped {
        /// Checks not run.
        #[serde(serialize_with = "serialize_checks")]
        checks: Checks,
        /// Why they could not run.
        reason: String,
    },
}

impl Finding {
    /// Check this finding belongs to.
    pub fn check(&self) -> Checks {
        match self {
            Self::TableLength { .. } => Checks::LENGTH,
            Self::NotMonotonic { .. } => Checks::MONOTONIC,
            Self::FirstEntry { .. } => Checks::FIRST_ENTRY,
            Self::LastEntry { .. } => Checks::LAST_ENTRY,
            Self::Interpolation { .. } => Checks::INTERPOLATION,
            Self::Skipped { checks, .. } => *checks,
        }
    }
}

/// Interpolation result at one probed duty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleResult {
    /// Requested duty ratio.
    pub duty: f64,
    /// Quantized duty sample fed to the engine.
    pub sample: u32,
    /// Interpolated 16-bit delay.
    pub interpolated: u16,
    /// Exact delay, rounded to 16 bits.
    pub expected: u16,
    /// Error in percent of the 16-bit range.
    pub error_pct: f64,
    /// Absolute firing delay for the validator's semi-period.
    pub firing_delay: u32,
}

/// Outcome of [`Validator::validate`].
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Checks that failed.
    #[serde(skip)]
    pub failed: Checks,
    /// Every failed check instance, in discovery order.
    pub findings: Vec<Finding>,
    /// Per-duty interpolation results.
    pub samples: Vec<SampleResult>,
    /// Largest interpolation error over the probed duties, in percent.
    pub max_error_pct: f64,
}

impl ValidationReport {
    /// True when no check failed.
    #[inline]
    pub fn passed(&self) -> bool {
        self.failed.is_empty()
    }

    /// True when `check` passed.
    #[inline]
    pub fn check_passed(&self, check: Checks) -> bool {
        !self.failed.intersects(check)
    }
}

/// Outcome of [`Validator::sweep`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepSummary {
    /// Number of duty samples evaluated (`FIRING_DELAY_MAX + 1`).
    pub total: u32,
    /// Samples whose error reached the bound.
    pub over_bound: u32,
    /// Sample with the largest error.
    pub worst_sample: u32,
    /// Largest error, in percent.
    pub worst_error_pct: f64,
}

/// Table consistency validator.
#[derive(Debug, Clone)]
pub struct Validator {
    error_bound_pct: f64,
    sample_duties: Vec<f64>,
    semi_period: u32,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_BOUND_PCT)
    }
}

impl Validator {
    /// Validator with the default probe duties and semi-period.
    pub fn new(error_bound_pct: f64) -> Self {
        Self {
            error_bound_pct,
            sample_duties: ValidationConfig::default().sample_duties,
            semi_period: DEFAULT_SEMI_PERIOD_US,
        }
    }

    /// Validator configured from the `[validation]` section.
    pub fn from_config(config: &ValidationConfig) -> Self {
        Self {
            error_bound_pct: config.error_bound_pct,
            sample_duties: config.sample_duties.clone(),
            semi_period: config.semi_period,
        }
    }

    /// Replace the probe duties.
    pub fn with_samples(mut self, duties: impl Into<Vec<f64>>) -> Self {
        self.sample_duties = duties.into();
        self
    }

    /// Replace the semi-period used for reported absolute delays.
    pub fn with_semi_period(mut self, semi_period: u32) -> Self {
        self.semi_period = semi_period;
        self
    }

    /// Error bound in percent of the 16-bit range.
    #[inline]
    pub fn error_bound_pct(&self) -> f64 {
        self.error_bound_pct
    }

    /// Run all checks against `table`, read with `resolution_bits` duty samples.
    ///
    /// The interpolation check needs a usable engine. When the table or
    /// resolution rules one out, the check is reported as
    /// [`Finding::Skipped`] and counts as failed.
    pub fn validate(&self, table: &[u16], resolution_bits: u8) -> ValidationReport {
        let mut findings = Vec::new();

        if !(MIN_TABLE_LEN..=MAX_TABLE_LEN).contains(&table.len()) {
            findings.push(Finding::TableLength {
                len: table.len(),
                min: MIN_TABLE_LEN,
                max: MAX_TABLE_LEN,
            });
        }

        for (index, pair) in table.windows(2).enumerate() {
            if pair[0] < pair[1] {
                findings.push(Finding::NotMonotonic {
                    index,
                    value: pair[0],
                    next: pair[1],
                });
            }
        }
        let first = table.first().copied();
        if first != Some(FULL_DELAY) {
            findings.push(Finding::FirstEntry {
                observed: first,
                expected: FULL_DELAY,
            });
        }
        let last = table.last().copied();
        if last != Some(0) {
            findings.push(Finding::LastEntry {
                observed: last,
                expected: 0,
            });
        }

        let mut samples = Vec::with_capacity(self.sample_duties.len());
        let mut max_error_pct = 0.0_f64;
        match FiringDelayLookup::from_slice(table, resolution_bits) {
            Ok(engine) => {
                for &duty in &self.sample_duties {
                    let result = self.probe(&engine, duty);
                    max_error_pct = max_error_pct.max(result.error_pct);
                    if result.error_pct >= self.error_bound_pct {
                        findings.push(Finding::Interpolation {
                            sample: result.sample,
                            observed: result.interpolated,
                            expected: result.expected,
                            error_pct: result.error_pct,
                        });
                    }
                    samples.push(result);
                }
            }
            Err(e) => {
                warn!("Skipping interpolation check: {e}");
                findings.push(Finding::Skipped {
                    checks: Checks::INTERPOLATION,
                    reason: e.to_string(),
                });
            }
        }

        let failed = findings
            .iter()
            .fold(Checks::empty(), |acc, f| acc | f.check());
        for finding in &findings {
            warn!("Table check failed: {:?}", finding);
        }
        info!(
            "Validated {}-entry table: {} finding(s), max interpolation error {:.3}%",
            table.len(),
            findings.len(),
            max_error_pct
        );

        ValidationReport {
            failed,
            findings,
            samples,
            max_error_pct,
        }
    }

    /// Compare every quantized duty sample against the exact inverse.
    pub fn sweep(&self, engine: &FiringDelayLookup<'_>) -> SweepSummary {
        let max = engine.max_duty();
        let mut summary = SweepSummary {
            total: max + 1,
            over_bound: 0,
            worst_sample: 0,
            worst_error_pct: 0.0,
        };
        for sample in 0..=max {
            let error_pct = error_pct(engine.delay_ratio(sample), exact_delay(sample, max));
            if error_pct >= self.error_bound_pct {
                summary.over_bound += 1;
            }
            if error_pct > summary.worst_error_pct {
                summary.worst_error_pct = error_pct;
                summary.worst_sample = sample;
            }
        }
        info!(
            "Swept {} duty samples: worst error {:.3}% at d={}, {} at or over {:.3}%",
            summary.total,
            summary.worst_error_pct,
            summary.worst_sample,
            summary.over_bound,
            self.error_bound_pct
        );
        summary
    }

    fn probe(&self, engine: &FiringDelayLookup<'_>, duty: f64) -> SampleResult {
        let sample = engine.quantize(duty as f32);
        let interpolated = engine.delay_ratio(sample);
        let expected = exact_delay(sample, engine.max_duty());
        SampleResult {
            duty,
            sample,
            interpolated,
            expected,
            error_pct: error_pct(interpolated, expected),
            firing_delay: engine.firing_delay(sample, self.semi_period),
        }
    }
}

/// Exact 16-bit delay for quantized duty `sample` out of `max`.
pub fn exact_delay(sample: u32, max: u32) -> u16 {
    quantize_phase(duty_to_phase(f64::from(sample) / f64::from(max)))
}

fn serialize_checks<S: Serializer>(checks: &Checks, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(checks.iter_names().map(|(name, _)| name))
}

#[inline]
fn error_pct(observed: u16, expected: u16) -> f64 {
    f64::from(observed.abs_diff(expected)) / f64::from(FULL_DELAY) * 100.0
}
