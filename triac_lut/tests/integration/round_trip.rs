//! Duty → delay → power round trip through the fixed-point engine.
//!
//! 80 entries, 12-bit duty samples: the reference firmware geometry.

use triac_lut::curve::{duty_to_phase, power_ratio};
use triac_lut::validate::exact_delay;
use triac_lut::{FiringDelayLookup, FiringTable, Validator};

const LEN: usize = 80;
const BITS: u8 = 12;

/// First sample past the first table segment, and first sample of the last.
const INTERIOR: std::ops::Range<u32> = 52..4044;

fn delay_error_pct(engine: &FiringDelayLookup<'_>, sample: u32) -> f64 {
    let observed = engine.delay_ratio(sample);
    let expected = exact_delay(sample, engine.max_duty());
    f64::from(observed.abs_diff(expected)) / 65535.0 * 100.0
}

#[test]
fn interior_segments_stay_under_one_percent() {
    let table = FiringTable::build(LEN).unwrap();
    let engine = FiringDelayLookup::new(&table, BITS).unwrap();

    for sample in INTERIOR {
        let err = delay_error_pct(&engine, sample);
        assert!(err < 1.0, "d={sample}: error {err:.4}%");
    }
}

#[test]
fn end_segments_stay_under_five_percent() {
    let table = FiringTable::build(LEN).unwrap();
    let engine = FiringDelayLookup::new(&table, BITS).unwrap();

    let worst = (0..=engine.max_duty())
        .map(|d| delay_error_pct(&engine, d))
        .fold(0.0_f64, f64::max);
    assert!(worst < 5.0, "worst error {worst:.4}%");
    // Flat ends of the curve: linear interpolation is visibly off there.
    assert!(worst > 1.0);
}

#[test]
fn delivered_power_tracks_request() {
    let table = FiringTable::build(LEN).unwrap();
    let engine = FiringDelayLookup::new(&table, BITS).unwrap();
    let max = f64::from(engine.max_duty());

    for sample in 0..=engine.max_duty() {
        let phase = f64::from(engine.delay_ratio(sample)) / 65535.0;
        let requested = f64::from(sample) / max;
        let delivered = power_ratio(phase);
        assert!(
            (delivered - requested).abs() < 0.01,
            "d={sample}: requested {requested:.4}, delivered {delivered:.4}"
        );
    }
}

#[test]
fn sweep_agrees_with_manual_scan() {
    let table = FiringTable::build(LEN).unwrap();
    let engine = FiringDelayLookup::new(&table, BITS).unwrap();
    let summary = Validator::new(1.0).sweep(&engine);

    let manual = (0..=engine.max_duty())
        .filter(|&d| delay_error_pct(&engine, d) >= 1.0)
        .count() as u32;
    assert_eq!(summary.over_bound, manual);
    assert!(
        (summary.worst_error_pct - delay_error_pct(&engine, summary.worst_sample)).abs() < 1e-12
    );
}

#[test]
fn half_duty_hits_mid_cycle() {
    let table = FiringTable::build(LEN).unwrap();
    let engine = FiringDelayLookup::new(&table, BITS).unwrap();
    let sample = engine.quantize(0.5);
    assert_eq!(sample, 2047);
    assert_eq!(engine.delay_ratio(sample), 32772);
    assert_eq!(engine.firing_delay(sample, 10_000), 5000);
}

#[test]
fn exact_half_duty_bypasses_interpolation() {
    // 80 entries put no sample at duty 0.5; the inverter still maps it exactly.
    assert!((duty_to_phase(0.5) - 0.5).abs() < 1e-9);
    let table = FiringTable::build(LEN).unwrap();
    assert_eq!(table.as_slice()[39], 32975);
    assert_eq!(table.as_slice()[40], 32560);
}
