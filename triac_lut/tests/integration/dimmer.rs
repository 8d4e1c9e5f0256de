//! Dimmer driven by an engine over the reference table.

use triac_lut::curve::power_ratio;
use triac_lut::dimmer::{PhaseControl, total_harmonic_distortion};
use triac_lut::{FiringDelayLookup, FiringTable};

const SEMI_PERIOD: u32 = 10_000;

#[test]
fn zero_and_full_power_are_exact() {
    let table = FiringTable::build(10).unwrap();
    let engine = FiringDelayLookup::new(&table, 12).unwrap();
    let mut dimmer = PhaseControl::new(engine);
    dimmer.begin();
    dimmer.set_online(true);
    dimmer.enable_power_lut(SEMI_PERIOD).unwrap();

    dimmer.set_duty_cycle(0.0);
    assert_eq!(dimmer.firing_delay(), Some(SEMI_PERIOD));
    assert!(!dimmer.is_on());

    dimmer.set_duty_cycle(1.0);
    assert_eq!(dimmer.firing_delay(), Some(0));
    assert!(dimmer.is_on_at_full_power());
}

#[test]
fn quarter_power_fires_late() {
    let table = FiringTable::build(80).unwrap();
    let engine = FiringDelayLookup::new(&table, 12).unwrap();
    let mut dimmer = PhaseControl::new(engine);
    dimmer.begin();
    dimmer.set_online(true);
    dimmer.enable_power_lut(SEMI_PERIOD).unwrap();

    dimmer.set_duty_cycle(0.25);
    assert_eq!(dimmer.firing_delay(), Some(6324));
    let delivered = power_ratio(1.0 - f64::from(dimmer.duty_cycle_fire()));
    assert!((delivered - 0.25).abs() < 0.001, "delivered {delivered}");
}

#[test]
fn harmonics_grow_as_power_drops() {
    let table = FiringTable::build(80).unwrap();
    let engine = FiringDelayLookup::new(&table, 12).unwrap();
    let mut dimmer = PhaseControl::new(engine);
    dimmer.begin();
    dimmer.set_online(true);
    dimmer.enable_power_lut(SEMI_PERIOD).unwrap();

    dimmer.set_duty_cycle(0.9);
    let high = total_harmonic_distortion(&dimmer.harmonics(11).unwrap());
    dimmer.set_duty_cycle(0.3);
    let low = total_harmonic_distortion(&dimmer.harmonics(11).unwrap());
    assert!(low > high, "THD at 30% {low} vs 90% {high}");
}
