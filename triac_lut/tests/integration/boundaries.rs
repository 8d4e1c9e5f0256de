//! Boundary behavior of the engine on a 10-entry table.

use triac_lut::{FiringDelayLookup, FiringTable};

const SEMI_PERIOD: u32 = 10_000;

#[test]
fn ten_entry_table_values() {
    let table = FiringTable::build(10).unwrap();
    assert_eq!(
        table.as_slice(),
        &[65535, 47898, 42557, 38361, 34593, 30942, 27174, 22978, 17637, 0]
    );
}

#[test]
fn zero_duty_is_close_to_full_semi_period() {
    let table = FiringTable::build(10).unwrap();
    let engine = FiringDelayLookup::new(&table, 12).unwrap();

    // The half-step bias moves d=0 a fraction of a slot into the table.
    let trace = engine.trace(0);
    assert_eq!(trace.index, 0);
    assert_eq!(trace.delay, 65516);
    assert_eq!(engine.firing_delay(0, SEMI_PERIOD), 9996);
}

#[test]
fn full_duty_uses_last_pair() {
    let table = FiringTable::build(10).unwrap();
    let engine = FiringDelayLookup::new(&table, 12).unwrap();

    let trace = engine.trace(4095);
    assert_eq!(trace.index, 8);
    assert_eq!(trace.b, 0);
    assert_eq!(engine.firing_delay(4095, SEMI_PERIOD), 3);
    assert_eq!(engine.firing_delay(u32::MAX, SEMI_PERIOD), 3);
}

#[test]
fn index_never_leaves_table() {
    for len in [2, 3, 10, 80, 1024] {
        let table = FiringTable::build(len).unwrap();
        for bits in [1, 8, 12, 16] {
            let engine = FiringDelayLookup::new(&table, bits).unwrap();
            for duty in [0, 1, engine.max_duty() / 2, engine.max_duty(), u32::MAX] {
                let trace = engine.trace(duty);
                assert!(trace.index + 1 < len, "len {len}, bits {bits}, d={duty}");
            }
        }
    }
}

#[test]
fn zero_semi_period_gives_zero_delay() {
    let table = FiringTable::build(80).unwrap();
    let engine = FiringDelayLookup::new(&table, 12).unwrap();
    for duty in [0, 2048, 4095] {
        assert_eq!(engine.firing_delay(duty, 0), 0);
    }
}
