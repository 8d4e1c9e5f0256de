//! Exporters over built tables.

use triac_common::config::ExportFormat;
use triac_lut::FiringTable;
use triac_lut::export::{CSV_HEADER, render};

#[test]
fn c_header_for_reference_geometry() {
    let table = FiringTable::build(80).unwrap();
    let text = render(&table, ExportFormat::C, "FIRING_DELAYS", 12).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "// Auto-generated LUT of 80 entries");
    assert_eq!(lines[1], "#define FIRING_DELAYS_LEN 80U");
    assert_eq!(
        lines[2],
        "static const uint16_t FIRING_DELAYS[FIRING_DELAYS_LEN] = {"
    );
    assert_eq!(
        lines[3],
        "  0xffff, 0xdfd3, 0xd735, 0xd10c, 0xcc11, 0xc7cb, 0xc402, 0xc093, 0xbd69, 0xba77,"
    );
    assert_eq!(lines.len(), 3 + 8 + 1);
    assert_eq!(*lines.last().unwrap(), "};");
    assert!(lines[10].ends_with("0x0000"));
}

#[test]
fn csv_has_one_row_per_entry() {
    let table = FiringTable::build(10).unwrap();
    let text = render(&table, ExportFormat::Csv, "", 12).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines.len(), 11);
    assert_eq!(lines[1], "0,0.000000,0xffff,65535,1.000000");
    assert_eq!(lines[10], "9,1.000000,0x0000,0,0.000000");
    for (index, line) in lines[1..].iter().enumerate() {
        assert_eq!(line.split(',').count(), 5);
        assert!(line.starts_with(&format!("{index},")));
    }
}

#[test]
fn json_round_trips_entries() {
    let table = FiringTable::build(80).unwrap();
    let text = render(&table, ExportFormat::Json, "FIRING_DELAYS", 12).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["len"], 80);
    assert_eq!(value["firing_delays_scale"], 1264);
    let entries: Vec<u16> = serde_json::from_value(value["entries"].clone()).unwrap();
    assert_eq!(entries.as_slice(), table.as_slice());
}

#[test]
fn rust_array_declares_matching_length() {
    let table = FiringTable::build(200).unwrap();
    let text = render(&table, ExportFormat::Rust, "FIRING_DELAYS", 12).unwrap();
    assert!(text.contains("pub const FIRING_DELAYS_LEN: usize = 200;"));
    assert_eq!(text.matches("0x").count(), 200);
}
