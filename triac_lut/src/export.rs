//! Table artifacts for firmware builds and offline inspection.
//!
//! - C / Rust: a named `u16` array plus a `<NAME>_LEN` length constant,
//!   ten lowercase hex values per line.
//! - CSV: `index,duty_cycle,firing_delay_hex,firing_delay_decimal,firing_delay_ratio`.
//! - JSON: table geometry, run-time scale constants and entries.

use std::fmt::Write;

use serde::Serialize;
use triac_common::prelude::{ExportFormat, FULL_DELAY};

use crate::error::LutError;
use crate::lookup::{firing_delay_max, firing_delays_scale};
use crate::table::FiringTable;

/// Values per line in array forms.
const VALUES_PER_LINE: usize = 10;

/// CSV header row.
pub const CSV_HEADER: &str =
    "index,duty_cycle,firing_delay_hex,firing_delay_decimal,firing_delay_ratio";

/// Render `table` in `format`.
///
/// `array_name` names the array symbol (C / Rust / JSON); `resolution_bits`
/// is recorded in the JSON document alongside the derived scale constants.
pub fn render(
    table: &FiringTable,
    format: ExportFormat,
    array_name: &str,
    resolution_bits: u8,
) -> Result<String, LutError> {
    match format {
        ExportFormat::C => c_array(table, array_name),
        ExportFormat::Rust => rust_array(table, array_name),
        ExportFormat::Csv => csv(table),
        ExportFormat::Json => json(table, array_name, resolution_bits),
    }
}

/// C header form.
pub fn c_array(table: &FiringTable, name: &str) -> Result<String, LutError> {
    let mut out = String::new();
    writeln!(out, "// Auto-generated LUT of {} entries", table.len())?;
    writeln!(out, "#define {name}_LEN {}U", table.len())?;
    writeln!(out, "static const uint16_t {name}[{name}_LEN] = {{")?;
    write_hex_rows(&mut out, table.as_slice(), "  ", false)?;
    writeln!(out, "}};")?;
    Ok(out)
}

/// Rust source form.
pub fn rust_array(table: &FiringTable, name: &str) -> Result<String, LutError> {
    let mut out = String::new();
    writeln!(out, "// Auto-generated LUT of {} entries", table.len())?;
    writeln!(out, "pub const {name}_LEN: usize = {};", table.len())?;
    writeln!(out, "pub static {name}: [u16; {name}_LEN] = [")?;
    write_hex_rows(&mut out, table.as_slice(), "    ", true)?;
    writeln!(out, "];")?;
    Ok(out)
}

/// CSV text table, one row per entry.
pub fn csv(table: &FiringTable) -> Result<String, LutError> {
    let mut out = String::new();
    writeln!(out, "{CSV_HEADER}")?;
    for (index, &delay) in table.as_slice().iter().enumerate() {
        writeln!(
            out,
            "{},{:.6},0x{:04x},{},{:.6}",
            index,
            table.duty_at(index),
            delay,
            delay,
            f64::from(delay) / f64::from(FULL_DELAY)
        )?;
    }
    Ok(out)
}

#[derive(Serialize)]
struct TableDocument<'a> {
    name: &'a str,
    len: usize,
    resolution_bits: u8,
    firing_delay_max: u32,
    firing_delays_scale: u32,
    entries: &'a FiringTable,
}

/// JSON document form.
pub fn json(table: &FiringTable, name: &str, resolution_bits: u8) -> Result<String, LutError> {
    let doc = TableDocument {
        name,
        len: table.len(),
        resolution_bits,
        firing_delay_max: firing_delay_max(resolution_bits),
        firing_delays_scale: firing_delays_scale(table.len(), resolution_bits),
        entries: table,
    };
    let mut out = serde_json::to_string_pretty(&doc).map_err(|e| LutError::Json(e.to_string()))?;
    out.push('\n');
    Ok(out)
}

fn write_hex_rows(
    out: &mut String,
    values: &[u16],
    indent: &str,
    trailing_comma: bool,
) -> Result<(), LutError> {
    let rows = values.chunks(VALUES_PER_LINE).count();
    for (row, chunk) in values.chunks(VALUES_PER_LINE).enumerate() {
        let line = chunk
            .iter()
            .map(|v| format!("0x{v:04x}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sep = if row + 1 < rows || trailing_comma { "," } else { "" };
        writeln!(out, "{indent}{line}{sep}")?;
    }
    Ok(())
}
