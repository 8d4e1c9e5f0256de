//! # TRIAC LUT Generator
//!
//! Builds the firing delay lookup table, optionally checks it, and writes it
//! out as a firmware artifact.
//!
//! # Usage
//!
//! ```bash
//! # Default 80-entry C header on stdout
//! triac_lutgen
//!
//! # 200 entries as a Rust array, into a file
//! triac_lutgen -n 200 -f rust -o src/firing_delays.rs
//!
//! # From a config file, with validation and a full sweep, verbose
//! triac_lutgen --config lutgen.toml --sweep -v
//! ```
//!
//! Logs go to stderr; the artifact goes to stdout unless `--output` is given.

#![deny(warnings)]

use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;
use triac_common::prelude::{ConfigError, ConfigLoader, ExportFormat, GeneratorConfig, LogLevel};
use triac_lut::export;
use triac_lut::{FiringDelayLookup, FiringTable, LutError, Validator};

/// Output form accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    C,
    Rust,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::C => Self::C,
            FormatArg::Rust => Self::Rust,
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
        }
    }
}

/// TRIAC LUT Generator - firing delay table for phase-control dimmers
#[derive(Parser, Debug)]
#[command(name = "triac_lutgen")]
#[command(author = "RTS007")]
#[command(version)]
#[command(about = "Generate the TRIAC firing delay lookup table")]
#[command(long_about = None)]
struct Args {
    /// Path to generator configuration (TOML). Flags override its values.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Number of table entries
    #[arg(short = 'n', long, value_name = "N")]
    table_size: Option<usize>,

    /// Bits of the run-time duty sample
    #[arg(short, long, value_name = "R")]
    resolution_bits: Option<u8>,

    /// Artifact form
    #[arg(short = 'f', long, value_enum)]
    output_format: Option<FormatArg>,

    /// Symbol name of the exported array
    #[arg(long, value_name = "NAME")]
    array_name: Option<String>,

    /// Run the table checks after building
    #[arg(long)]
    validate: bool,

    /// Interpolation error bound, percent of the 16-bit range
    #[arg(long, value_name = "PCT")]
    error_bound: Option<f64>,

    /// Semi-period used for reported absolute delays
    #[arg(long, value_name = "P")]
    semi_period: Option<u32>,

    /// Check every duty sample, not just the probe duties (implies --validate)
    #[arg(long)]
    sweep: bool,

    /// Write the artifact here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("Table generation failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Tracing needs the configured level, so it starts before the config
    // error (if any) is reported.
    let loaded = load_config(args.config.as_deref());
    let log_level = loaded
        .as_ref()
        .map(|c| c.shared.log_level)
        .unwrap_or_default();
    setup_tracing(&args, log_level);

    info!("TRIAC LUT Generator v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded?;
    apply_overrides(&mut config, &args);
    config.validate()?;
    debug!("Effective config: {:?}", config);

    let table = FiringTable::build(config.table.len)?;
    info!(
        "Built {}-entry table for {}-bit duty samples",
        table.len(),
        config.table.resolution_bits
    );

    if config.validation.enabled {
        run_checks(&config, &table, args.sweep)?;
    }

    let text = export::render(
        &table,
        config.export.format,
        &config.export.array_name,
        config.table.resolution_bits,
    )?;
    write_output(args.output.as_deref(), &text)?;

    Ok(())
}

/// Config file if given, defaults otherwise.
fn load_config(path: Option<&Path>) -> Result<GeneratorConfig, ConfigError> {
    match path {
        Some(path) => GeneratorConfig::load(path),
        None => Ok(GeneratorConfig::default()),
    }
}

/// Command-line flags take precedence over file values.
fn apply_overrides(config: &mut GeneratorConfig, args: &Args) {
    if let Some(len) = args.table_size {
        config.table.len = len;
    }
    if let Some(bits) = args.resolution_bits {
        config.table.resolution_bits = bits;
    }
    if let Some(format) = args.output_format {
        config.export.format = format.into();
    }
    if let Some(ref name) = args.array_name {
        config.export.array_name = name.clone();
    }
    if args.validate || args.sweep {
        config.validation.enabled = true;
    }
    if let Some(bound) = args.error_bound {
        config.validation.error_bound_pct = bound;
    }
    if let Some(semi_period) = args.semi_period {
        config.validation.semi_period = semi_period;
    }
}

/// Log the validator report. Findings are diagnostics, not failures.
fn run_checks(config: &GeneratorConfig, table: &FiringTable, sweep: bool) -> Result<(), LutError> {
    let validator = Validator::from_config(&config.validation);
    let report = validator.validate(table.as_slice(), config.table.resolution_bits);

    for sample in &report.samples {
        debug!(
            "duty {:.3} (d={}): delay 0x{:04x}, exact 0x{:04x}, error {:.4}%, fires after {}",
            sample.duty,
            sample.sample,
            sample.interpolated,
            sample.expected,
            sample.error_pct,
            sample.firing_delay
        );
    }
    if report.passed() {
        info!("All table checks passed");
    } else {
        warn!("{} table check(s) failed", report.findings.len());
    }

    if sweep {
        let engine = FiringDelayLookup::new(table, config.table.resolution_bits)?;
        let summary = validator.sweep(&engine);
        if summary.over_bound > 0 {
            warn!(
                "{} of {} duty samples at or over the {:.3}% bound",
                summary.over_bound,
                summary.total,
                validator.error_bound_pct()
            );
        }
    }
    Ok(())
}

fn write_output(path: Option<&Path>, text: &str) -> std::io::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            info!("Wrote {} bytes to {}", text.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the configured level.
fn setup_tracing(args: &Args, log_level: LogLevel) {
    let level: Directive = if args.verbose {
        LevelFilter::DEBUG.into()
    } else {
        log_level
            .as_directive()
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    };

    let filter = EnvFilter::from_default_env().add_directive(level);

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
