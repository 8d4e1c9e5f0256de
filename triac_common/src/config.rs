//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! for the table generator, plus the generator's own configuration schema.
//!
//! # Usage
//!
//! ```rust,no_run
//! use triac_common::config::{ConfigLoader, ConfigError, GeneratorConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = GeneratorConfig::load(Path::new("lutgen.toml"))?;
//!     config.validate()?;
//!     println!("Table length: {}", config.table.len);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::consts::{
    DEFAULT_ARRAY_NAME, DEFAULT_ERROR_BOUND_PCT, DEFAULT_RESOLUTION_BITS,
    DEFAULT_SEMI_PERIOD_US, DEFAULT_TABLE_LEN, MAX_RESOLUTION_BITS, MAX_TABLE_LEN,
    MIN_RESOLUTION_BITS, MIN_TABLE_LEN,
};

/// Error type for configuration loading operations.
///
/// This enum represents all possible errors that can occur when loading
/// configuration files.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Represents the verbosity level of logging output.
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub const fn as_directive(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields shared by the workspace binaries.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Trait for loading configuration from TOML files.
///
/// This trait provides a default implementation that works with any type
/// implementing `serde::de::DeserializeOwned`.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;
        debug!("Read {} bytes of config from {}", content.len(), path.display());

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── Generator Config ───────────────────────────────────────────────

/// Output form of the generated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// C header: length define + `static const uint16_t` array.
    #[default]
    C,
    /// Rust source: length const + `pub static` array.
    Rust,
    /// Row-oriented CSV text table.
    Csv,
    /// JSON document with metadata and entries.
    Json,
}

/// Table geometry (`[table]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    /// Number of table entries N (default: 80).
    #[serde(default = "default_table_len")]
    pub len: usize,

    /// Bits of the run-time quantized duty sample R (default: 12).
    #[serde(default = "default_resolution_bits")]
    pub resolution_bits: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_TABLE_LEN,
            resolution_bits: DEFAULT_RESOLUTION_BITS,
        }
    }
}

/// Artifact output settings (`[export]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    /// Output form (default: c).
    #[serde(default)]
    pub format: ExportFormat,

    /// Symbol name of the exported array (default: FIRING_DELAYS).
    #[serde(default = "default_array_name")]
    pub array_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::default(),
            array_name: default_array_name(),
        }
    }
}

/// Offline consistency check settings (`[validation]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Run the validator after building (default: false).
    #[serde(default)]
    pub enabled: bool,

    /// Maximum interpolation error in percent of the 16-bit range (default: 1.0).
    #[serde(default = "default_error_bound_pct")]
    pub error_bound_pct: f64,

    /// Duty ratios probed by the interpolation check.
    #[serde(default = "default_sample_duties")]
    pub sample_duties: Vec<f64>,

    /// Semi-period used when reporting absolute delays [µs] (default: 10000).
    #[serde(default = "default_semi_period")]
    pub semi_period: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            error_bound_pct: DEFAULT_ERROR_BOUND_PCT,
            sample_duties: default_sample_duties(),
            semi_period: DEFAULT_SEMI_PERIOD_US,
        }
    }
}

/// Complete table generator configuration.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "info"
///
/// [table]
/// len = 80
/// resolution_bits = 12
///
/// [export]
/// format = "rust"
/// array_name = "FIRING_DELAYS"
///
/// [validation]
/// enabled = true
/// error_bound_pct = 1.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Logging settings.
    #[serde(default)]
    pub shared: SharedConfig,
    /// Table geometry.
    #[serde(default)]
    pub table: TableConfig,
    /// Artifact output.
    #[serde(default)]
    pub export: ExportConfig,
    /// Offline checks.
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_table_len() -> usize {
    DEFAULT_TABLE_LEN
}
fn default_resolution_bits() -> u8 {
    DEFAULT_RESOLUTION_BITS
}
fn default_array_name() -> String {
    DEFAULT_ARRAY_NAME.to_string()
}
fn default_error_bound_pct() -> f64 {
    DEFAULT_ERROR_BOUND_PCT
}
fn default_sample_duties() -> Vec<f64> {
    vec![0.1, 0.25, 0.5, 0.75, 0.9]
}
fn default_semi_period() -> u32 {
    DEFAULT_SEMI_PERIOD_US
}

impl GeneratorConfig {
    /// Validate parameter bounds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `table.len` is outside `[MIN_TABLE_LEN, MAX_TABLE_LEN]`
    /// - `table.resolution_bits` is outside `[MIN_RESOLUTION_BITS, MAX_RESOLUTION_BITS]`
    /// - `export.array_name` is not a valid C/Rust identifier
    /// - `validation.error_bound_pct` is outside `(0, 100]`
    /// - any `validation.sample_duties` entry is outside `[0, 1]`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let table = &self.table;
        if table.len < MIN_TABLE_LEN || table.len > MAX_TABLE_LEN {
            return Err(ConfigError::ValidationError(format!(
                "table.len {} out of range [{}, {}]",
                table.len, MIN_TABLE_LEN, MAX_TABLE_LEN
            )));
        }
        if table.resolution_bits < MIN_RESOLUTION_BITS
            || table.resolution_bits > MAX_RESOLUTION_BITS
        {
            return Err(ConfigError::ValidationError(format!(
                "table.resolution_bits {} out of range [{}, {}]",
                table.resolution_bits, MIN_RESOLUTION_BITS, MAX_RESOLUTION_BITS
            )));
        }
        if !is_identifier(&self.export.array_name) {
            return Err(ConfigError::ValidationError(format!(
                "export.array_name '{}' is not a valid identifier",
                self.export.array_name
            )));
        }
        let bound = self.validation.error_bound_pct;
        if !(bound > 0.0 && bound <= 100.0) {
            return Err(ConfigError::ValidationError(format!(
                "validation.error_bound_pct {bound} out of range (0, 100]"
            )));
        }
        if let Some(bad) = self
            .validation
            .sample_duties
            .iter()
            .find(|d| !(0.0..=1.0).contains(*d))
        {
            return Err(ConfigError::ValidationError(format!(
                "validation.sample_duties entry {bad} out of range [0, 1]"
            )));
        }
        Ok(())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
