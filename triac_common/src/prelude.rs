//! Prelude module for common re-exports.
//!
//! This module provides convenient re-exports of commonly used types
//! so that consumers can do `use triac_common::prelude::*;` and get
//! the most important types without listing individual paths.
//!
//! # Usage
//!
//! ```rust
//! use triac_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, ExportConfig, ExportFormat, GeneratorConfig, SharedConfig,
    TableConfig, ValidationConfig,
};

// ─── Table Geometry ─────────────────────────────────────────────────
pub use crate::consts::{
    DEFAULT_RESOLUTION_BITS, DEFAULT_TABLE_LEN, FULL_DELAY, MAX_RESOLUTION_BITS, MAX_TABLE_LEN,
    MIN_TABLE_LEN,
};
