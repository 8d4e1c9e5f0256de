//! TRIAC Common Library
//!
//! This crate provides shared constants and configuration loading utilities
//! for the firing delay table workspace.
//!
//! # Module Structure
//!
//! - [`consts`] - Table geometry limits and defaults
//! - [`config`] - Configuration loading traits and generator config schema
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use triac_common::consts::*;
//! use triac_common::config::{ConfigLoader, GeneratorConfig};
//! ```

pub mod config;
pub mod consts;
pub mod prelude;
