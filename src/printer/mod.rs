//! # Printer Module
//!
//! This module provides printer line geometry.
//!
//! ## Modules
//!
//! - [`config`]: Chars-per-line configuration and paper presets

pub mod config;

pub use config::{DEFAULT_CHARS_PER_LINE, MAX_CHARS_PER_LINE, PrinterConfig};
