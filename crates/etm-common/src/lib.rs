//! Common types for the etm migration engine.
//!
//! This crate provides the foundational configuration shared by every etm crate:
//! - Recognized legacy and target names (`MigrationNames`)
//! - Printer options handed through to the source printer (`PrinterOptions`)
//! - Loading both from a JSON config file (`config`)

// Legacy / target identifiers the engine recognizes
pub mod names;
pub use names::MigrationNames;

// Pass-through formatting preferences
pub mod options;
pub use options::{PrinterOptions, QuoteStyle};

// JSON configuration loading
pub mod config;
pub use config::EtmConfig;
