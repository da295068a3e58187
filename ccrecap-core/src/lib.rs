//! # ccrecap-core
//!
//! Core library for ccrecap - a Claude Code usage recap generator.
//!
//! This library provides:
//! - Record types for the three local data sources (summary cache,
//!   prompt history, session transcripts)
//! - A fault-tolerant loader that reads all three sources
//! - Independent statistical analyzers (tools, prompts, time patterns,
//!   prompt sampling)
//! - Assembly of one normalized JSON report
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! The pipeline is a single sequential batch pass:
//!
//! ```text
//! Loader -> { tools, prompts, temporal, sampler } -> Report
//! ```
//!
//! Every stage is a pure function of the loaded records; nothing
//! persists between runs. Malformed files and lines degrade the output
//! rather than aborting it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ccrecap_core::analytics::{Report, ReportOptions};
//! use ccrecap_core::ingest::Loader;
//!
//! let data = Loader::new().load();
//! let report = Report::build(&data, &ReportOptions::default(), chrono::Local::now());
//! ```

// Re-export commonly used items at the crate root
pub use config::Config;
pub use error::{Error, Result};
pub use ingest::{LoadedData, Loader};

// Public modules
pub mod analytics;
pub mod config;
pub mod error;
pub mod ingest;
pub mod languages;
pub mod logging;
pub mod types;
