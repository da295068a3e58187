//! Statistical extraction passes and report assembly.
//!
//! The four analyzers are independent and order-insensitive; each is a
//! pure function over the loaded records. [`Report::build`] runs all
//! of them and merges the results.

pub mod counter;
pub mod prompts;
pub mod report;
pub mod sampler;
pub mod temporal;
pub mod tools;

pub use counter::Counter;
pub use report::{Report, ReportOptions};
