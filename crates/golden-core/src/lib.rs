//! Golden-file test orchestration for the laszlo interpreter.
//!
//! A suite is a directory of `.las` sources, each paired with a
//! `<name>_expected.txt` file holding the stdout the interpreter should print.

pub mod comparator;
pub mod discovery;
pub mod domain;
pub mod executor;
pub mod report;
pub mod reporter;
pub mod runner;

pub use domain::{GoldenError, GoldenErrorCategory, GoldenResult, RunSummary};
pub use reporter::{MemoryReporter, Reporter, TracingReporter};
pub use runner::{RunnerConfig, run_suite};
