//! Benchmark harness for corebench.
//!
//! Runs the benchmark components, checks every produced value against its
//! known-correct oracle, and exports the results.
//!
//! # Overview
//!
//! - [`BenchmarkRunner`] measures one component: warmup runs, then timed
//!   runs, each verified
//! - [`Battery`] runs every benchmark a [`corebench_config::BatteryConfig`]
//!   names, sequentially or on the rayon pool
//! - [`CsvExporter`], [`MarkdownReport`] and [`JsonExporter`] write reports
//!
//! A run ends in one of three [`Outcome`]s. A wrong value is a `Mismatch`;
//! an error from the component (recursion budget, illegal state, missing
//! oracle) is `Failed`. Neither aborts the battery.
//!
//! # Zero-Erasure Design
//!
//! The runner is generic over the component type, so the measured call is
//! monomorphized rather than dispatched through a trait object.
//!
//! # Example
//!
//! ```
//! use corebench_config::BatteryConfig;
//! use corebench_harness::Battery;
//!
//! let battery = Battery::new(BatteryConfig::new().with_warmup_count(0).with_run_count(1));
//! let result = battery.run();
//!
//! assert_eq!(result.verification_flags(), vec![true; 8]);
//! ```

mod battery;
mod error;
mod report;
mod result;
mod runner;

pub use battery::Battery;
pub use error::{HarnessError, Result};
pub use report::{CsvExporter, JsonExporter, MarkdownReport};
pub use result::{BatteryResult, BenchmarkResult, BenchmarkRun, Outcome};
pub use runner::BenchmarkRunner;
