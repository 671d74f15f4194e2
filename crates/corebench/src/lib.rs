//! Corebench - Self-Verifying CPU Benchmarks in Rust
//!
//! Six classic kernels (linked-list recursion, Mandelbrot, permutations,
//! eight queens, prime sieve, towers of Hanoi), each of which checks its own
//! result against a known-correct value.
//!
//! # Example
//!
//! ```rust
//! use corebench::prelude::*;
//!
//! let sieve = SieveBenchmark::canonical();
//! let primes = sieve.run().unwrap();
//! assert_eq!(primes, 669);
//! assert!(sieve.verify(&primes).unwrap());
//! ```
//!
//! Whole batteries go through the harness:
//!
//! ```rust
//! use corebench::{Battery, BatteryConfig, BenchmarkSpec};
//!
//! let config = BatteryConfig::new()
//!     .with_warmup_count(0)
//!     .with_run_count(1)
//!     .with_benchmarks(vec![BenchmarkSpec::Queens, BenchmarkSpec::Tower { disks: 8 }]);
//!
//! assert!(Battery::new(config).run().all_verified());
//! ```

// Benchmark components
pub use corebench_core::{
    list, mandelbrot, permute, queens, sieve, tower, BenchError, Benchmark, DepthGuard,
    ListBenchmark, MandelbrotBenchmark, PermuteBenchmark, QueensBenchmark, SieveBenchmark,
    TowerBenchmark, DEFAULT_MAX_DEPTH,
};

// Battery configuration
pub use corebench_config::{BatteryConfig, BenchmarkSpec, ConfigError};

// Runner, results and reports
pub use corebench_harness::{
    Battery, BatteryResult, BenchmarkResult, BenchmarkRun, BenchmarkRunner, CsvExporter,
    HarnessError, JsonExporter, MarkdownReport, Outcome,
};

/// Colorful console output. Call [`console::init`] before running a battery.
#[cfg(feature = "console")]
pub use corebench_console as console;

pub mod prelude {
    pub use super::{
        Benchmark, ListBenchmark, MandelbrotBenchmark, PermuteBenchmark, QueensBenchmark,
        SieveBenchmark, TowerBenchmark,
    };
    pub use super::{Battery, BatteryConfig, BenchmarkSpec, Outcome};
}
