//! Benchmark runner.

use std::hint::black_box;
use std::time::Instant;

use corebench_core::Benchmark;
use tracing::{debug, info, warn};

use crate::result::{BenchmarkResult, BenchmarkRun, Outcome};

/// Zero-erasure benchmark runner.
///
/// Executes one component several times, timing each `run` and checking
/// its value with `verify`. The component is stored as a concrete type
/// parameter, so no call goes through a trait object.
///
/// A run that errors ends the measurement: the algorithms are deterministic
/// and another attempt would fail the same way.
///
/// # Example
///
/// ```
/// use corebench_core::PermuteBenchmark;
/// use corebench_harness::BenchmarkRunner;
///
/// let result = BenchmarkRunner::new(PermuteBenchmark::new(), "permute")
///     .with_warmup_count(0)
///     .with_run_count(2)
///     .run();
///
/// assert_eq!(result.run_count(), 2);
/// assert!(result.is_verified());
/// assert_eq!(result.result(), Some("8660"));
/// ```
pub struct BenchmarkRunner<B: Benchmark> {
    benchmark: B,
    label: String,
    warmup_count: usize,
    run_count: usize,
}

impl<B: Benchmark> BenchmarkRunner<B> {
    /// Creates a runner with one warmup and three measured runs.
    pub fn new(benchmark: B, label: impl Into<String>) -> Self {
        Self {
            benchmark,
            label: label.into(),
            warmup_count: 1,
            run_count: 3,
        }
    }

    /// Sets the number of warmup iterations (not measured).
    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    /// Sets the number of measurement runs.
    pub fn with_run_count(mut self, count: usize) -> Self {
        self.run_count = count;
        self
    }

    pub fn benchmark(&self) -> &B {
        &self.benchmark
    }

    /// Runs warmups, then measurement runs, and returns the collected results.
    pub fn run(&self) -> BenchmarkResult {
        info!(
            event = "bench_start",
            benchmark = %self.label,
            params = %self.benchmark.params(),
            warmup_count = self.warmup_count as u64,
            run_count = self.run_count as u64,
        );

        for warmup in 0..self.warmup_count {
            if let Err(err) = black_box(self.benchmark.run()) {
                warn!(benchmark = %self.label, warmup, error = %err, "warmup run failed");
                break;
            }
        }

        let mut result = BenchmarkResult::new(
            self.benchmark.name(),
            &self.label,
            self.benchmark.params(),
        );

        for run_index in 0..self.run_count {
            let run = self.run_once(run_index);
            let failed = matches!(run.outcome, Outcome::Failed(_));
            result.add_run(run);
            if failed {
                break;
            }
        }

        let outcome = result.outcome();
        info!(
            event = "bench_end",
            benchmark = %self.label,
            result = result.result().unwrap_or("N/A"),
            status = outcome.label(),
            runs = result.run_count() as u64,
            avg_us = result.avg_duration().as_micros() as u64,
            min_us = result.min_duration().as_micros() as u64,
        );
        if let Outcome::Failed(reason) = &outcome {
            warn!(benchmark = %self.label, reason = %reason, "benchmark failed");
        }

        result
    }

    /// Executes and verifies a single measured run.
    fn run_once(&self, run_index: usize) -> BenchmarkRun {
        let start = Instant::now();
        let output = black_box(self.benchmark.run());
        let duration = start.elapsed();

        let (value, outcome) = match output {
            Ok(value) => {
                let outcome = match self.benchmark.verify(&value) {
                    Ok(true) => Outcome::Verified,
                    Ok(false) => Outcome::Mismatch,
                    Err(err) => Outcome::Failed(err.to_string()),
                };
                (Some(value.to_string()), outcome)
            }
            Err(err) => (None, Outcome::Failed(err.to_string())),
        };

        debug!(
            event = "run_end",
            benchmark = %self.label,
            run = run_index as u64,
            duration_us = duration.as_micros() as u64,
            result = value.as_deref().unwrap_or("N/A"),
            status = outcome.label(),
        );

        BenchmarkRun {
            run_index,
            duration,
            result: value,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corebench_core::{BenchError, Result};

    /// Returns a fixed value and checks it against another.
    struct Constant {
        value: u64,
        expected: u64,
    }

    impl Benchmark for Constant {
        type Output = u64;

        fn name(&self) -> &'static str {
            "constant"
        }

        fn run(&self) -> Result<u64> {
            Ok(self.value)
        }

        fn verify(&self, output: &u64) -> Result<bool> {
            Ok(*output == self.expected)
        }
    }

    struct Exhausted;

    impl Benchmark for Exhausted {
        type Output = u64;

        fn name(&self) -> &'static str {
            "exhausted"
        }

        fn run(&self) -> Result<u64> {
            Err(BenchError::RecursionLimit { limit: 1 })
        }

        fn verify(&self, _output: &u64) -> Result<bool> {
            Ok(true)
        }
    }

    #[test]
    fn test_verified_runs() {
        let result = BenchmarkRunner::new(Constant { value: 7, expected: 7 }, "constant")
            .with_run_count(4)
            .run();
        assert_eq!(result.run_count(), 4);
        assert!(result.is_verified());
        assert_eq!(result.result(), Some("7"));
        assert_eq!(result.name, "constant");
    }

    #[test]
    fn test_mismatch_keeps_measuring() {
        let result = BenchmarkRunner::new(Constant { value: 7, expected: 8 }, "constant")
            .with_run_count(3)
            .run();
        assert_eq!(result.run_count(), 3);
        assert_eq!(result.outcome(), Outcome::Mismatch);
    }

    #[test]
    fn test_error_stops_measuring() {
        let result = BenchmarkRunner::new(Exhausted, "exhausted")
            .with_run_count(5)
            .run();
        assert_eq!(result.run_count(), 1);
        assert_eq!(
            result.outcome(),
            Outcome::Failed("Recursion limit of 1 frames exceeded".to_string())
        );
        assert_eq!(result.result(), None);
    }
}
