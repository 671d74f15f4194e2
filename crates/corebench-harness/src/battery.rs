//! Battery execution.

use std::path::Path;
use std::time::Instant;

use corebench_config::{BatteryConfig, BenchmarkSpec};
use corebench_core::{
    Benchmark, ListBenchmark, MandelbrotBenchmark, PermuteBenchmark, QueensBenchmark,
    SieveBenchmark, TowerBenchmark,
};
use rayon::prelude::*;
use tracing::info;

use crate::error::Result;
use crate::report::{CsvExporter, JsonExporter, MarkdownReport};
use crate::result::{BatteryResult, BenchmarkResult};
use crate::runner::BenchmarkRunner;

/// Runs every benchmark a [`BatteryConfig`] names and writes its reports.
///
/// Each benchmark builds its own state, so parallel execution shares
/// nothing between components. Results always come back in configuration
/// order.
///
/// # Example
///
/// ```
/// use corebench_config::{BatteryConfig, BenchmarkSpec};
/// use corebench_harness::Battery;
///
/// let config = BatteryConfig::new()
///     .with_warmup_count(0)
///     .with_run_count(1)
///     .with_benchmarks(vec![
///         BenchmarkSpec::Mandelbrot { size: 1 },
///         BenchmarkSpec::Sieve { bound: 5000 },
///     ]);
///
/// let result = Battery::new(config).run();
/// assert_eq!(result.verification_flags(), vec![true, true]);
/// ```
pub struct Battery {
    config: BatteryConfig,
}

impl Battery {
    pub fn new(config: BatteryConfig) -> Self {
        Self { config }
    }

    /// Loads the battery definition from a TOML or YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BatteryConfig::load(path)?))
    }

    pub fn config(&self) -> &BatteryConfig {
        &self.config
    }

    /// Runs the configured benchmarks and collects their results.
    pub fn run(&self) -> BatteryResult {
        info!(
            event = "battery_start",
            benchmark_count = self.config.benchmarks.len() as u64,
            parallel = self.config.parallel,
            warmup_count = self.config.warmup_count as u64,
            run_count = self.config.run_count as u64,
        );

        let start = Instant::now();
        let results: Vec<BenchmarkResult> = if self.config.parallel {
            self.config
                .benchmarks
                .par_iter()
                .map(|spec| self.run_spec(*spec))
                .collect()
        } else {
            self.config
                .benchmarks
                .iter()
                .map(|spec| self.run_spec(*spec))
                .collect()
        };
        let battery = BatteryResult::new(results, start.elapsed());

        info!(
            event = "battery_end",
            verified = battery.verified_count() as u64,
            total = battery.results.len() as u64,
            duration_ms = battery.total_duration.as_millis() as u64,
        );

        battery
    }

    /// Runs a single benchmark with this battery's counts and recursion budget.
    pub fn run_spec(&self, spec: BenchmarkSpec) -> BenchmarkResult {
        let max_depth = self.config.max_depth;
        let label = spec.to_string();
        match spec {
            BenchmarkSpec::List => {
                self.measure(ListBenchmark::new().with_max_depth(max_depth), label)
            }
            BenchmarkSpec::Mandelbrot { size } => match MandelbrotBenchmark::new(size) {
                Ok(bench) => self.measure(bench, label),
                Err(err) => BenchmarkResult::setup_failure(spec.name(), label, err),
            },
            BenchmarkSpec::Permute => {
                self.measure(PermuteBenchmark::new().with_max_depth(max_depth), label)
            }
            BenchmarkSpec::Queens => {
                self.measure(QueensBenchmark::new().with_max_depth(max_depth), label)
            }
            BenchmarkSpec::Sieve { bound } => self.measure(SieveBenchmark::new(bound), label),
            BenchmarkSpec::Tower { disks } => {
                self.measure(TowerBenchmark::new(disks).with_max_depth(max_depth), label)
            }
        }
    }

    fn measure<B: Benchmark>(&self, benchmark: B, label: String) -> BenchmarkResult {
        BenchmarkRunner::new(benchmark, label)
            .with_warmup_count(self.config.warmup_count)
            .with_run_count(self.config.run_count)
            .run()
    }

    /// Writes every report the configuration asks for.
    pub fn write_reports(&self, battery: &BatteryResult) -> Result<()> {
        if let Some(path) = &self.config.csv_output {
            CsvExporter::to_file(battery, path)?;
            info!(event = "report_written", format = "csv", path = %path);
        }
        if let Some(path) = &self.config.markdown_output {
            MarkdownReport::to_file(battery, path)?;
            info!(event = "report_written", format = "markdown", path = %path);
        }
        if let Some(path) = &self.config.json_output {
            JsonExporter::to_file(battery, path)?;
            info!(event = "report_written", format = "json", path = %path);
        }
        Ok(())
    }
}
