//! Benchmark result types.

use std::time::Duration;

use serde::Serialize;

/// How a single measured run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The result matched the known-correct value.
    Verified,
    /// The benchmark completed but produced a wrong result.
    Mismatch,
    /// The benchmark could not complete or could not be verified.
    Failed(String),
}

impl Outcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Short status label for reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Mismatch => "mismatch",
            Self::Failed(_) => "failed",
        }
    }
}

/// Result of a single benchmark run.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkRun {
    /// Run index (0-based).
    pub run_index: usize,
    /// Wall-clock time of `run` (verification excluded).
    pub duration: Duration,
    /// Produced value, absent when the run failed.
    pub result: Option<String>,
    /// Verification outcome.
    pub outcome: Outcome,
}

impl BenchmarkRun {
    /// Duration in fractional milliseconds.
    ///
    /// # Example
    ///
    /// ```
    /// use corebench_harness::{BenchmarkRun, Outcome};
    /// use std::time::Duration;
    ///
    /// let run = BenchmarkRun {
    ///     run_index: 0,
    ///     duration: Duration::from_micros(2500),
    ///     result: Some("669".to_string()),
    ///     outcome: Outcome::Verified,
    /// };
    ///
    /// assert!((run.duration_ms() - 2.5).abs() < 1e-9);
    /// ```
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

/// Aggregated results from all measured runs of one benchmark.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkResult {
    /// Component name, e.g. `sieve`.
    pub name: String,
    /// Battery label, e.g. `sieve:5000`.
    pub label: String,
    /// Parameter summary reported by the component.
    pub params: String,
    /// Individual runs.
    pub runs: Vec<BenchmarkRun>,
}

impl BenchmarkResult {
    /// Creates a new benchmark result.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        params: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            params: params.into(),
            runs: Vec::new(),
        }
    }

    /// Result for a benchmark that could not even be constructed.
    pub fn setup_failure(
        name: impl Into<String>,
        label: impl Into<String>,
        error: impl ToString,
    ) -> Self {
        let mut result = Self::new(name, label, "");
        result.add_run(BenchmarkRun {
            run_index: 0,
            duration: Duration::ZERO,
            result: None,
            outcome: Outcome::Failed(error.to_string()),
        });
        result
    }

    /// Adds a run to the results.
    pub fn add_run(&mut self, run: BenchmarkRun) {
        self.runs.push(run);
    }

    /// Returns the number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// True when there was at least one run and every run verified.
    ///
    /// # Example
    ///
    /// ```
    /// use corebench_harness::{BenchmarkResult, BenchmarkRun, Outcome};
    /// use std::time::Duration;
    ///
    /// let mut result = BenchmarkResult::new("queens", "queens", "repetitions=10");
    /// assert!(!result.is_verified());
    ///
    /// result.add_run(BenchmarkRun {
    ///     run_index: 0,
    ///     duration: Duration::from_millis(1),
    ///     result: Some("true".to_string()),
    ///     outcome: Outcome::Verified,
    /// });
    /// assert!(result.is_verified());
    /// ```
    pub fn is_verified(&self) -> bool {
        !self.runs.is_empty() && self.runs.iter().all(|r| r.outcome.is_verified())
    }

    /// The first run that did not verify.
    pub fn first_failure(&self) -> Option<&BenchmarkRun> {
        self.runs.iter().find(|r| !r.outcome.is_verified())
    }

    /// Overall outcome: the first non-verified outcome, else `Verified`.
    pub fn outcome(&self) -> Outcome {
        match self.first_failure() {
            Some(run) => run.outcome.clone(),
            None if self.runs.is_empty() => Outcome::Failed("no runs".to_string()),
            None => Outcome::Verified,
        }
    }

    /// Value produced by the first run.
    pub fn result(&self) -> Option<&str> {
        self.runs.first().and_then(|r| r.result.as_deref())
    }

    /// Returns the average run time.
    pub fn avg_duration(&self) -> Duration {
        if self.runs.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.runs.iter().map(|r| r.duration).sum();
        total / self.runs.len() as u32
    }

    /// Returns the minimum run time.
    pub fn min_duration(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.duration)
            .min()
            .unwrap_or(Duration::ZERO)
    }

    /// Returns the maximum run time.
    pub fn max_duration(&self) -> Duration {
        self.runs
            .iter()
            .map(|r| r.duration)
            .max()
            .unwrap_or(Duration::ZERO)
    }
}

/// Results of every benchmark in a battery, in configuration order.
#[derive(Debug, Clone, Serialize)]
pub struct BatteryResult {
    pub results: Vec<BenchmarkResult>,
    /// Wall-clock time of the whole battery, warmups included.
    pub total_duration: Duration,
}

impl BatteryResult {
    pub fn new(results: Vec<BenchmarkResult>, total_duration: Duration) -> Self {
        Self {
            results,
            total_duration,
        }
    }

    /// One flag per benchmark, `true` when it verified.
    pub fn verification_flags(&self) -> Vec<bool> {
        self.results.iter().map(BenchmarkResult::is_verified).collect()
    }

    pub fn all_verified(&self) -> bool {
        self.results.iter().all(BenchmarkResult::is_verified)
    }

    pub fn verified_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_verified()).count()
    }

    /// Benchmarks that produced a wrong result.
    pub fn mismatches(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.results
            .iter()
            .filter(|r| r.outcome() == Outcome::Mismatch)
    }

    /// Benchmarks that errored (setup, recursion limit, illegal state).
    pub fn failures(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome(), Outcome::Failed(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(index: usize, millis: u64, outcome: Outcome) -> BenchmarkRun {
        BenchmarkRun {
            run_index: index,
            duration: Duration::from_millis(millis),
            result: Some("10".to_string()),
            outcome,
        }
    }

    #[test]
    fn test_duration_stats() {
        let mut result = BenchmarkResult::new("list", "list", "");
        result.add_run(run(0, 100, Outcome::Verified));
        result.add_run(run(1, 200, Outcome::Verified));
        result.add_run(run(2, 300, Outcome::Verified));

        assert_eq!(result.avg_duration(), Duration::from_millis(200));
        assert_eq!(result.min_duration(), Duration::from_millis(100));
        assert_eq!(result.max_duration(), Duration::from_millis(300));
        assert_eq!(result.result(), Some("10"));
    }

    #[test]
    fn test_empty_result() {
        let result = BenchmarkResult::new("list", "list", "");
        assert_eq!(result.avg_duration(), Duration::ZERO);
        assert!(!result.is_verified());
        assert!(matches!(result.outcome(), Outcome::Failed(_)));
    }

    #[test]
    fn test_mismatch_is_reported_not_failed() {
        let mut result = BenchmarkResult::new("list", "list", "");
        result.add_run(run(0, 1, Outcome::Verified));
        result.add_run(run(1, 1, Outcome::Mismatch));

        assert!(!result.is_verified());
        assert_eq!(result.outcome(), Outcome::Mismatch);
        assert_eq!(result.first_failure().map(|r| r.run_index), Some(1));
    }

    #[test]
    fn test_setup_failure() {
        let result = BenchmarkResult::setup_failure("mandelbrot", "mandelbrot:3", "no oracle");
        assert_eq!(result.run_count(), 1);
        assert_eq!(result.outcome(), Outcome::Failed("no oracle".to_string()));
        assert_eq!(result.result(), None);
    }

    #[test]
    fn test_battery_flags() {
        let mut good = BenchmarkResult::new("sieve", "sieve:5000", "");
        good.add_run(run(0, 1, Outcome::Verified));
        let mut bad = BenchmarkResult::new("tower", "tower:13", "");
        bad.add_run(run(0, 1, Outcome::Mismatch));
        let broken = BenchmarkResult::setup_failure("mandelbrot", "mandelbrot:3", "no oracle");

        let battery = BatteryResult::new(vec![good, bad, broken], Duration::from_millis(3));
        assert_eq!(battery.verification_flags(), vec![true, false, false]);
        assert!(!battery.all_verified());
        assert_eq!(battery.verified_count(), 1);
        assert_eq!(battery.mismatches().count(), 1);
        assert_eq!(battery.failures().count(), 1);
    }
}
