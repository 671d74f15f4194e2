//! Report generation for battery results.

use std::fmt::{self, Display};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::result::{BatteryResult, BenchmarkResult, Outcome};

fn millis(duration: std::time::Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// CSV exporter for battery results.
///
/// One row per measured run, with the benchmark label, its parameters,
/// run time, produced value and verification status.
///
/// # Example
///
/// ```
/// use corebench_harness::{BatteryResult, CsvExporter};
/// use std::time::Duration;
///
/// let battery = BatteryResult::new(vec![], Duration::ZERO);
/// let csv = CsvExporter::to_string(&battery);
/// assert!(csv.starts_with("benchmark,params,run_index,time_us,result,status"));
/// ```
pub struct CsvExporter;

struct CsvTable<'a>(&'a BatteryResult);

impl Display for CsvTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "benchmark,params,run_index,time_us,result,status")?;
        for result in &self.0.results {
            for run in &result.runs {
                writeln!(
                    f,
                    "{},\"{}\",{},{},{},{}",
                    result.label,
                    result.params,
                    run.run_index,
                    run.duration.as_micros(),
                    run.result.as_deref().unwrap_or(""),
                    run.outcome.label(),
                )?;
            }
        }
        Ok(())
    }
}

impl CsvExporter {
    /// Exports battery results to a CSV string.
    pub fn to_string(battery: &BatteryResult) -> String {
        CsvTable(battery).to_string()
    }

    /// Exports battery results to a CSV file.
    pub fn to_file(battery: &BatteryResult, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(battery))
    }

    /// Writes battery results as CSV to a writer.
    pub fn write<W: Write>(battery: &BatteryResult, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(battery).as_bytes())
    }
}

/// Markdown report generator.
///
/// # Example
///
/// ```
/// use corebench_harness::{BatteryResult, MarkdownReport};
/// use std::time::Duration;
///
/// let battery = BatteryResult::new(vec![], Duration::ZERO);
/// let md = MarkdownReport::to_string(&battery);
/// assert!(md.contains("# Corebench Battery"));
/// assert!(md.contains("*No benchmarks ran.*"));
/// ```
pub struct MarkdownReport;

struct BatteryMarkdown<'a>(&'a BatteryResult);

impl Display for BatteryMarkdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let battery = self.0;
        writeln!(f, "# Corebench Battery")?;
        writeln!(f)?;
        writeln!(f, "- **Benchmarks**: {}", battery.results.len())?;
        writeln!(
            f,
            "- **Verified**: {}/{}",
            battery.verified_count(),
            battery.results.len()
        )?;
        writeln!(f, "- **Total Time**: {:.2} ms", millis(battery.total_duration))?;
        writeln!(f)?;

        if battery.results.is_empty() {
            writeln!(f, "*No benchmarks ran.*")?;
            return Ok(());
        }

        let results: Vec<&BenchmarkResult> = battery.results.iter().collect();
        ComparisonTable(&results).fmt(f)?;

        writeln!(f)?;
        writeln!(f, "## Runs")?;
        for result in &battery.results {
            writeln!(f)?;
            writeln!(f, "### {}", result.label)?;
            writeln!(f)?;
            RunTable(result).fmt(f)?;
        }

        let failed: Vec<_> = battery
            .results
            .iter()
            .filter_map(|r| r.first_failure().map(|run| (r, run)))
            .collect();
        if !failed.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Failures")?;
            writeln!(f)?;
            for (result, run) in failed {
                match &run.outcome {
                    Outcome::Failed(reason) => {
                        writeln!(f, "- `{}` run {}: {}", result.label, run.run_index, reason)?
                    }
                    _ => writeln!(
                        f,
                        "- `{}` run {}: produced {}",
                        result.label,
                        run.run_index,
                        run.result.as_deref().unwrap_or("N/A")
                    )?,
                }
            }
        }
        Ok(())
    }
}

struct BenchmarkMarkdown<'a>(&'a BenchmarkResult);

impl Display for BenchmarkMarkdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "# Benchmark: {}", result.label)?;
        writeln!(f)?;
        if !result.params.is_empty() {
            writeln!(f, "- **Parameters**: {}", result.params)?;
        }
        writeln!(f, "- **Runs**: {}", result.run_count())?;
        writeln!(f, "- **Status**: {}", result.outcome().label())?;
        writeln!(f)?;

        writeln!(f, "## Summary")?;
        writeln!(f)?;
        if result.runs.is_empty() {
            writeln!(f, "*No runs completed.*")?;
            return Ok(());
        }
        writeln!(f, "| Metric | Value |")?;
        writeln!(f, "|--------|-------|")?;
        writeln!(f, "| Result | {} |", result.result().unwrap_or("N/A"))?;
        writeln!(f, "| Avg Time | {:.3} ms |", millis(result.avg_duration()))?;
        writeln!(f, "| Min Time | {:.3} ms |", millis(result.min_duration()))?;
        writeln!(f, "| Max Time | {:.3} ms |", millis(result.max_duration()))?;
        writeln!(f)?;

        writeln!(f, "## Run Details")?;
        writeln!(f)?;
        RunTable(result).fmt(f)
    }
}

struct RunTable<'a>(&'a BenchmarkResult);

impl Display for RunTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "| Run | Time (ms) | Result | Status |")?;
        writeln!(f, "|-----|-----------|--------|--------|")?;
        for run in &self.0.runs {
            writeln!(
                f,
                "| {} | {:.3} | {} | {} |",
                run.run_index,
                run.duration_ms(),
                run.result.as_deref().unwrap_or("N/A"),
                run.outcome.label(),
            )?;
        }
        Ok(())
    }
}

struct ComparisonTable<'a>(&'a [&'a BenchmarkResult]);

impl Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Comparison")?;
        writeln!(f)?;
        writeln!(
            f,
            "| Benchmark | Result | Status | Avg (ms) | Min (ms) | Max (ms) |"
        )?;
        writeln!(
            f,
            "|-----------|--------|--------|----------|----------|----------|"
        )?;
        for result in self.0 {
            writeln!(
                f,
                "| {} | {} | {} | {:.3} | {:.3} | {:.3} |",
                result.label,
                result.result().unwrap_or("N/A"),
                result.outcome().label(),
                millis(result.avg_duration()),
                millis(result.min_duration()),
                millis(result.max_duration()),
            )?;
        }
        Ok(())
    }
}

impl MarkdownReport {
    /// Generates the battery report: summary, comparison table, run tables
    /// per benchmark and failures.
    pub fn to_string(battery: &BatteryResult) -> String {
        BatteryMarkdown(battery).to_string()
    }

    /// Generates a detailed report for a single benchmark.
    ///
    /// # Example
    ///
    /// ```
    /// use corebench_harness::{BenchmarkResult, BenchmarkRun, MarkdownReport, Outcome};
    /// use std::time::Duration;
    ///
    /// let mut result = BenchmarkResult::new("sieve", "sieve:5000", "bound=5000");
    /// result.add_run(BenchmarkRun {
    ///     run_index: 0,
    ///     duration: Duration::from_micros(1500),
    ///     result: Some("669".to_string()),
    ///     outcome: Outcome::Verified,
    /// });
    ///
    /// let md = MarkdownReport::benchmark(&result);
    /// assert!(md.contains("## Summary"));
    /// assert!(md.contains("| 0 | 1.500 | 669 | verified |"));
    /// ```
    pub fn benchmark(result: &BenchmarkResult) -> String {
        BenchmarkMarkdown(result).to_string()
    }

    /// Generates a comparison table for several results.
    pub fn comparison(results: &[&BenchmarkResult]) -> String {
        ComparisonTable(results).to_string()
    }

    /// Writes the battery report to a file.
    pub fn to_file(battery: &BatteryResult, path: impl AsRef<Path>) -> io::Result<()> {
        fs::write(path, Self::to_string(battery))
    }

    /// Writes the battery report to a writer.
    pub fn write<W: Write>(battery: &BatteryResult, mut writer: W) -> io::Result<()> {
        writer.write_all(Self::to_string(battery).as_bytes())
    }
}

/// JSON exporter for battery results.
pub struct JsonExporter;

impl JsonExporter {
    /// Serializes battery results as pretty-printed JSON.
    pub fn to_string(battery: &BatteryResult) -> Result<String> {
        Ok(serde_json::to_string_pretty(battery)?)
    }

    pub fn to_file(battery: &BatteryResult, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, Self::to_string(battery)?)?;
        Ok(())
    }

    pub fn write<W: Write>(battery: &BatteryResult, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, battery)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::BenchmarkRun;
    use std::time::Duration;

    fn sample() -> BatteryResult {
        let mut sieve = BenchmarkResult::new("sieve", "sieve:5000", "bound=5000");
        for index in 0..2 {
            sieve.add_run(BenchmarkRun {
                run_index: index,
                duration: Duration::from_micros(100 + index as u64),
                result: Some("669".to_string()),
                outcome: Outcome::Verified,
            });
        }
        let mut tower = BenchmarkResult::new("tower", "tower:13", "disks=13");
        tower.add_run(BenchmarkRun {
            run_index: 0,
            duration: Duration::from_micros(50),
            result: Some("8190".to_string()),
            outcome: Outcome::Mismatch,
        });
        let broken = BenchmarkResult::setup_failure(
            "mandelbrot",
            "mandelbrot:3",
            "no known checksum for size 3",
        );
        BatteryResult::new(vec![sieve, tower, broken], Duration::from_millis(2))
    }

    #[test]
    fn test_csv_rows() {
        let csv = CsvExporter::to_string(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "sieve:5000,\"bound=5000\",0,100,669,verified");
        assert_eq!(lines[3], "tower:13,\"disks=13\",0,50,8190,mismatch");
        assert_eq!(lines[4], "mandelbrot:3,\"\",0,0,,failed");
    }

    #[test]
    fn test_csv_write() {
        let mut buffer = Vec::new();
        CsvExporter::write(&sample(), &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), CsvExporter::to_string(&sample()));
    }

    #[test]
    fn test_markdown_battery() {
        let md = MarkdownReport::to_string(&sample());
        assert!(md.contains("- **Verified**: 1/3"));
        assert!(md.contains("## Comparison"));
        assert!(md.contains("| sieve:5000 | 669 | verified |"));
        assert!(md.contains("### tower:13"));
        assert!(md.contains("| 1 | 0.101 | 669 | verified |"));
        assert!(md.contains("## Failures"));
        assert!(md.contains("- `tower:13` run 0: produced 8190"));
        assert!(md.contains("- `mandelbrot:3` run 0: no known checksum for size 3"));
    }

    #[test]
    fn test_markdown_all_verified_has_no_failures() {
        let mut battery = sample();
        battery.results.truncate(1);
        let md = MarkdownReport::to_string(&battery);
        assert!(!md.contains("## Failures"));
    }

    #[test]
    fn test_comparison() {
        let battery = sample();
        let refs: Vec<&BenchmarkResult> = battery.results.iter().collect();
        let table = MarkdownReport::comparison(&refs);
        assert_eq!(table.lines().count(), 4 + refs.len());
    }

    #[test]
    fn test_json() {
        let json = JsonExporter::to_string(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["label"], "sieve:5000");
        assert_eq!(results[0]["runs"][0]["outcome"]["status"], "verified");
        assert_eq!(results[2]["runs"][0]["outcome"]["status"], "failed");
        assert_eq!(
            results[2]["runs"][0]["outcome"]["detail"],
            "no known checksum for size 3"
        );
    }
}
