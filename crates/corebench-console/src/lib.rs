//! Colorful console output for battery runs.
//!
//! Provides a custom `tracing` layer that formats harness events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (battery/benchmark start and end, reports)
//! - **DEBUG**: Individual measured runs
//! - **WARN**: Failed benchmarks

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "corebench_harness=info";

/// Initializes the battery console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing with [`DEFAULT_FILTER`] unless
/// `RUST_LOG` says otherwise.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Like [`init`], with a caller-supplied default filter (e.g. `corebench_harness=debug`).
pub fn init_with_filter(default_filter: &str) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(BatteryConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH
        .get()
        .map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

fn print_banner() {
    let banner = r#"
                     _                     _
  ___ ___  _ __ ___ | |__   ___ _ __   ___| |__
 / __/ _ \| '__/ _ \| '_ \ / _ \ '_ \ / __| '_ \
| (_| (_) | | |  __/| |_) |  __/ | | | (__| | | |
 \___\___/|_|  \___||_.__/ \___|_| |_|\___|_| |_|
"#;

    let version_line = format!("          v{VERSION} - Self-Verifying CPU Benchmarks\n");

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats harness events with colors.
pub struct BatteryConsoleLayer;

impl<S: Subscriber> Layer<S> for BatteryConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("corebench") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    benchmark: Option<String>,
    params: Option<String>,
    result: Option<String>,
    status: Option<String>,
    reason: Option<String>,
    format: Option<String>,
    path: Option<String>,
    run: Option<u64>,
    runs: Option<u64>,
    warmup_count: Option<u64>,
    run_count: Option<u64>,
    benchmark_count: Option<u64>,
    verified: Option<u64>,
    total: Option<u64>,
    duration_us: Option<u64>,
    duration_ms: Option<u64>,
    avg_us: Option<u64>,
    min_us: Option<u64>,
    parallel: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, field: &Field, value: String) {
        let slot = match field.name() {
            "event" => &mut self.event,
            "message" => &mut self.message,
            "benchmark" => &mut self.benchmark,
            "params" => &mut self.params,
            "result" => &mut self.result,
            "status" => &mut self.status,
            "reason" | "error" => &mut self.reason,
            "format" => &mut self.format,
            "path" => &mut self.path,
            _ => return,
        };
        *slot = Some(value);
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field, s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "run" => self.run = Some(value),
            "runs" => self.runs = Some(value),
            "warmup_count" => self.warmup_count = Some(value),
            "run_count" => self.run_count = Some(value),
            "benchmark_count" => self.benchmark_count = Some(value),
            "verified" => self.verified = Some(value),
            "total" => self.total = Some(value),
            "duration_us" => self.duration_us = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "avg_us" => self.avg_us = Some(value),
            "min_us" => self.min_us = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "parallel" {
            self.parallel = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field, value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref() {
        Some("battery_start") => format_battery_start(v),
        Some("battery_end") => format_battery_end(v),
        Some("bench_start") => format_bench_start(v),
        Some("bench_end") => format_bench_end(v),
        Some("run_end") => format_run_end(v),
        Some("report_written") => format_report_written(v),
        None if level == Level::WARN => format_warning(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_battery_start(v: &EventVisitor) -> String {
    let count = v.benchmark_count.unwrap_or(0);
    let mode = if v.parallel.unwrap_or(false) {
        "parallel"
    } else {
        "sequential"
    };

    format!(
        "{} {} Battery │ {} benchmarks │ {} warmup │ {} runs │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        count.to_formatted_string(&Locale::en).bright_yellow(),
        v.warmup_count.unwrap_or(0).bright_yellow(),
        v.run_count.unwrap_or(0).bright_yellow(),
        mode.bright_magenta()
    )
}

fn format_battery_end(v: &EventVisitor) -> String {
    let verified = v.verified.unwrap_or(0);
    let total = v.total.unwrap_or(0);
    let all_verified = verified == total;

    let status = if all_verified {
        "ALL VERIFIED".bright_green().bold().to_string()
    } else {
        format!("{} FAILED", total - verified)
            .bright_red()
            .bold()
            .to_string()
    };

    format!(
        "{} {} Battery complete │ {}/{} verified │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        verified,
        total,
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        status
    )
}

fn format_bench_start(v: &EventVisitor) -> String {
    let benchmark = v.benchmark.as_deref().unwrap_or("unknown");

    let mut output = format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        benchmark.white().bold()
    );
    if let Some(params) = v.params.as_deref().filter(|p| !p.is_empty()) {
        output.push_str(&format!(" │ {}", params.bright_black()));
    }
    output
}

fn format_bench_end(v: &EventVisitor) -> String {
    let benchmark = v.benchmark.as_deref().unwrap_or("unknown");
    let result = v.result.as_deref().unwrap_or("N/A");
    let status = v.status.as_deref().unwrap_or("failed");

    format!(
        "{} {} {} ended │ {} runs │ avg {} │ min {} │ result {} │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        benchmark.white().bold(),
        v.runs.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_duration_us(v.avg_us.unwrap_or(0)).yellow(),
        format_duration_us(v.min_us.unwrap_or(0)).yellow(),
        result.bright_magenta().bold(),
        format_status(status)
    )
}

fn format_run_end(v: &EventVisitor) -> String {
    let benchmark = v.benchmark.as_deref().unwrap_or("unknown");
    let status = v.status.as_deref().unwrap_or("failed");

    let icon = if status == "verified" {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };

    format!(
        "{} {} {} run {:>3} │ {:>12} │ {}",
        format_elapsed(),
        icon,
        benchmark.bright_black(),
        v.run.unwrap_or(0).bright_black(),
        format_duration_us(v.duration_us.unwrap_or(0)).bright_black(),
        v.result.as_deref().unwrap_or("N/A").bright_black()
    )
}

fn format_report_written(v: &EventVisitor) -> String {
    format!(
        "{} {} {} report │ {}",
        format_elapsed(),
        "✎".bright_cyan(),
        v.format.as_deref().unwrap_or("unknown").white().bold(),
        v.path.as_deref().unwrap_or("").bright_black()
    )
}

fn format_warning(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {}",
        format_elapsed(),
        "!".bright_red().bold(),
        v.message.as_deref().unwrap_or("warning").bright_red()
    );
    if let Some(benchmark) = &v.benchmark {
        output.push_str(&format!(" │ {}", benchmark.white().bold()));
    }
    if let Some(reason) = &v.reason {
        output.push_str(&format!(" │ {}", reason));
    }
    output
}

fn format_status(status: &str) -> String {
    match status {
        "verified" => status.bright_green().bold().to_string(),
        "mismatch" => status.yellow().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    }
}

fn format_duration_us(us: u64) -> String {
    if us < 1000 {
        format!("{}µs", us)
    } else {
        format_duration_ms(us / 1000)
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations() {
        assert_eq!(format_duration_us(750), "750µs");
        assert_eq!(format_duration_us(12_500), "12ms");
        assert_eq!(format_duration_ms(2_500), "2.50s");
        assert_eq!(format_duration_ms(125_000), "2m 5s");
    }

    #[test]
    fn test_unknown_events_are_silent() {
        let visitor = EventVisitor {
            event: Some("phase_start".to_string()),
            ..Default::default()
        };
        assert!(format_event(&visitor, Level::INFO).is_empty());
        assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
    }

    #[test]
    fn test_bench_end_mentions_result() {
        let visitor = EventVisitor {
            event: Some("bench_end".to_string()),
            benchmark: Some("sieve:5000".to_string()),
            result: Some("669".to_string()),
            status: Some("verified".to_string()),
            runs: Some(3),
            avg_us: Some(1_200),
            min_us: Some(900),
            ..Default::default()
        };
        let line = format_event(&visitor, Level::INFO);
        assert!(line.contains("sieve:5000"));
        assert!(line.contains("669"));
        assert!(line.contains("verified"));
    }

    #[test]
    fn test_battery_end_counts_failures() {
        let visitor = EventVisitor {
            event: Some("battery_end".to_string()),
            verified: Some(6),
            total: Some(8),
            duration_ms: Some(40),
            ..Default::default()
        };
        let line = format_event(&visitor, Level::INFO);
        assert!(line.contains("6/8 verified"));
        assert!(line.contains("2 FAILED"));
    }

    #[test]
    fn test_warning_without_event() {
        let visitor = EventVisitor {
            message: Some("benchmark failed".to_string()),
            benchmark: Some("tower:13".to_string()),
            reason: Some("Recursion limit of 5 frames exceeded".to_string()),
            ..Default::default()
        };
        let line = format_event(&visitor, Level::WARN);
        assert!(line.contains("benchmark failed"));
        assert!(line.contains("Recursion limit"));
        assert!(format_event(&visitor, Level::INFO).is_empty());
    }
}
