use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use corebench::{Battery, BatteryConfig, BenchmarkSpec, HarnessError, MarkdownReport};

/// Looked up in the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "corebench.toml";

#[derive(Parser)]
#[command(name = "corebench", version)]
#[command(about = "Self-verifying CPU benchmark battery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the battery and verify every result
    Run(RunArgs),
    /// Print the benchmarks the battery would run
    List {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Battery definition (TOML, or YAML by extension)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Run only these benchmarks, e.g. `--only sieve --only mandelbrot:750`
    #[arg(long, value_name = "NAME[:PARAM]")]
    only: Vec<BenchmarkSpec>,

    /// Unmeasured runs per benchmark
    #[arg(long)]
    warmup: Option<usize>,

    /// Measured runs per benchmark
    #[arg(long)]
    runs: Option<usize>,

    /// Run benchmarks on a thread pool
    #[arg(long)]
    parallel: bool,

    /// Recursion budget for the recursive benchmarks
    #[arg(long)]
    max_depth: Option<usize>,

    #[arg(long, value_name = "FILE")]
    csv: Option<String>,

    #[arg(long, value_name = "FILE")]
    markdown: Option<String>,

    #[arg(long, value_name = "FILE")]
    json: Option<String>,

    /// Log every measured run
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

fn try_main() -> Result<ExitCode, HarnessError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => run(args),
        Command::List { config } => {
            let config = load_config(config.as_deref())?;
            for spec in &config.benchmarks {
                println!("{spec}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(args: RunArgs) -> Result<ExitCode, HarnessError> {
    let mut config = load_config(args.config.as_deref())?;
    if !args.only.is_empty() {
        config = config.with_benchmarks(args.only);
    }
    if let Some(count) = args.warmup {
        config = config.with_warmup_count(count);
    }
    if let Some(count) = args.runs {
        config = config.with_run_count(count);
    }
    if args.parallel {
        config = config.with_parallel(true);
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_depth(depth);
    }
    if let Some(path) = args.csv {
        config = config.with_csv_output(path);
    }
    if let Some(path) = args.markdown {
        config = config.with_markdown_output(path);
    }
    if let Some(path) = args.json {
        config = config.with_json_output(path);
    }
    config.validate()?;

    init_console(args.verbose);

    let battery = Battery::new(config);
    let result = battery.run();
    battery.write_reports(&result)?;

    let results: Vec<_> = result.results.iter().collect();
    println!();
    print!("{}", MarkdownReport::comparison(&results));
    println!();
    println!(
        "{}/{} benchmarks verified",
        result.verified_count(),
        result.results.len()
    );

    Ok(if result.all_verified() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(feature = "console")]
fn init_console(verbose: bool) {
    if verbose {
        corebench::console::init_with_filter("corebench_harness=debug");
    } else {
        corebench::console::init();
    }
}

#[cfg(not(feature = "console"))]
fn init_console(_verbose: bool) {}

/// Explicit path, else `corebench.toml` if present, else the canonical battery.
fn load_config(path: Option<&Path>) -> Result<BatteryConfig, HarnessError> {
    match path {
        Some(path) => Ok(BatteryConfig::load(path)?),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Ok(BatteryConfig::load(DEFAULT_CONFIG_FILE)?)
        }
        None => Ok(BatteryConfig::default()),
    }
}
