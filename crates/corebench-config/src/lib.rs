//! Configuration system for corebench.
//!
//! Load the battery definition from TOML or YAML files to choose which
//! benchmarks run, with which parameters, and how often.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use corebench_config::{BatteryConfig, BenchmarkSpec};
//!
//! let config = BatteryConfig::from_toml_str(r#"
//!     warmup_count = 0
//!     run_count = 5
//!
//!     [[benchmarks]]
//!     kind = "mandelbrot"
//!     size = 750
//!
//!     [[benchmarks]]
//!     kind = "queens"
//! "#).unwrap();
//!
//! assert_eq!(config.run_count, 5);
//! assert_eq!(config.benchmarks[0], BenchmarkSpec::Mandelbrot { size: 750 });
//! ```
//!
//! Use the canonical battery when the file is missing:
//!
//! ```
//! use corebench_config::BatteryConfig;
//!
//! let config = BatteryConfig::load("corebench.toml").unwrap_or_default();
//! assert_eq!(config.benchmarks.len(), 8);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use corebench_core::mandelbrot::expected_checksum;
use corebench_core::{sieve, tower, DEFAULT_MAX_DEPTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Battery configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatteryConfig {
    /// Unmeasured runs before measurement starts.
    #[serde(default = "default_warmup_count")]
    pub warmup_count: usize,

    /// Measured runs per benchmark.
    #[serde(default = "default_run_count")]
    pub run_count: usize,

    /// Run benchmarks on a thread pool instead of one after another.
    #[serde(default)]
    pub parallel: bool,

    /// Recursion budget for the recursive benchmarks.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// CSV report destination.
    #[serde(default)]
    pub csv_output: Option<String>,

    /// Markdown report destination.
    #[serde(default)]
    pub markdown_output: Option<String>,

    /// JSON report destination.
    #[serde(default)]
    pub json_output: Option<String>,

    /// Benchmarks to run, in order.
    #[serde(default = "BenchmarkSpec::canonical_battery")]
    pub benchmarks: Vec<BenchmarkSpec>,
}

fn default_warmup_count() -> usize {
    1
}

fn default_run_count() -> usize {
    3
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            warmup_count: default_warmup_count(),
            run_count: default_run_count(),
            parallel: false,
            max_depth: default_max_depth(),
            csv_output: None,
            markdown_output: None,
            json_output: None,
            benchmarks: BenchmarkSpec::canonical_battery(),
        }
    }
}

impl BatteryConfig {
    /// Creates the canonical battery configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// `.yaml` and `.yml` are parsed as YAML, everything else as TOML.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, doesn't parse, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_toml_file(path),
        }
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every benchmark has an oracle and the run counts make sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.run_count == 0 {
            return Err(ConfigError::Invalid("run_count must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.benchmarks.is_empty() {
            return Err(ConfigError::Invalid("no benchmarks configured".into()));
        }
        for spec in &self.benchmarks {
            spec.validate()?;
        }
        Ok(())
    }

    pub fn with_warmup_count(mut self, count: usize) -> Self {
        self.warmup_count = count;
        self
    }

    pub fn with_run_count(mut self, count: usize) -> Self {
        self.run_count = count;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replaces the benchmark list.
    pub fn with_benchmarks(mut self, benchmarks: Vec<BenchmarkSpec>) -> Self {
        self.benchmarks = benchmarks;
        self
    }

    pub fn with_csv_output(mut self, path: impl Into<String>) -> Self {
        self.csv_output = Some(path.into());
        self
    }

    pub fn with_markdown_output(mut self, path: impl Into<String>) -> Self {
        self.markdown_output = Some(path.into());
        self
    }

    pub fn with_json_output(mut self, path: impl Into<String>) -> Self {
        self.json_output = Some(path.into());
        self
    }
}

/// One benchmark of the battery together with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BenchmarkSpec {
    List,

    Mandelbrot {
        #[serde(default = "default_mandelbrot_size")]
        size: usize,
    },

    Permute,

    Queens,

    Sieve {
        #[serde(default = "default_sieve_bound")]
        bound: usize,
    },

    Tower {
        #[serde(default = "default_tower_disks")]
        disks: usize,
    },
}

fn default_mandelbrot_size() -> usize {
    500
}

fn default_sieve_bound() -> usize {
    sieve::CANONICAL_BOUND
}

fn default_tower_disks() -> usize {
    tower::CANONICAL_DISKS
}

impl BenchmarkSpec {
    /// Every component once, Mandelbrot at each size with a known checksum.
    pub fn canonical_battery() -> Vec<Self> {
        vec![
            Self::List,
            Self::Mandelbrot { size: 500 },
            Self::Mandelbrot { size: 750 },
            Self::Mandelbrot { size: 1 },
            Self::Permute,
            Self::Queens,
            Self::Sieve {
                bound: sieve::CANONICAL_BOUND,
            },
            Self::Tower {
                disks: tower::CANONICAL_DISKS,
            },
        ]
    }

    /// Component name, matching `Benchmark::name`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Mandelbrot { .. } => "mandelbrot",
            Self::Permute => "permute",
            Self::Queens => "queens",
            Self::Sieve { .. } => "sieve",
            Self::Tower { .. } => "tower",
        }
    }

    /// Rejects parameters that have no known-correct result or would not
    /// finish in reasonable time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Mandelbrot { size } if expected_checksum(size).is_none() => {
                Err(ConfigError::Invalid(format!(
                    "mandelbrot size {size} has no known checksum"
                )))
            }
            Self::Sieve { bound } if bound > sieve::MAX_BOUND => Err(ConfigError::Invalid(
                format!("sieve bound {bound} exceeds {}", sieve::MAX_BOUND),
            )),
            Self::Tower { disks } if disks == 0 || disks > tower::MAX_DISKS => {
                Err(ConfigError::Invalid(format!(
                    "tower disk count {disks} out of range 1..={}",
                    tower::MAX_DISKS
                )))
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Display for BenchmarkSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mandelbrot { size } => write!(f, "mandelbrot:{size}"),
            Self::Sieve { bound } => write!(f, "sieve:{bound}"),
            Self::Tower { disks } => write!(f, "tower:{disks}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Parses `name` or `name:param`, e.g. `mandelbrot:750` or `sieve:100`.
impl FromStr for BenchmarkSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, param) = match s.split_once(':') {
            Some((name, param)) => (name.trim(), Some(param.trim())),
            None => (s.trim(), None),
        };

        let parse_param = |default: usize| -> Result<usize, ConfigError> {
            param.map_or(Ok(default), |p| {
                p.parse()
                    .map_err(|_| ConfigError::Invalid(format!("invalid parameter in '{s}'")))
            })
        };
        let no_param = |spec: Self| -> Result<Self, ConfigError> {
            match param {
                Some(_) => Err(ConfigError::Invalid(format!("'{name}' takes no parameter"))),
                None => Ok(spec),
            }
        };

        let spec = match name.to_ascii_lowercase().as_str() {
            "list" => no_param(Self::List)?,
            "permute" => no_param(Self::Permute)?,
            "queens" => no_param(Self::Queens)?,
            "mandelbrot" => Self::Mandelbrot {
                size: parse_param(default_mandelbrot_size())?,
            },
            "sieve" => Self::Sieve {
                bound: parse_param(default_sieve_bound())?,
            },
            "tower" => Self::Tower {
                disks: parse_param(default_tower_disks())?,
            },
            _ => {
                return Err(ConfigError::Invalid(format!("unknown benchmark '{name}'")));
            }
        };
        spec.validate()?;
        Ok(spec)
    }
}
