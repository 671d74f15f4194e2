//! The benchmark contract shared by every component.

use std::fmt::{Debug, Display};

use crate::error::{BenchError, Result};

/// Default recursion budget for the recursive components.
///
/// The canonical parameters stay far below it (List peaks at 13 frames,
/// Tower at 13, Queens at 8, Permute at 7).
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// A self-contained benchmark with a known-correct result.
///
/// Implementations hold only their parameters. All working state is created
/// inside [`run`](Benchmark::run) and dropped before it returns, so a value
/// can be run repeatedly and shared between threads.
///
/// # Example
///
/// ```
/// use corebench_core::{Benchmark, SieveBenchmark};
///
/// let sieve = SieveBenchmark::canonical();
/// let primes = sieve.run().unwrap();
/// assert_eq!(primes, 669);
/// assert!(sieve.verify(&primes).unwrap());
/// ```
pub trait Benchmark: Send + Sync {
    /// Value produced by a run and checked by [`verify`](Benchmark::verify).
    type Output: Display + Debug + Clone + PartialEq + Send;

    /// Short stable identifier, e.g. `"sieve"`.
    fn name(&self) -> &'static str;

    /// Human readable parameter summary, e.g. `"bound=5000"`.
    fn params(&self) -> String {
        String::new()
    }

    /// Executes the benchmark from freshly initialized state.
    fn run(&self) -> Result<Self::Output>;

    /// Compares a result against the known-correct value for `self`'s parameters.
    ///
    /// Returns `Ok(false)` on a mismatch. Errors are reserved for parameters
    /// that have no oracle.
    fn verify(&self, output: &Self::Output) -> Result<bool>;
}

/// Frame counter bounding recursion depth.
///
/// Each recursive helper calls [`enter`](DepthGuard::enter) before doing work
/// and [`leave`](DepthGuard::leave) when its frame returns.
#[derive(Debug, Clone, Copy)]
pub struct DepthGuard {
    depth: usize,
    peak: usize,
    max_depth: usize,
}

impl DepthGuard {
    pub fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            peak: 0,
            max_depth,
        }
    }

    /// Enters a new frame, failing once the budget is used up.
    pub fn enter(&mut self) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(BenchError::RecursionLimit {
                limit: self.max_depth,
            });
        }
        self.depth += 1;
        self.peak = self.peak.max(self.depth);
        Ok(())
    }

    pub fn leave(&mut self) {
        debug_assert!(self.depth > 0, "leave without matching enter");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Current number of open frames.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest nesting observed so far.
    pub fn peak(&self) -> usize {
        self.peak
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for DepthGuard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}
