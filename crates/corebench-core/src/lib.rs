//! corebench Core - deterministic runtime micro-benchmarks
//!
//! Each component runs a fixed, well-known algorithm and checks the outcome
//! against a literal known-correct value. A wrong value points at the
//! runtime executing the code, never at the algorithm:
//! - [`list`] - Takeuchi-style recursion over linked lists
//! - [`mandelbrot`] - floating point escape-time checksum
//! - [`permute`] - swap-based permutation call counter
//! - [`queens`] - eight queens backtracking, repeated
//! - [`sieve`] - Sieve of Eratosthenes prime counter
//! - [`tower`] - Towers of Hanoi move counter
//!
//! Every component implements [`Benchmark`]. Components share no state and
//! rebuild everything they touch on each run.

pub mod benchmark;
pub mod error;
pub mod list;
pub mod mandelbrot;
pub mod permute;
pub mod queens;
pub mod sieve;
pub mod tower;

pub use benchmark::{Benchmark, DepthGuard, DEFAULT_MAX_DEPTH};
pub use error::{BenchError, Result};
pub use list::ListBenchmark;
pub use mandelbrot::MandelbrotBenchmark;
pub use permute::PermuteBenchmark;
pub use queens::QueensBenchmark;
pub use sieve::SieveBenchmark;
pub use tower::TowerBenchmark;
