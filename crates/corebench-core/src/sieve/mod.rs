//! Sieve of Eratosthenes prime counter.

use crate::benchmark::Benchmark;
use crate::error::{BenchError, Result};


/// Upper bound of the canonical run.
pub const CANONICAL_BOUND: usize = 5000;

/// Number of primes in `2..=5000`.
pub const EXPECTED_PRIMES: usize = 669;

/// Largest bound accepted. Keeps the flag vector and the trial-division
/// oracle within a few seconds of work.
pub const MAX_BOUND: usize = 10_000_000;

/// Counts primes in `2..=bound` by striking multiples.
///
/// `flags[i]` stands for the integer `i + 1`. A cleared flag is never set
/// again, and a prime is counted the first time its still-set flag is seen.
///
/// # Example
///
/// ```
/// use corebench_core::sieve::count_primes;
///
/// assert_eq!(count_primes(10), 4);
/// assert_eq!(count_primes(5000), 669);
/// ```
pub fn count_primes(bound: usize) -> usize {
    let mut flags = vec![true; bound];
    let mut prime_count = 0;

    for i in 2..=bound {
        if flags[i - 1] {
            prime_count += 1;
            let mut k = i + i;
            while k <= bound {
                flags[k - 1] = false;
                k += i;
            }
        }
    }
    prime_count
}

/// Counts primes in `2..=bound` by trial division. Slow; used as an oracle.
pub fn trial_division_count(bound: usize) -> usize {
    (2..=bound)
        .filter(|&k| (2..).take_while(|d| d * d <= k).all(|d| k % d != 0))
        .count()
}

/// Prime counting up to a fixed bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SieveBenchmark {
    bound: usize,
}

impl SieveBenchmark {
    pub fn new(bound: usize) -> Self {
        Self { bound }
    }

    pub fn canonical() -> Self {
        Self::new(CANONICAL_BOUND)
    }

    pub fn bound(&self) -> usize {
        self.bound
    }

    fn check_bound(&self) -> Result<()> {
        if self.bound > MAX_BOUND {
            return Err(BenchError::Configuration(format!(
                "sieve bound {} exceeds {MAX_BOUND}",
                self.bound
            )));
        }
        Ok(())
    }
}

impl Default for SieveBenchmark {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Benchmark for SieveBenchmark {
    type Output = usize;

    fn name(&self) -> &'static str {
        "sieve"
    }

    fn params(&self) -> String {
        format!("bound={}", self.bound)
    }

    fn run(&self) -> Result<usize> {
        self.check_bound()?;
        Ok(count_primes(self.bound))
    }

    fn verify(&self, output: &usize) -> Result<bool> {
        self.check_bound()?;
        let expected = if self.bound == CANONICAL_BOUND {
            EXPECTED_PRIMES
        } else {
            trial_division_count(self.bound)
        };
        Ok(*output == expected)
    }
}
