//! Swap-based permutation generator that counts its own calls.
//!
//! The values in the sequence are irrelevant; only the recursion and the
//! in-place swaps are measured.

use crate::benchmark::{Benchmark, DepthGuard, DEFAULT_MAX_DEPTH};
use crate::error::{BenchError, Result};


/// Length of the permuted sequence.
pub const SEQUENCE_LEN: usize = 6;

/// Call count for [`SEQUENCE_LEN`].
pub const EXPECTED_CALLS: u64 = 8660;

/// Closed form of the call count: `count(0) = 1`,
/// `count(n) = 1 + (n + 1) * count(n - 1)`.
///
/// `permute(n)` recurses once before its swap loop and once per swap, so
/// each level makes `n + 1` calls at level `n - 1`. `None` once the count
/// no longer fits in a `u64` (from `n = 20` on).
///
/// # Example
///
/// ```
/// use corebench_core::permute::expected_calls;
///
/// assert_eq!(expected_calls(0), Some(1));
/// assert_eq!(expected_calls(3), Some(41));
/// assert_eq!(expected_calls(6), Some(8660));
/// assert_eq!(expected_calls(21), None);
/// ```
pub fn expected_calls(n: usize) -> Option<u64> {
    (1..=n as u64).try_fold(1u64, |count, level| {
        (level + 1).checked_mul(count)?.checked_add(1)
    })
}

/// Working state of one permutation run.
#[derive(Debug, Clone)]
pub struct Permuter {
    v: Vec<i64>,
    count: u64,
    depth: DepthGuard,
}

impl Permuter {
    /// A zero-filled sequence of `len` elements.
    pub fn new(len: usize, max_depth: usize) -> Self {
        Self::with_sequence(vec![0; len], max_depth)
    }

    pub fn with_sequence(v: Vec<i64>, max_depth: usize) -> Self {
        Self {
            v,
            count: 0,
            depth: DepthGuard::new(max_depth),
        }
    }

    /// Permutes the first `n` elements, counting every call.
    pub fn permute(&mut self, n: usize) -> Result<()> {
        self.depth.enter()?;
        let result = self.permute_frame(n);
        self.depth.leave();
        result
    }

    fn permute_frame(&mut self, n: usize) -> Result<()> {
        self.count += 1;
        if n == 0 {
            return Ok(());
        }

        let last = n - 1;
        self.permute(last)?;
        for i in (0..=last).rev() {
            self.v.swap(last, i);
            self.permute(last)?;
            self.v.swap(last, i);
        }
        Ok(())
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sequence(&self) -> &[i64] {
        &self.v
    }
}

/// Counts calls made while permuting a fixed-length sequence.
#[derive(Debug, Clone)]
pub struct PermuteBenchmark {
    len: usize,
    max_depth: usize,
}

impl PermuteBenchmark {
    pub fn new() -> Self {
        Self {
            len: SEQUENCE_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_len(mut self, len: usize) -> Self {
        self.len = len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for PermuteBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark for PermuteBenchmark {
    type Output = u64;

    fn name(&self) -> &'static str {
        "permute"
    }

    fn params(&self) -> String {
        format!("len={}", self.len)
    }

    fn run(&self) -> Result<u64> {
        let mut permuter = Permuter::new(self.len, self.max_depth);
        permuter.permute(self.len)?;
        Ok(permuter.count())
    }

    fn verify(&self, output: &u64) -> Result<bool> {
        let expected = expected_calls(self.len).ok_or_else(|| {
            BenchError::Configuration(format!("no permute oracle for length {}", self.len))
        })?;
        Ok(*output == expected)
    }
}
