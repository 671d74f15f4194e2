//! Mandelbrot escape-time checksum.
//!
//! Every pixel of a `size x size` grid contributes one bit (1 = escaped
//! within the iteration budget). Bits are packed MSB-first into bytes which
//! are XOR-folded into a running checksum, so the result is an
//! order-sensitive fingerprint of the raster and of the floating point
//! semantics used to compute it.

use crate::benchmark::Benchmark;
use crate::error::{BenchError, Result};

#[cfg(test)]
mod tests;

/// Iteration budget per pixel.
pub const MAX_ITERATIONS: usize = 50;

/// Squared magnitude a point must strictly exceed to count as escaped.
pub const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Grid sizes with a known checksum, paired with that checksum.
pub const KNOWN_CHECKSUMS: [(usize, u64); 3] = [(500, 191), (750, 50), (1, 128)];

/// Returns the known checksum for `size`, if there is one.
pub fn expected_checksum(size: usize) -> Option<u64> {
    KNOWN_CHECKSUMS
        .iter()
        .find(|(known, _)| *known == size)
        .map(|(_, checksum)| *checksum)
}

/// Rolling checksum state, updated once per pixel in row-major order.
///
/// Between pixels `bit_num` is always in `0..8`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RasterChecksum {
    sum: u64,
    byte_acc: u64,
    bit_num: u32,
}

impl RasterChecksum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one pixel. `last_in_row` flushes a partial byte, left-padded
    /// with zero bits.
    pub fn push_pixel(&mut self, escaped: bool, last_in_row: bool) {
        self.byte_acc = (self.byte_acc << 1) + u64::from(escaped);
        self.bit_num += 1;

        if self.bit_num == 8 {
            self.flush();
        } else if last_in_row {
            self.byte_acc <<= 8 - self.bit_num;
            self.flush();
        }
    }

    fn flush(&mut self) {
        self.sum ^= self.byte_acc;
        self.byte_acc = 0;
        self.bit_num = 0;
    }

    pub fn sum(&self) -> u64 {
        self.sum
    }

    /// Bits accumulated since the last flush.
    pub fn pending_bits(&self) -> u32 {
        self.bit_num
    }
}

/// Whether `c = cr + ci·i` escapes within [`MAX_ITERATIONS`].
///
/// `zr` is computed first from the previous squares, `zi` from the new `zr`,
/// then both squares are refreshed. This order is part of the checksum.
pub fn escapes(cr: f64, ci: f64) -> bool {
    let mut zrzr = 0.0_f64;
    let mut zi = 0.0_f64;
    let mut zizi = 0.0_f64;

    for _ in 0..MAX_ITERATIONS {
        let zr = zrzr - zizi + cr;
        zi = 2.0 * zr * zi + ci;

        zrzr = zr * zr;
        zizi = zi * zi;

        if zrzr + zizi > ESCAPE_RADIUS_SQUARED {
            return true;
        }
    }
    false
}

/// Computes the checksum of a `size x size` raster.
///
/// # Example
///
/// ```
/// use corebench_core::mandelbrot::checksum;
///
/// assert_eq!(checksum(1), 128);
/// assert_eq!(checksum(8), 253);
/// ```
pub fn checksum(size: usize) -> u64 {
    let mut raster = RasterChecksum::new();
    let scale = size as f64;

    for y in 0..size {
        let ci = (2.0 * y as f64) / scale - 1.0;
        for x in 0..size {
            let cr = (2.0 * x as f64) / scale - 1.5;
            raster.push_pixel(escapes(cr, ci), x == size - 1);
        }
    }
    raster.sum()
}

/// Mandelbrot checksum for one of the [`KNOWN_CHECKSUMS`] grid sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandelbrotBenchmark {
    size: usize,
}

impl MandelbrotBenchmark {
    /// Creates the benchmark, rejecting sizes that have no known checksum.
    ///
    /// # Example
    ///
    /// ```
    /// use corebench_core::MandelbrotBenchmark;
    ///
    /// assert!(MandelbrotBenchmark::new(500).is_ok());
    /// assert!(MandelbrotBenchmark::new(640).is_err());
    /// ```
    pub fn new(size: usize) -> Result<Self> {
        if expected_checksum(size).is_none() {
            return Err(unknown_size(size));
        }
        Ok(Self { size })
    }

    /// Creates the benchmark without checking for an oracle.
    ///
    /// `run` works for any size; `verify` fails with a configuration error.
    pub fn unchecked(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

fn unknown_size(size: usize) -> BenchError {
    BenchError::Configuration(format!("no mandelbrot checksum known for size {size}"))
}

impl Benchmark for MandelbrotBenchmark {
    type Output = u64;

    fn name(&self) -> &'static str {
        "mandelbrot"
    }

    fn params(&self) -> String {
        format!("size={}", self.size)
    }

    fn run(&self) -> Result<u64> {
        Ok(checksum(self.size))
    }

    fn verify(&self, output: &u64) -> Result<bool> {
        let expected = expected_checksum(self.size).ok_or_else(|| unknown_size(self.size))?;
        if *output != expected {
            tracing::debug!(
                size = self.size,
                expected = expected,
                actual = *output,
                "mandelbrot checksum mismatch"
            );
        }
        Ok(*output == expected)
    }
}
