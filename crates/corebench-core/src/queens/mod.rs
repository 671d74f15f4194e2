//! Eight queens by backtracking, solved repeatedly.
//!
//! Occupancy is tracked with three flag arrays instead of a board: one per
//! row, one per `c + r` diagonal and one per `c - r` diagonal. A cell is
//! free only when all three flags are free, and placing or removing a queen
//! flips exactly those three.

use crate::benchmark::{Benchmark, DepthGuard, DEFAULT_MAX_DEPTH};
use crate::error::Result;


/// Board edge length.
pub const BOARD_SIZE: usize = 8;

/// Number of diagonals in each direction.
pub const DIAGONALS: usize = 2 * BOARD_SIZE - 1;

/// Solves per run.
pub const REPETITIONS: usize = 10;

/// Backtracking state for one solve.
#[derive(Debug, Clone)]
pub struct QueensBoard {
    free_rows: [bool; BOARD_SIZE],
    free_maxs: [bool; DIAGONALS],
    free_mins: [bool; DIAGONALS],
    queen_rows: [Option<usize>; BOARD_SIZE],
    depth: DepthGuard,
}

impl QueensBoard {
    pub fn new(max_depth: usize) -> Self {
        Self {
            free_rows: [true; BOARD_SIZE],
            free_maxs: [true; DIAGONALS],
            free_mins: [true; DIAGONALS],
            queen_rows: [None; BOARD_SIZE],
            depth: DepthGuard::new(max_depth),
        }
    }

    /// Frees every cell and forgets every placement.
    pub fn reset(&mut self) {
        self.free_rows = [true; BOARD_SIZE];
        self.free_maxs = [true; DIAGONALS];
        self.free_mins = [true; DIAGONALS];
        self.queen_rows = [None; BOARD_SIZE];
    }

    /// Resets the board and searches for a full placement.
    pub fn solve(&mut self) -> Result<bool> {
        self.reset();
        self.place_queen(0)
    }

    /// Row chosen for each column, `None` while unset.
    pub fn queen_rows(&self) -> &[Option<usize>; BOARD_SIZE] {
        &self.queen_rows
    }

    /// Whether `(row, col)` is attacked by no placed queen.
    pub fn is_free(&self, row: usize, col: usize) -> bool {
        self.free_rows[row] && self.free_maxs[col + row] && self.free_mins[col + 7 - row]
    }

    fn set_occupancy(&mut self, row: usize, col: usize, free: bool) {
        self.free_rows[row] = free;
        self.free_maxs[col + row] = free;
        self.free_mins[col + 7 - row] = free;
    }

    fn place_queen(&mut self, col: usize) -> Result<bool> {
        self.depth.enter()?;
        let result = self.place_queen_frame(col);
        self.depth.leave();
        result
    }

    fn place_queen_frame(&mut self, col: usize) -> Result<bool> {
        for row in 0..BOARD_SIZE {
            if !self.is_free(row, col) {
                continue;
            }

            self.queen_rows[col] = Some(row);
            self.set_occupancy(row, col, false);

            if col == BOARD_SIZE - 1 || self.place_queen(col + 1)? {
                return Ok(true);
            }

            self.set_occupancy(row, col, true);
            self.queen_rows[col] = None;
        }
        Ok(false)
    }
}

/// Runs [`REPETITIONS`] independent eight-queens solves.
#[derive(Debug, Clone)]
pub struct QueensBenchmark {
    repetitions: usize,
    max_depth: usize,
}

impl QueensBenchmark {
    pub fn new() -> Self {
        Self {
            repetitions: REPETITIONS,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_repetitions(mut self, repetitions: usize) -> Self {
        self.repetitions = repetitions;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for QueensBenchmark {
    fn default() -> Self {
        Self::new()
    }
}

impl Benchmark for QueensBenchmark {
    type Output = bool;

    fn name(&self) -> &'static str {
        "queens"
    }

    fn params(&self) -> String {
        format!("repetitions={}", self.repetitions)
    }

    fn run(&self) -> Result<bool> {
        let mut board = QueensBoard::new(self.max_depth);
        for repetition in 0..self.repetitions {
            if !board.solve()? {
                tracing::debug!(repetition, "queens solve failed");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn verify(&self, output: &bool) -> Result<bool> {
        Ok(*output)
    }
}
