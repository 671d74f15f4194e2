//! Towers of Hanoi move counter.
//!
//! Each pile is a singly-linked stack of disks, smallest on top. Disks are
//! owned by a per-run arena and linked by index; pushes that would put a
//! disk on a smaller one are rejected instead of corrupting the pile.

use crate::benchmark::{Benchmark, DepthGuard, DEFAULT_MAX_DEPTH};
use crate::error::{BenchError, Result};

#[cfg(test)]
mod tests;

/// Number of piles.
pub const PILES: usize = 3;

/// Disks moved by the canonical run.
pub const CANONICAL_DISKS: usize = 13;

/// Moves needed for [`CANONICAL_DISKS`].
pub const EXPECTED_MOVES: u64 = 8191;

/// Largest tower accepted; `2^30 - 1` moves is already minutes of work.
pub const MAX_DISKS: usize = 30;

/// Moves the classical algorithm makes for `disks` disks: `2^disks - 1`.
pub fn expected_moves(disks: usize) -> u64 {
    (1u64 << disks) - 1
}

/// Index of a disk inside its [`Towers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiskId(usize);

#[derive(Debug, Clone)]
struct Disk {
    size: usize,
    next: Option<DiskId>,
}

/// Three piles plus the disks placed on them.
#[derive(Debug, Clone)]
pub struct Towers {
    disks: Vec<Disk>,
    piles: [Option<DiskId>; PILES],
    moves_done: u64,
    depth: DepthGuard,
}

impl Towers {
    pub fn new(max_depth: usize) -> Self {
        Self {
            disks: Vec::new(),
            piles: [None; PILES],
            moves_done: 0,
            depth: DepthGuard::new(max_depth),
        }
    }

    /// Allocates a loose disk that is not on any pile yet.
    pub fn create_disk(&mut self, size: usize) -> DiskId {
        let id = DiskId(self.disks.len());
        self.disks.push(Disk { size, next: None });
        id
    }

    pub fn disk_size(&self, disk: DiskId) -> usize {
        self.disks[disk.0].size
    }

    /// Puts `disk` on top of `pile`.
    ///
    /// Fails if the pile's top disk is not strictly larger.
    pub fn push_disk(&mut self, disk: DiskId, pile: usize) -> Result<()> {
        let top = self.pile(pile)?;
        if let Some(top) = top {
            let (size, top_size) = (self.disk_size(disk), self.disk_size(top));
            if size >= top_size {
                return Err(BenchError::IllegalState(format!(
                    "cannot put disk {size} on smaller disk {top_size} (pile {pile})"
                )));
            }
        }

        self.disks[disk.0].next = top;
        *self.pile_mut(pile)? = Some(disk);
        Ok(())
    }

    /// Removes and returns the top disk of `pile`.
    pub fn pop_disk_from(&mut self, pile: usize) -> Result<DiskId> {
        let top = self.pile(pile)?.ok_or_else(|| {
            BenchError::IllegalState(format!("cannot remove a disk from empty pile {pile}"))
        })?;

        let next = self.disks[top.0].next.take();
        *self.pile_mut(pile)? = next;
        Ok(top)
    }

    /// Stacks disks sized `disks` down to `0` on `pile`, largest first.
    pub fn build_tower_at(&mut self, pile: usize, disks: usize) -> Result<()> {
        for size in (0..=disks).rev() {
            let disk = self.create_disk(size);
            self.push_disk(disk, pile)?;
        }
        Ok(())
    }

    pub fn move_top_disk(&mut self, from: usize, to: usize) -> Result<()> {
        let disk = self.pop_disk_from(from)?;
        self.push_disk(disk, to)?;
        self.moves_done += 1;
        Ok(())
    }

    /// Moves the top `disks` disks from `from` to `to` via the spare pile.
    pub fn move_disks(&mut self, disks: usize, from: usize, to: usize) -> Result<()> {
        self.depth.enter()?;
        let result = self.move_disks_frame(disks, from, to);
        self.depth.leave();
        result
    }

    fn move_disks_frame(&mut self, disks: usize, from: usize, to: usize) -> Result<()> {
        match disks {
            0 => Ok(()),
            1 => self.move_top_disk(from, to),
            _ => {
                let other = spare_pile(from, to)?;
                self.move_disks(disks - 1, from, other)?;
                self.move_top_disk(from, to)?;
                self.move_disks(disks - 1, other, to)
            }
        }
    }

    pub fn moves_done(&self) -> u64 {
        self.moves_done
    }

    pub fn reset_moves(&mut self) {
        self.moves_done = 0;
    }

    /// Disk sizes on `pile`, top first.
    pub fn pile_sizes(&self, pile: usize) -> Result<Vec<usize>> {
        let mut sizes = Vec::new();
        let mut cursor = self.pile(pile)?;
        while let Some(disk) = cursor {
            sizes.push(self.disk_size(disk));
            cursor = self.disks[disk.0].next;
        }
        Ok(sizes)
    }

    fn pile(&self, pile: usize) -> Result<Option<DiskId>> {
        self.piles.get(pile).copied().ok_or_else(|| no_such_pile(pile))
    }

    fn pile_mut(&mut self, pile: usize) -> Result<&mut Option<DiskId>> {
        self.piles.get_mut(pile).ok_or_else(|| no_such_pile(pile))
    }
}

/// The pile that is neither `from` nor `to`.
fn spare_pile(from: usize, to: usize) -> Result<usize> {
    if from == to || from >= PILES || to >= PILES {
        return Err(BenchError::IllegalState(format!(
            "no spare pile for a move from {from} to {to}"
        )));
    }
    Ok(PILES - from - to)
}

fn no_such_pile(pile: usize) -> BenchError {
    BenchError::IllegalState(format!("pile {pile} does not exist"))
}

/// Counts the moves needed to relocate a tower from pile 0 to pile 1.
#[derive(Debug, Clone)]
pub struct TowerBenchmark {
    disks: usize,
    max_depth: usize,
}

impl TowerBenchmark {
    pub fn new(disks: usize) -> Self {
        Self {
            disks,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn canonical() -> Self {
        Self::new(CANONICAL_DISKS)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn disks(&self) -> usize {
        self.disks
    }

    fn check_disks(&self) -> Result<()> {
        if self.disks > MAX_DISKS {
            return Err(BenchError::Configuration(format!(
                "tower of {} disks exceeds {MAX_DISKS}",
                self.disks
            )));
        }
        Ok(())
    }

    /// Runs the benchmark and returns the final piles for inspection.
    pub fn solve(&self) -> Result<Towers> {
        self.check_disks()?;

        let mut towers = Towers::new(self.max_depth);
        towers.build_tower_at(0, self.disks)?;
        towers.reset_moves();
        towers.move_disks(self.disks, 0, 1)?;
        Ok(towers)
    }
}

impl Default for TowerBenchmark {
    fn default() -> Self {
        Self::canonical()
    }
}

impl Benchmark for TowerBenchmark {
    type Output = u64;

    fn name(&self) -> &'static str {
        "tower"
    }

    fn params(&self) -> String {
        format!("disks={}", self.disks)
    }

    fn run(&self) -> Result<u64> {
        self.solve().map(|towers| towers.moves_done())
    }

    fn verify(&self, output: &u64) -> Result<bool> {
        self.check_disks()?;
        Ok(*output == expected_moves(self.disks))
    }
}
