//! Abelian sandpile with a single in-place, row-major toppling pass per step.

use crate::automaton::Automaton;
use crate::change_set::{ChangeSet, ChangeTracker};
use crate::color::ColorTable;
use crate::grid::{Grid, VON_NEUMANN_OFFSETS};
use automata_core::{Coord, Dimensions, ModelKind, Rgb};
use rand::Rng;
use tracing::trace;

pub struct SandPiles {
    grid: Grid<u32>,
    colors: ColorTable,
    tracker: ChangeTracker<u32>,
    changes: ChangeSet,
}

impl SandPiles {
    /// A cell holding more than this many grains topples
    pub const STABLE_MAX: u32 = 3;
    /// Upper bound for randomly seeded piles
    pub const MAX_SEED_GRAINS: u32 = 1000;

    /// Empty table with `random` cells set to a random pile height
    pub fn new<R: Rng + ?Sized>(dims: Dimensions, random: usize, rng: &mut R) -> Self {
        let mut grid = Grid::new(dims, 0);
        for _ in 0..random {
            let row = rng.gen_range(0..dims.height);
            let col = rng.gen_range(0..dims.width);
            let grains = rng.gen_range(0..=Self::MAX_SEED_GRAINS);
            grid.set(Coord::new(row, col), grains);
        }
        Self::from_grid(grid)
    }

    /// Start from explicit grain counts
    pub fn from_grid(grid: Grid<u32>) -> Self {
        let dims = grid.dims();
        Self {
            grid,
            colors: ColorTable::sand(),
            tracker: ChangeTracker::new(dims),
            changes: ChangeSet::new(dims),
        }
    }

    pub fn grid(&self) -> &Grid<u32> {
        &self.grid
    }

    pub fn total_grains(&self) -> u64 {
        self.grid.cells().iter().map(|&g| g as u64).sum()
    }

    pub fn is_stable(&self) -> bool {
        self.grid.cells().iter().all(|&g| g <= Self::STABLE_MAX)
    }
}

impl Automaton for SandPiles {
    fn kind(&self) -> ModelKind {
        ModelKind::SandPiles
    }

    fn dims(&self) -> Dimensions {
        self.grid.dims()
    }

    fn step(&mut self) -> &ChangeSet {
        let dims = self.grid.dims();
        let mut topples = 0usize;

        // Neighbours are fed immediately, so a pile later in the scan can
        // topple in this same pass while an earlier one waits for the next.
        for coord in dims.coords() {
            let grains = *self.grid.get(coord);
            if grains <= Self::STABLE_MAX {
                continue;
            }
            topples += 1;
            self.tracker.touch(coord, grains);
            self.grid.set(coord, grains - 4);

            for &(dr, dc) in &VON_NEUMANN_OFFSETS {
                if let Some(neighbor) = dims.offset(coord, dr, dc) {
                    let count = self.grid.get_mut(neighbor);
                    self.tracker.touch(neighbor, *count);
                    *count = count.saturating_add(1);
                }
            }
        }

        self.tracker.commit(&self.grid, &mut self.changes);
        trace!(topples, changed = self.changes.len(), "Sand piles step");
        &self.changes
    }

    fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    fn color(&self, coord: Coord) -> Rgb {
        self.colors.clamped(*self.grid.get(coord) as usize)
    }

    fn value(&self, coord: Coord) -> i64 {
        *self.grid.get(coord) as i64
    }
}
