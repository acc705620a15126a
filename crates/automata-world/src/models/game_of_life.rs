//! Conway's Game of Life (B3/S23) on a bounded grid.

use crate::automaton::Automaton;
use crate::change_set::ChangeSet;
use crate::color::ColorTable;
use crate::grid::{DoubleBuffer, Grid};
use automata_core::{Coord, Dimensions, Error, ModelKind, Result, Rgb};
use rand::Rng;
use tracing::trace;

pub struct GameOfLife {
    buffers: DoubleBuffer<u8>,
    colors: ColorTable,
    changes: ChangeSet,
}

impl GameOfLife {
    pub const DEAD: u8 = 0;
    pub const ALIVE: u8 = 1;

    /// Dead grid with `random` cells set to a random bit
    pub fn new<R: Rng + ?Sized>(dims: Dimensions, random: usize, rng: &mut R) -> Self {
        let mut grid = Grid::new(dims, Self::DEAD);
        for _ in 0..random {
            let row = rng.gen_range(0..dims.height);
            let col = rng.gen_range(0..dims.width);
            let bit = rng.gen_range(0..=1);
            grid.set(Coord::new(row, col), bit);
        }
        Self::with_grid(grid)
    }

    /// Start from an explicit pattern of 0/1 cells
    pub fn from_grid(grid: Grid<u8>) -> Result<Self> {
        if let Some((coord, value)) = grid.iter().find(|(_, &v)| v > Self::ALIVE) {
            return Err(Error::Configuration(format!(
                "cell ({}, {}) holds {}; Game of Life cells are 0 or 1",
                coord.row, coord.col, value
            )));
        }
        Ok(Self::with_grid(grid))
    }

    /// Dead grid with the listed cells alive
    pub fn with_live_cells(dims: Dimensions, cells: &[Coord]) -> Self {
        let mut grid = Grid::new(dims, Self::DEAD);
        for &coord in cells {
            grid.set(coord, Self::ALIVE);
        }
        Self::with_grid(grid)
    }

    fn with_grid(grid: Grid<u8>) -> Self {
        let dims = grid.dims();
        Self {
            buffers: DoubleBuffer::new(grid),
            colors: ColorTable::binary(),
            changes: ChangeSet::new(dims),
        }
    }

    pub fn grid(&self) -> &Grid<u8> {
        self.buffers.front()
    }

    pub fn population(&self) -> usize {
        self.grid().cells().iter().filter(|&&v| v == Self::ALIVE).count()
    }

    fn next_state(cell: u8, live_neighbors: usize) -> u8 {
        match (cell, live_neighbors) {
            (Self::ALIVE, 2 | 3) => Self::ALIVE,
            (Self::ALIVE, _) => Self::DEAD,
            (_, 3) => Self::ALIVE,
            _ => cell,
        }
    }
}

impl Automaton for GameOfLife {
    fn kind(&self) -> ModelKind {
        ModelKind::GameOfLife
    }

    fn dims(&self) -> Dimensions {
        self.buffers.front().dims()
    }

    fn step(&mut self) -> &ChangeSet {
        self.changes.clear();
        let (current, next) = self.buffers.split();

        for (coord, &cell) in current.iter() {
            let live = current.count_neighbors(coord, |&v| v == Self::ALIVE);
            let state = Self::next_state(cell, live);
            next.set(coord, state);
            if state != cell {
                self.changes.insert(coord);
            }
        }

        self.buffers.swap();
        trace!(changed = self.changes.len(), "Game of Life step");
        &self.changes
    }

    fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    fn color(&self, coord: Coord) -> Rgb {
        self.colors.color(*self.grid().get(coord) as usize)
    }

    fn value(&self, coord: Coord) -> i64 {
        *self.grid().get(coord) as i64
    }
}
