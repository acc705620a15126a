//! Brian's Brain: off / dying / on cells with a two-neighbour firing rule.

use crate::automaton::Automaton;
use crate::change_set::ChangeSet;
use crate::color::ColorTable;
use crate::grid::{DoubleBuffer, Grid};
use automata_core::{Coord, Dimensions, Error, ModelKind, Result, Rgb};
use rand::Rng;
use tracing::trace;

pub struct BriansBrain {
    buffers: DoubleBuffer<u8>,
    colors: ColorTable,
    changes: ChangeSet,
}

impl BriansBrain {
    pub const OFF: u8 = 0;
    pub const DYING: u8 = 1;
    pub const ON: u8 = 2;

    pub fn new<R: Rng + ?Sized>(dims: Dimensions, random: usize, rng: &mut R) -> Self {
        let mut grid = Grid::new(dims, Self::OFF);
        for _ in 0..random {
            let row = rng.gen_range(0..dims.height);
            let col = rng.gen_range(0..dims.width);
            let state = rng.gen_range(Self::OFF..=Self::ON);
            grid.set(Coord::new(row, col), state);
        }
        Self::with_grid(grid)
    }

    pub fn from_grid(grid: Grid<u8>) -> Result<Self> {
        if let Some((coord, value)) = grid.iter().find(|(_, &v)| v > Self::ON) {
            return Err(Error::Configuration(format!(
                "cell ({}, {}) holds {}; Brian's Brain cells are 0, 1 or 2",
                coord.row, coord.col, value
            )));
        }
        Ok(Self::with_grid(grid))
    }

    fn with_grid(grid: Grid<u8>) -> Self {
        let dims = grid.dims();
        Self {
            buffers: DoubleBuffer::new(grid),
            colors: ColorTable::brain(),
            changes: ChangeSet::new(dims),
        }
    }

    pub fn grid(&self) -> &Grid<u8> {
        self.buffers.front()
    }
}

impl Automaton for BriansBrain {
    fn kind(&self) -> ModelKind {
        ModelKind::BriansBrain
    }

    fn dims(&self) -> Dimensions {
        self.buffers.front().dims()
    }

    fn step(&mut self) -> &ChangeSet {
        self.changes.clear();
        let (current, next) = self.buffers.split();

        for (coord, &cell) in current.iter() {
            if cell == Self::OFF {
                let firing = current.count_neighbors(coord, |&v| v == Self::ON);
                if firing == 2 {
                    next.set(coord, Self::ON);
                    self.changes.insert(coord);
                } else {
                    next.set(coord, Self::OFF);
                }
            } else {
                // on -> dying -> off, unconditionally
                next.set(coord, cell - 1);
                self.changes.insert(coord);
            }
        }

        self.buffers.swap();
        trace!(changed = self.changes.len(), "Brian's Brain step");
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
