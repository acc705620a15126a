//! Cyclic-dominance spreading: rock beats scissors beats paper beats rock.

use crate::automaton::Automaton;
use crate::change_set::ChangeSet;
use crate::color::ColorTable;
use crate::grid::{DoubleBuffer, Grid};
use automata_core::{Coord, Dimensions, Error, ModelKind, Result, Rgb};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Rock,
    Paper,
    Scissors,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Rock, Species::Paper, Species::Scissors];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 3]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// `self` beats `other` iff it is the next species in the cycle
    pub fn beats(self, other: Species) -> bool {
        self.index() == (other.index() + 1) % 3
    }
}

/// Occupant and remaining health of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub species: Option<Species>,
    pub health: u32,
}

impl Cell {
    pub fn empty(health: u32) -> Self {
        Self {
            species: None,
            health,
        }
    }

    pub fn occupied(species: Species, health: u32) -> Self {
        Self {
            species: Some(species),
            health,
        }
    }

    /// Palette index: 0 for empty, 1.. for the species
    fn color_index(&self) -> usize {
        self.species.map_or(0, |s| s.index() + 1)
    }
}

pub struct RockPaperScissors {
    buffers: DoubleBuffer<Cell>,
    power: u32,
    colors: ColorTable,
    changes: ChangeSet,
}

impl RockPaperScissors {
    /// Empty grid with `random` cells claimed by a random species at full health
    pub fn new<R: Rng + ?Sized>(
        dims: Dimensions,
        power: u32,
        random: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut grid = Grid::new(dims, Cell::empty(power));
        for _ in 0..random {
            let row = rng.gen_range(0..dims.height);
            let col = rng.gen_range(0..dims.width);
            let species = Species::from_index(rng.gen_range(0..3));
            grid.get_mut(Coord::new(row, col)).species = Some(species);
        }
        Self::from_grid(grid, power)
    }

    pub fn from_grid(grid: Grid<Cell>, power: u32) -> Result<Self> {
        if power == 0 {
            return Err(Error::InvalidPower(power));
        }
        let dims = grid.dims();
        Ok(Self {
            buffers: DoubleBuffer::new(grid),
            power,
            colors: ColorTable::species(),
            changes: ChangeSet::new(dims),
        })
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn grid(&self) -> &Grid<Cell> {
        self.buffers.front()
    }

    pub fn census(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for cell in self.grid().cells() {
            if let Some(species) = cell.species {
                counts[species.index()] += 1;
            }
        }
        counts
    }
}

impl Automaton for RockPaperScissors {
    fn kind(&self) -> ModelKind {
        ModelKind::RockPaperScissors
    }

    fn dims(&self) -> Dimensions {
        self.buffers.front().dims()
    }

    fn step(&mut self) -> &ChangeSet {
        self.changes.clear();
        self.buffers.sync_back();
        let (current, next) = self.buffers.split();
        let dims = current.dims();

        // The first row and column never act as sources.
        for row in 1..dims.height {
            for col in 1..dims.width {
                let source_coord = Coord::new(row, col);
                let source = *current.get(source_coord);
                let Some(species) = source.species else {
                    continue;
                };

                for (target_coord, target) in current.moore_neighbors(source_coord) {
                    match target.species {
                        None => {
                            if source.health > 0 {
                                next.set(target_coord, Cell::occupied(species, source.health - 1));
                                self.changes.insert(target_coord);
                            }
                        }
                        Some(prey) if species.beats(prey) => {
                            if target.health > 0 {
                                let cell = next.get_mut(target_coord);
                                cell.health = cell.health.saturating_sub(1);
                            } else {
                                next.set(target_coord, Cell::occupied(species, self.power));
                                self.changes.insert(target_coord);
                            }
                        }
                        Some(_) => {}
                    }
                }
            }
        }

        self.buffers.swap();
        trace!(changed = self.changes.len(), "Rock paper scissors step");
        &self.changes
    }

    fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    fn color(&self, coord: Coord) -> Rgb {
        self.colors.color(self.grid().get(coord).color_index())
    }

    fn value(&self, coord: Coord) -> i64 {
        self.grid().get(coord).color_index() as i64
    }
}
