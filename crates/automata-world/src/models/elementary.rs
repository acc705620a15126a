//! One-dimensional Wolfram automaton drawn as a scrolling history.
//!
//! Each step computes the next generation of a single row and writes it one
//! row above the previous one, starting at the bottom. Once the top row has
//! been written the picture is wiped and drawing restarts at the bottom while
//! the row itself keeps evolving.

use crate::automaton::Automaton;
use crate::change_set::{ChangeSet, ChangeTracker};
use crate::color::ColorTable;
use crate::grid::Grid;
use crate::rules::ElementaryRule;
use automata_core::{Coord, Dimensions, Error, ModelKind, Result, Rgb};
use rand::Rng;
use tracing::{debug, trace};

/// How the first generation is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Single live cell in the middle (only for even rule codes)
    Center,
    /// Independent random bits
    Random,
}

impl TryFrom<u8> for SeedMode {
    type Error = Error;

    fn try_from(mode: u8) -> Result<Self> {
        match mode {
            0 => Ok(SeedMode::Center),
            1 => Ok(SeedMode::Random),
            other => Err(Error::InvalidSeedMode(other)),
        }
    }
}

pub struct Elementary {
    grid: Grid<u8>,
    rule: ElementaryRule,
    current: Vec<u8>,
    scratch: Vec<u8>,
    cursor: usize,
    generation: u64,
    colors: ColorTable,
    tracker: ChangeTracker<u8>,
    changes: ChangeSet,
}

impl Elementary {
    pub fn new<R: Rng + ?Sized>(
        dims: Dimensions,
        rule_code: u32,
        seed: SeedMode,
        rng: &mut R,
    ) -> Result<Self> {
        let rule = ElementaryRule::from_code(rule_code)?;
        let first = match seed {
            SeedMode::Center => {
                let mut row = vec![0; dims.width];
                // Odd rules map 000 to 1, so the background fills in by itself.
                if rule.code() % 2 == 0 {
                    row[dims.width / 2] = 1;
                }
                row
            }
            SeedMode::Random => (0..dims.width).map(|_| rng.gen_range(0..=1)).collect(),
        };
        Self::with_first_generation(dims, rule, first)
    }

    /// Start from an explicit first generation of 0/1 cells
    pub fn with_first_generation(
        dims: Dimensions,
        rule: ElementaryRule,
        first: Vec<u8>,
    ) -> Result<Self> {
        if first.len() != dims.width || first.iter().any(|&c| c > 1) {
            return Err(Error::Configuration(format!(
                "first generation must be {} cells of 0 or 1",
                dims.width
            )));
        }
        Ok(Self {
            grid: Grid::new(dims, 0),
            rule,
            scratch: first.clone(),
            current: first,
            cursor: dims.height - 1,
            generation: 0,
            colors: ColorTable::binary(),
            tracker: ChangeTracker::new(dims),
            changes: ChangeSet::new(dims),
        })
    }

    pub fn rule(&self) -> ElementaryRule {
        self.rule
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    /// The latest generation
    pub fn current(&self) -> &[u8] {
        &self.current
    }

    /// Row the next generation will be written to
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn advance_generation(&mut self) {
        // Edge cells have no full neighbourhood and keep their value.
        self.scratch.copy_from_slice(&self.current);
        for i in 1..self.current.len().saturating_sub(1) {
            self.scratch[i] =
                self.rule
                    .apply(self.current[i - 1], self.current[i], self.current[i + 1]);
        }
        std::mem::swap(&mut self.current, &mut self.scratch);
        self.generation += 1;
    }

    fn clear_history(&mut self) {
        for (coord, &value) in self.grid.iter() {
            if value != 0 {
                self.tracker.touch(coord, value);
            }
        }
        self.grid.fill(0);
        debug!(generation = self.generation, "Elementary history wrapped; clearing grid");
    }
}

impl Automaton for Elementary {
    fn kind(&self) -> ModelKind {
        ModelKind::Elementary
    }

    fn dims(&self) -> Dimensions {
        self.grid.dims()
    }

    fn step(&mut self) -> &ChangeSet {
        self.advance_generation();

        let row = self.cursor;
        for (col, &old) in self.grid.row(row).iter().enumerate() {
            self.tracker.touch(Coord::new(row, col), old);
        }
        self.grid.set_row(row, &self.current);

        if self.cursor == 0 {
            self.cursor = self.grid.height() - 1;
            self.clear_history();
        } else {
            self.cursor -= 1;
        }

        self.tracker.commit(&self.grid, &mut self.changes);
        trace!(
            generation = self.generation,
            row,
            changed = self.changes.len(),
            "Elementary step"
        );
        &self.changes
    }

    fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    fn color(&self, coord: Coord) -> Rgb {
        self.colors.color(*self.grid.get(coord) as usize)
    }

    fn value(&self, coord: Coord) -> i64 {
        *self.grid.get(coord) as i64
    }
}
