//! Turmites: ants with an internal head state.

use crate::agent::Agent;
use crate::automaton::Automaton;
use crate::change_set::{ChangeSet, ChangeTracker};
use crate::color::ColorTable;
use crate::grid::Grid;
use crate::rules::TurmiteTable;
use automata_core::{Coord, Dimensions, ModelKind, Result, Rgb};
use tracing::{debug, trace};

pub struct Turmites {
    grid: Grid<u8>,
    table: TurmiteTable,
    agent: Agent,
    state: usize,
    steps_per_tick: usize,
    moves: u64,
    colors: ColorTable,
    tracker: ChangeTracker<u8>,
    changes: ChangeSet,
}

impl Turmites {
    pub fn new(dims: Dimensions, selector: usize, steps_per_tick: usize) -> Result<Self> {
        Ok(Self::with_table(
            dims,
            TurmiteTable::from_selector(selector)?,
            steps_per_tick,
        ))
    }

    pub fn with_table(dims: Dimensions, table: TurmiteTable, steps_per_tick: usize) -> Self {
        // Palette sized to the largest value the table can write.
        let colors = ColorTable::trail(table.max_written_value() as usize + 1);
        Self {
            grid: Grid::new(dims, 0),
            table,
            agent: Agent::centered(dims),
            state: 0,
            steps_per_tick,
            moves: 0,
            colors,
            tracker: ChangeTracker::new(dims),
            changes: ChangeSet::new(dims),
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn is_safe(&self) -> bool {
        self.agent.is_safe()
    }

    /// Current head state
    pub fn state(&self) -> usize {
        self.state
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    pub fn moves(&self) -> u64 {
        self.moves
    }
}

impl Automaton for Turmites {
    fn kind(&self) -> ModelKind {
        ModelKind::Turmites
    }

    fn dims(&self) -> Dimensions {
        self.grid.dims()
    }

    fn step(&mut self) -> &ChangeSet {
        let dims = self.grid.dims();

        for _ in 0..self.steps_per_tick {
            let Some(coord) = self.agent.cell(dims) else {
                break;
            };
            let value = *self.grid.get(coord);
            let Some(transition) = self.table.lookup(self.state, value) else {
                debug!(state = self.state, value, "Turmite has no rule for this cell");
                self.agent.halt();
                break;
            };

            self.tracker.touch(coord, value);
            self.grid.set(coord, transition.write);
            self.agent.turn(transition.turn);
            self.state = transition.next_state;
            self.agent.advance(dims);
            self.moves += 1;
        }

        self.tracker.commit(&self.grid, &mut self.changes);
        trace!(
            moves = self.moves,
            state = self.state,
            changed = self.changes.len(),
            "Turmite step"
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

    fn is_halted(&self) -> bool {
        !self.agent.is_safe()
    }
}
