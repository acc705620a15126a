//! Multi-state Langton's ant.

use crate::agent::Agent;
use crate::automaton::Automaton;
use crate::change_set::{ChangeSet, ChangeTracker};
use crate::color::ColorTable;
use crate::grid::Grid;
use crate::rules::AntRule;
use automata_core::{Coord, Dimensions, ModelKind, Result, Rgb};
use tracing::trace;

pub struct LangtonsAnt {
    grid: Grid<u8>,
    rule: AntRule,
    agent: Agent,
    steps_per_tick: usize,
    moves: u64,
    colors: ColorTable,
    tracker: ChangeTracker<u8>,
    changes: ChangeSet,
}

impl LangtonsAnt {
    /// Ant from the built-in rule catalog, centred and facing up
    pub fn new(dims: Dimensions, selector: usize, steps_per_tick: usize) -> Result<Self> {
        Ok(Self::with_rule(dims, AntRule::from_selector(selector)?, steps_per_tick))
    }

    pub fn with_rule(dims: Dimensions, rule: AntRule, steps_per_tick: usize) -> Self {
        Self::with_agent(dims, rule, Agent::centered(dims), steps_per_tick)
    }

    pub fn with_agent(dims: Dimensions, rule: AntRule, agent: Agent, steps_per_tick: usize) -> Self {
        Self {
            grid: Grid::new(dims, 0),
            colors: ColorTable::trail(rule.states()),
            rule,
            agent,
            steps_per_tick,
            moves: 0,
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

    pub fn rule(&self) -> &AntRule {
        &self.rule
    }

    pub fn grid(&self) -> &Grid<u8> {
        &self.grid
    }

    /// Total moves made since construction
    pub fn moves(&self) -> u64 {
        self.moves
    }
}

impl Automaton for LangtonsAnt {
    fn kind(&self) -> ModelKind {
        ModelKind::LangtonsAnt
    }

    fn dims(&self) -> Dimensions {
        self.grid.dims()
    }

    fn step(&mut self) -> &ChangeSet {
        let dims = self.grid.dims();
        let states = self.rule.states();

        for _ in 0..self.steps_per_tick {
            let Some(coord) = self.agent.cell(dims) else {
                break;
            };
            let value = *self.grid.get(coord);
            self.agent.turn(self.rule.turn_for(value));
            self.tracker.touch(coord, value);
            self.grid.set(coord, ((value as usize + 1) % states) as u8);
            self.agent.advance(dims);
            self.moves += 1;
        }

        self.tracker.commit(&self.grid, &mut self.changes);
        trace!(
            moves = self.moves,
            safe = self.agent.is_safe(),
            changed = self.changes.len(),
            "Langton's ant step"
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
