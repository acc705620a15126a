//! Walker state shared by the ant and turmite models.

use crate::rules::Turn;
use automata_core::{Coord, Dimensions, Direction, Position};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Position and heading of a single grid walker.
///
/// The grid does not wrap: once the walker steps off it is no longer `safe`
/// and stays parked there until its model is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    position: Position,
    direction: Direction,
    safe: bool,
}

impl Agent {
    /// Facing up from the centre of the grid
    pub fn centered(dims: Dimensions) -> Self {
        Self::new(Position::from(dims.center()), Direction::Up, dims)
    }

    pub fn new(position: Position, direction: Direction, dims: Dimensions) -> Self {
        Self {
            position,
            direction,
            safe: dims.contains(position),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_safe(&self) -> bool {
        self.safe
    }

    /// Cell under the walker, or `None` once it has left the grid
    pub fn cell(&self, dims: Dimensions) -> Option<Coord> {
        if !self.safe {
            return None;
        }
        dims.coord_of(self.position)
    }

    pub fn turn(&mut self, turn: Turn) {
        self.direction = turn.apply(self.direction);
    }

    /// Move one cell forward and re-check the bounds
    pub fn advance(&mut self, dims: Dimensions) {
        self.position = self.position.step(self.direction);
        if !dims.contains(self.position) {
            self.halt();
        }
    }

    /// Stop for good
    pub fn halt(&mut self) {
        if self.safe {
            debug!(
                row = self.position.row,
                col = self.position.col,
                "Agent halted"
            );
        }
        self.safe = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_start() {
        let dims = Dimensions::new(6, 4).unwrap();
        let agent = Agent::centered(dims);
        assert_eq!(agent.position(), Position::new(2, 3));
        assert_eq!(agent.direction(), Direction::Up);
        assert!(agent.is_safe());
        assert_eq!(agent.cell(dims), Some(Coord::new(2, 3)));
    }

    #[test]
    fn test_leaving_the_grid() {
        let dims = Dimensions::new(3, 3).unwrap();
        let mut agent = Agent::centered(dims);
        agent.advance(dims);
        assert!(agent.is_safe());
        agent.advance(dims);
        assert!(!agent.is_safe());
        assert_eq!(agent.position(), Position::new(-1, 1));
        assert_eq!(agent.cell(dims), None);
    }

    #[test]
    fn test_turning() {
        let dims = Dimensions::new(3, 3).unwrap();
        let mut agent = Agent::centered(dims);
        agent.turn(Turn::Right);
        agent.advance(dims);
        assert_eq!(agent.position(), Position::new(1, 2));
        agent.turn(Turn::Reverse);
        assert_eq!(agent.direction(), Direction::Left);
    }
}
