//! Core type definitions for the automaton engine.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable grid size fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn square(side: usize) -> Result<Self> {
        Self::new(side, side)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    /// Convert an agent position to a cell coordinate if it lies on the grid
    pub fn coord_of(&self, pos: Position) -> Option<Coord> {
        self.contains(pos)
            .then(|| Coord::new(pos.row as usize, pos.col as usize))
    }

    /// The cell one step away from `coord`, or `None` past an edge
    pub fn offset(&self, coord: Coord, dr: i32, dc: i32) -> Option<Coord> {
        self.coord_of(Position::from(coord).add(dr, dc))
    }

    /// Row-major iterator over every coordinate
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width;
        (0..self.area()).map(move |i| Coord::new(i / width, i % width))
    }

    /// Cell at the centre, rounding down on even sides
    pub fn center(&self) -> Coord {
        Coord::new(self.height / 2, self.width / 2)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// In-bounds cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Signed position; agents may walk off the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn add(&self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    pub fn step(&self, direction: Direction) -> Self {
        let (dr, dc) = direction.to_delta();
        self.add(dr, dc)
    }
}

impl From<Coord> for Position {
    fn from(coord: Coord) -> Self {
        Self::new(coord.row as i32, coord.col as i32)
    }
}

/// Cardinal heading of an agent, indexed clockwise from up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    const CLOCKWISE: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::CLOCKWISE[index % 4]
    }

    pub fn turn_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn turn_left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// (row, col) delta; rows grow downwards
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn grey(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Relative luminance (Rec. 709 weights)
    pub fn luminance(&self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// The selectable automaton families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    SandPiles,
    GameOfLife,
    BriansBrain,
    Elementary,
    RockPaperScissors,
    LangtonsAnt,
    Turmites,
}

impl ModelKind {
    /// Menu order
    pub const ALL: [ModelKind; 7] = [
        ModelKind::SandPiles,
        ModelKind::GameOfLife,
        ModelKind::BriansBrain,
        ModelKind::Elementary,
        ModelKind::RockPaperScissors,
        ModelKind::LangtonsAnt,
        ModelKind::Turmites,
    ];

    const NAMES: [&'static str; 7] = [
        "Sand Piles",
        "Game of Life",
        "Brian's Brain",
        "Elementary",
        "Rock Paper Scissors",
        "Langton's Ant",
        "Turmites",
    ];

    pub fn name(self) -> &'static str {
        Self::NAMES[self as usize]
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validation() {
        assert!(Dimensions::new(0, 10).is_err());
        assert!(Dimensions::new(10, 0).is_err());

        let dims = Dimensions::new(4, 3).unwrap();
        assert_eq!(dims.area(), 12);
        assert_eq!(dims.center(), Coord::new(1, 2));
    }

    #[test]
    fn test_dimensions_contains() {
        let dims = Dimensions::new(4, 3).unwrap();
        assert!(dims.contains(Position::new(2, 3)));
        assert!(!dims.contains(Position::new(3, 0)));
        assert!(!dims.contains(Position::new(0, 4)));
        assert!(!dims.contains(Position::new(-1, 0)));
    }

    #[test]
    fn test_offset_stops_at_edges() {
        let dims = Dimensions::new(3, 3).unwrap();
        assert_eq!(dims.offset(Coord::new(0, 0), -1, 0), None);
        assert_eq!(dims.offset(Coord::new(0, 0), 1, 1), Some(Coord::new(1, 1)));
        assert_eq!(dims.offset(Coord::new(2, 2), 0, 1), None);
    }

    #[test]
    fn test_coords_row_major() {
        let dims = Dimensions::new(2, 2).unwrap();
        let coords: Vec<_> = dims.coords().collect();
        assert_eq!(
            coords,
            vec![
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 1)
            ]
        );
    }

    #[test]
    fn test_direction_turns() {
        assert_eq!(Direction::Up.turn_right(), Direction::Right);
        assert_eq!(Direction::Up.turn_left(), Direction::Left);
        assert_eq!(Direction::Left.turn_right(), Direction::Up);
        assert_eq!(Direction::Right.reverse(), Direction::Left);
        assert_eq!(Direction::Up.to_delta(), (-1, 0));
        assert_eq!(Direction::Right.to_delta(), (0, 1));
    }

    #[test]
    fn test_model_names() {
        assert_eq!(ModelKind::BriansBrain.name(), "Brian's Brain");
        assert_eq!(
            ModelKind::from_name("Rock Paper Scissors"),
            Some(ModelKind::RockPaperScissors)
        );
        assert_eq!(ModelKind::from_name("Wireworld"), None);
        assert_eq!(ModelKind::ALL[0], ModelKind::SandPiles);
    }

    #[test]
    fn test_rgb_luminance() {
        assert_eq!(Rgb::grey(0.5), Rgb::new(0.5, 0.5, 0.5));
        assert!(Rgb::BLACK.luminance() < Rgb::WHITE.luminance());
    }
}
