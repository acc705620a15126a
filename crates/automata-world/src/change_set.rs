//! Per-step record of cells that need repainting.

use crate::grid::Grid;
use automata_core::{Coord, Dimensions};

/// Unique set of coordinates touched by the latest step.
///
/// Backed by a dirty bitmap so inserts are O(1) and clearing only visits the
/// cells that were actually marked.
#[derive(Debug, Clone)]
pub struct ChangeSet {
    dims: Dimensions,
    marked: Vec<bool>,
    cells: Vec<Coord>,
}

impl ChangeSet {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            marked: vec![false; dims.area()],
            cells: Vec::new(),
        }
    }

    /// Record a coordinate; returns `false` if it was already present
    pub fn insert(&mut self, coord: Coord) -> bool {
        let index = coord.row * self.dims.width + coord.col;
        if self.marked[index] {
            return false;
        }
        self.marked[index] = true;
        self.cells.push(coord);
        true
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.dims.height
            && coord.col < self.dims.width
            && self.marked[coord.row * self.dims.width + coord.col]
    }

    pub fn clear(&mut self) {
        for coord in self.cells.drain(..) {
            self.marked[coord.row * self.dims.width + coord.col] = false;
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Coordinates in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = Coord;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Coord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

/// Remembers the value each cell had before an in-place update first touched
/// it, so only cells whose final value differs are published.
#[derive(Debug, Clone)]
pub struct ChangeTracker<T> {
    seen: ChangeSet,
    before: Vec<(Coord, T)>,
}

impl<T: Copy + PartialEq> ChangeTracker<T> {
    pub fn new(dims: Dimensions) -> Self {
        Self {
            seen: ChangeSet::new(dims),
            before: Vec::new(),
        }
    }

    /// Note `coord` as written; call before the write with its current value
    pub fn touch(&mut self, coord: Coord, current: T) {
        if self.seen.insert(coord) {
            self.before.push((coord, current));
        }
    }

    /// Replace `changes` with the touched cells whose value now differs
    pub fn commit(&mut self, grid: &Grid<T>, changes: &mut ChangeSet) {
        changes.clear();
        for (coord, old) in self.before.drain(..) {
            if *grid.get(coord) != old {
                changes.insert(coord);
            }
        }
        self.seen.clear();
    }
}
