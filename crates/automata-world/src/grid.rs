//! Bounded 2D grid of cell states.

use automata_core::{Coord, Dimensions};
use serde::{Deserialize, Serialize};

/// Offsets of the eight surrounding cells, row by row
pub const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Offsets of the four axis-aligned neighbours: up, left, down, right
pub const VON_NEUMANN_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// A 2D grid without wraparound, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    dims: Dimensions,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(dims: Dimensions, fill: T) -> Self {
        Self {
            dims,
            cells: vec![fill; dims.area()],
        }
    }

    /// Reset every cell to `value`
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }

    /// Overwrite this grid with the contents of `other` without reallocating
    pub fn copy_from(&mut self, other: &Grid<T>) {
        debug_assert_eq!(self.dims, other.dims);
        self.cells.clone_from_slice(&other.cells);
    }

    /// Overwrite one row from a slice of exactly `width` values
    pub fn set_row(&mut self, row: usize, values: &[T]) {
        let start = row * self.dims.width;
        self.cells[start..start + self.dims.width].clone_from_slice(values);
    }
}

impl<T> Grid<T> {
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn width(&self) -> usize {
        self.dims.width
    }

    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Get cell at an in-bounds coordinate
    pub fn get(&self, coord: Coord) -> &T {
        &self.cells[self.index_of(coord)]
    }

    pub fn get_mut(&mut self, coord: Coord) -> &mut T {
        let index = self.index_of(coord);
        &mut self.cells[index]
    }

    pub fn set(&mut self, coord: Coord, value: T) {
        let index = self.index_of(coord);
        self.cells[index] = value;
    }

    /// Surrounding cells that exist, in `MOORE_OFFSETS` order
    pub fn moore_neighbors(&self, coord: Coord) -> impl Iterator<Item = (Coord, &T)> + '_ {
        MOORE_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            self.dims
                .offset(coord, dr, dc)
                .map(|neighbor| (neighbor, self.get(neighbor)))
        })
    }

    /// Number of surrounding cells matching `predicate`
    pub fn count_neighbors(&self, coord: Coord, predicate: impl Fn(&T) -> bool) -> usize {
        self.moore_neighbors(coord)
            .filter(|(_, cell)| predicate(cell))
            .count()
    }

    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.dims.width;
        &self.cells[start..start + self.dims.width]
    }

    /// Iterator over all cells with coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        let width = self.dims.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Coord::new(i / width, i % width), cell))
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    fn index_of(&self, coord: Coord) -> usize {
        assert!(
            coord.row < self.dims.height && coord.col < self.dims.width,
            "{:?} is outside a {} grid",
            coord,
            self.dims
        );
        coord.row * self.dims.width + coord.col
    }
}

/// Front/back buffer pair for simultaneous updates.
///
/// Rules read `front` and write `back`, then `swap` publishes the result.
#[derive(Debug, Clone)]
pub struct DoubleBuffer<T> {
    front: Grid<T>,
    back: Grid<T>,
}

impl<T: Clone> DoubleBuffer<T> {
    pub fn new(grid: Grid<T>) -> Self {
        Self {
            back: grid.clone(),
            front: grid,
        }
    }

    /// Prepare the back buffer for a rule that only writes some cells
    pub fn sync_back(&mut self) {
        self.back.copy_from(&self.front);
    }
}

impl<T> DoubleBuffer<T> {
    pub fn front(&self) -> &Grid<T> {
        &self.front
    }

    /// Read the current generation while writing the next
    pub fn split(&mut self) -> (&Grid<T>, &mut Grid<T>) {
        (&self.front, &mut self.back)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: usize, height: usize) -> Dimensions {
        Dimensions::new(width, height).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(dims(10, 5), 0u8);
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.cells().len(), 50);
    }

    #[test]
    fn test_rectangular_indexing() {
        let mut grid = Grid::new(dims(4, 2), 0u8);
        grid.set(Coord::new(1, 3), 7);
        assert_eq!(*grid.get(Coord::new(1, 3)), 7);
        assert_eq!(grid.cells()[7], 7);
        assert_eq!(grid.row(1), &[0, 0, 0, 7]);
    }

    #[test]
    fn test_no_wraparound() {
        let grid = Grid::new(dims(10, 10), 1u8);
        assert_eq!(grid.moore_neighbors(Coord::new(0, 0)).count(), 3);
        assert_eq!(grid.moore_neighbors(Coord::new(9, 9)).count(), 3);
        assert_eq!(grid.moore_neighbors(Coord::new(5, 5)).count(), 8);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_column_past_width_does_not_alias_next_row() {
        let grid = Grid::new(dims(4, 3), 0u8);
        grid.get(Coord::new(0, 4));
    }

    #[test]
    fn test_neighbors() {
        let grid = Grid::new(dims(10, 10), 1u8);
        assert_eq!(grid.moore_neighbors(Coord::new(5, 5)).count(), 8);
        assert_eq!(grid.moore_neighbors(Coord::new(0, 0)).count(), 3);
        assert_eq!(grid.moore_neighbors(Coord::new(0, 5)).count(), 5);
        assert_eq!(grid.count_neighbors(Coord::new(9, 9), |&v| v == 1), 3);
    }

    #[test]
    fn test_iter_row_major() {
        let mut grid = Grid::new(dims(3, 2), 0u8);
        grid.set_row(1, &[1, 2, 3]);
        let values: Vec<_> = grid.iter().map(|(c, v)| (c.row, c.col, *v)).collect();
        assert_eq!(values[3], (1, 0, 1));
        assert_eq!(values[5], (1, 2, 3));
    }

    #[test]
    fn test_double_buffer_swap() {
        let mut buffers = DoubleBuffer::new(Grid::new(dims(2, 2), 0u8));
        {
            let (front, back) = buffers.split();
            assert_eq!(*front.get(Coord::new(0, 0)), 0);
            back.set(Coord::new(0, 0), 1);
        }
        assert_eq!(*buffers.front().get(Coord::new(0, 0)), 0);
        buffers.swap();
        assert_eq!(*buffers.front().get(Coord::new(0, 0)), 1);

        buffers.sync_back();
        let (front, back) = buffers.split();
        assert_eq!(front, &*back);
    }

    #[test]
    fn test_grid_serialization() {
        let mut grid = Grid::new(dims(3, 3), 0u32);
        grid.set(Coord::new(1, 1), 42);
        let json = serde_json::to_string(&grid).unwrap();
        let restored: Grid<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(grid, restored);
    }
}
