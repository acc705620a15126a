//! Per-model mapping from cell state to display color.

use automata_core::Rgb;

/// Fixed palette indexed by a cell's numeric state
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    entries: Vec<Rgb>,
}

impl ColorTable {
    /// Callers only pass the non-empty palettes below.
    fn new(entries: Vec<Rgb>) -> Self {
        Self { entries }
    }

    /// Black for 0, white for 1
    pub fn binary() -> Self {
        Self::new(vec![Rgb::BLACK, Rgb::WHITE])
    }

    /// Sand piles: quarter-step greys for 0..=4
    pub fn sand() -> Self {
        Self::grey_ramp(5)
    }

    /// Off, dying (blue), on
    pub fn brain() -> Self {
        Self::new(vec![Rgb::BLACK, Rgb::new(0.0, 0.0, 1.0), Rgb::WHITE])
    }

    /// Empty, rock, paper, scissors
    pub fn species() -> Self {
        Self::new(vec![
            Rgb::BLACK,
            Rgb::new(1.0, 0.0, 0.0),
            Rgb::new(0.0, 1.0, 0.0),
            Rgb::new(0.0, 0.0, 1.0),
        ])
    }

    /// Palette for agent trails: tenth-step greys from black to white,
    /// stretched when a rule needs more than eleven states
    pub fn trail(states: usize) -> Self {
        Self::grey_ramp(states.max(11))
    }

    /// `len` evenly spaced greys from black to white
    fn grey_ramp(len: usize) -> Self {
        let last = (len.max(2) - 1) as f32;
        Self::new((0..len).map(|i| Rgb::grey(i as f32 / last)).collect())
    }

    /// Color for a state inside the table's domain.
    ///
    /// # Panics
    ///
    /// Panics if `value` is outside the table; update rules keep cells in range.
    pub fn color(&self, value: usize) -> Rgb {
        self.entries[value]
    }

    /// Color for any state, saturating at the last entry
    pub fn clamped(&self, value: usize) -> Rgb {
        self.entries[value.min(self.entries.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sand_palette() {
        let table = ColorTable::sand();
        assert_eq!(table.entries.len(), 5);
        assert_eq!(table.color(0), Rgb::BLACK);
        assert_eq!(table.color(2), Rgb::grey(0.5));
        assert_eq!(table.clamped(4), Rgb::WHITE);
        assert_eq!(table.clamped(1000), Rgb::WHITE);
    }

    #[test]
    fn test_trail_palette() {
        let table = ColorTable::trail(2);
        assert_eq!(table.entries.len(), 11);
        assert!((table.color(1).r - 0.1).abs() < 1e-6);
        assert_eq!(table.color(10), Rgb::WHITE);

        let wide = ColorTable::trail(12);
        assert_eq!(wide.entries.len(), 12);
        assert_eq!(wide.color(11), Rgb::WHITE);
    }

    #[test]
    fn test_palettes_are_never_empty() {
        for table in [
            ColorTable::binary(),
            ColorTable::sand(),
            ColorTable::brain(),
            ColorTable::species(),
            ColorTable::trail(0),
        ] {
            assert!(!table.entries.is_empty());
            assert_eq!(table.clamped(usize::MAX), *table.entries.last().unwrap());
        }
        assert_eq!(ColorTable::brain().color(1), Rgb::new(0.0, 0.0, 1.0));
    }
}
