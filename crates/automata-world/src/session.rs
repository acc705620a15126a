//! Driving a model tick by tick and deciding what has to be repainted.

use crate::automaton::{Automaton, AutomatonModel};
use crate::grid::Grid;
use automata_core::{Coord, Dimensions, Result, Rgb, SessionConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Cells to redraw after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum Repaint {
    /// Every cell of the grid, row-major
    Full(Vec<(Coord, Rgb)>),
    /// Only the cells that changed during the tick
    Partial(Vec<(Coord, Rgb)>),
}

impl Repaint {
    pub fn cells(&self) -> &[(Coord, Rgb)] {
        match self {
            Repaint::Full(cells) | Repaint::Partial(cells) => cells,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, Repaint::Full(_))
    }

    pub fn len(&self) -> usize {
        self.cells().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells().is_empty()
    }
}

/// Running totals for one model's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub ticks: u64,
    pub cells_changed: u64,
    pub full_refreshes: u64,
}

/// A model plus the repaint cadence around it.
///
/// Built from a [`SessionConfig`]; `restart` throws the model away and builds
/// a fresh one from the same config.
pub struct Session {
    config: SessionConfig,
    dims: Dimensions,
    model: AutomatonModel,
    seed: u64,
    since_refresh: u32,
    stats: SessionStats,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let dims = config.grid.dimensions()?;
        let (model, seed) = Self::build_model(&config, dims)?;
        Ok(Self {
            config,
            dims,
            model,
            seed,
            since_refresh: 0,
            stats: SessionStats::default(),
        })
    }

    fn build_model(config: &SessionConfig, dims: Dimensions) -> Result<(AutomatonModel, u64)> {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let model = AutomatonModel::build(dims, &config.model, &mut rng)?;
        debug!(seed, "Seeded model construction");
        Ok((model, seed))
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn model(&self) -> &AutomatonModel {
        &self.model
    }

    /// Seed the current model was built with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Full color map of the freshly built model
    pub fn initial_paint(&self) -> Repaint {
        Repaint::Full(self.model.initialize_colors())
    }

    /// Step the model once.
    ///
    /// Every `refresh_interval`-th tick repaints the whole grid; the others
    /// only carry the changed cells. An interval of 0 disables full refreshes.
    pub fn advance(&mut self) -> Repaint {
        let changed = self.model.step().len();
        self.stats.ticks += 1;
        self.stats.cells_changed += changed as u64;
        self.since_refresh += 1;

        let interval = self.config.playback.refresh_interval;
        if interval > 0 && self.since_refresh >= interval {
            self.since_refresh = 0;
            self.stats.full_refreshes += 1;
            return Repaint::Full(self.model.initialize_colors());
        }

        let model = &self.model;
        Repaint::Partial(
            model
                .changes()
                .iter()
                .map(|coord| (coord, model.color(coord)))
                .collect(),
        )
    }

    /// Rebuild the model from the session config and reset the counters
    pub fn restart(&mut self) -> Result<Repaint> {
        let (model, seed) = Self::build_model(&self.config, self.dims)?;
        info!(
            model = %model.kind(),
            ticks = self.stats.ticks,
            seed,
            "Restarting session"
        );
        self.model = model;
        self.seed = seed;
        self.since_refresh = 0;
        self.stats = SessionStats::default();
        Ok(self.initial_paint())
    }
}

/// In-memory picture of the grid, updated from [`Repaint`]s
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Grid<Rgb>,
}

impl Frame {
    /// Luminance ramp used by `to_text`, dark to light
    const RAMP: &'static [u8] = b" .:-=+*#%@";

    pub fn new(dims: Dimensions) -> Self {
        Self {
            pixels: Grid::new(dims, Rgb::BLACK),
        }
    }

    pub fn dims(&self) -> Dimensions {
        self.pixels.dims()
    }

    pub fn pixel(&self, coord: Coord) -> Rgb {
        *self.pixels.get(coord)
    }

    pub fn apply(&mut self, repaint: &Repaint) {
        for &(coord, color) in repaint.cells() {
            self.pixels.set(coord, color);
        }
    }

    /// One character per cell, brighter cells drawn with denser glyphs
    pub fn to_text(&self) -> String {
        let last = Self::RAMP.len() - 1;
        let mut out = String::with_capacity((self.pixels.width() + 1) * self.pixels.height());
        for row in 0..self.pixels.height() {
            for color in self.pixels.row(row) {
                let level = color.luminance().clamp(0.0, 1.0);
                let index = (level * last as f32).round() as usize;
                out.push(Self::RAMP[index] as char);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_core::{GridConfig, ModelKind, ModelParams, PlaybackConfig};

    fn config(model: ModelParams, refresh_interval: u32) -> SessionConfig {
        SessionConfig {
            grid: GridConfig {
                width: 24,
                height: 24,
            },
            model,
            playback: PlaybackConfig {
                frames_per_second: 5,
                refresh_interval,
            },
            seed: Some(7),
        }
    }

    fn full_frame(session: &Session) -> Frame {
        let mut frame = Frame::new(session.dims());
        frame.apply(&Repaint::Full(session.model().initialize_colors()));
        frame
    }

    #[test]
    fn test_incremental_repaint_matches_full_repaint() {
        for kind in ModelKind::ALL {
            let mut session = Session::new(config(ModelParams::default_for(kind), 0)).unwrap();
            let mut frame = Frame::new(session.dims());
            frame.apply(&session.initial_paint());

            for _ in 0..30 {
                let repaint = session.advance();
                assert!(!repaint.is_full());
                frame.apply(&repaint);
            }
            assert_eq!(frame, full_frame(&session), "{} drifted", kind);
        }
    }

    #[test]
    fn test_full_refresh_cadence() {
        let mut session = Session::new(config(ModelParams::default_for(ModelKind::GameOfLife), 3))
            .unwrap();
        let fulls: Vec<bool> = (0..9).map(|_| session.advance().is_full()).collect();
        assert_eq!(
            fulls,
            vec![false, false, true, false, false, true, false, false, true]
        );
        assert_eq!(session.stats().full_refreshes, 3);
        assert_eq!(session.stats().ticks, 9);
    }

    #[test]
    fn test_restart_with_fixed_seed_reproduces_model() {
        let mut session =
            Session::new(config(ModelParams::default_for(ModelKind::SandPiles), 0)).unwrap();
        let first = session.initial_paint();
        for _ in 0..5 {
            session.advance();
        }
        let again = session.restart().unwrap();
        assert_eq!(first, again);
        assert_eq!(session.stats(), SessionStats::default());
        assert_eq!(session.seed(), 7);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config(ModelParams::Elementary { rule: 90, seed: 0 }, 0);
        bad.grid.width = 0;
        assert!(Session::new(bad).is_err());

        let bad = config(ModelParams::LangtonsAnt { rule: 7, steps: 1 }, 0);
        assert!(Session::new(bad).is_err());
    }

    #[test]
    fn test_frame_text_preview() {
        let dims = Dimensions::new(3, 2).unwrap();
        let mut frame = Frame::new(dims);
        frame.apply(&Repaint::Partial(vec![(Coord::new(0, 1), Rgb::WHITE)]));
        assert_eq!(frame.to_text(), " @ \n   \n");
        assert_eq!(frame.pixel(Coord::new(0, 1)), Rgb::WHITE);
    }
}
