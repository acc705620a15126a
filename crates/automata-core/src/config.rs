//! Configuration types for sessions and the player.

use crate::error::{Error, Result};
use crate::types::{Dimensions, ModelKind};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid size parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
        }
    }
}

impl GridConfig {
    pub fn dimensions(&self) -> Result<Dimensions> {
        Dimensions::new(self.width, self.height)
    }
}

/// Step cadence and repaint policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Steps per second requested from the driver
    pub frames_per_second: u32,
    /// Every this many ticks the whole grid is repainted instead of the changes only
    pub refresh_interval: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 5,
            refresh_interval: 20,
        }
    }
}

/// Model selection plus its construction parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelParams {
    SandPiles {
        random: usize,
    },
    GameOfLife {
        random: usize,
    },
    BriansBrain {
        random: usize,
    },
    Elementary {
        rule: u32,
        seed: u8,
    },
    RockPaperScissors {
        power: u32,
        random: usize,
    },
    LangtonsAnt {
        rule: usize,
        steps: usize,
    },
    Turmites {
        rule: usize,
        steps: usize,
    },
}

impl ModelParams {
    /// The parameters a fresh selection starts with
    pub fn default_for(kind: ModelKind) -> Self {
        match kind {
            ModelKind::SandPiles => ModelParams::SandPiles { random: 10 },
            ModelKind::GameOfLife => ModelParams::GameOfLife { random: 10 },
            ModelKind::BriansBrain => ModelParams::BriansBrain { random: 10 },
            ModelKind::Elementary => ModelParams::Elementary { rule: 90, seed: 0 },
            ModelKind::RockPaperScissors => ModelParams::RockPaperScissors {
                power: 10,
                random: 20,
            },
            ModelKind::LangtonsAnt => ModelParams::LangtonsAnt { rule: 0, steps: 50 },
            ModelKind::Turmites => ModelParams::Turmites { rule: 0, steps: 50 },
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            ModelParams::SandPiles { .. } => ModelKind::SandPiles,
            ModelParams::GameOfLife { .. } => ModelKind::GameOfLife,
            ModelParams::BriansBrain { .. } => ModelKind::BriansBrain,
            ModelParams::Elementary { .. } => ModelKind::Elementary,
            ModelParams::RockPaperScissors { .. } => ModelKind::RockPaperScissors,
            ModelParams::LangtonsAnt { .. } => ModelKind::LangtonsAnt,
            ModelParams::Turmites { .. } => ModelKind::Turmites,
        }
    }

    /// Parameter checks that need no rule catalog.
    ///
    /// Ant and turmite selectors are checked against their catalogs when the
    /// model is built.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ModelParams::Elementary { rule, seed } => {
                if rule > 255 {
                    return Err(Error::RuleCodeOutOfRange(rule));
                }
                if seed > 1 {
                    return Err(Error::InvalidSeedMode(seed));
                }
            }
            ModelParams::RockPaperScissors { power, .. } if power == 0 => {
                return Err(Error::InvalidPower(power));
            }
            _ => {}
        }
        Ok(())
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::default_for(ModelKind::GameOfLife)
    }
}

/// Everything needed to (re)build a model and drive it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub grid: GridConfig,
    pub model: ModelParams,
    pub playback: PlaybackConfig,
    /// Seed for construction-time randomness; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            model: ModelParams::default(),
            playback: PlaybackConfig::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<()> {
        self.grid.dimensions()?;
        self.model.validate()?;
        if self.playback.frames_per_second == 0 {
            return Err(Error::Configuration(
                "frames_per_second must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Headless player configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub session: SessionConfig,
    /// Stop after this many ticks; run until interrupted when absent
    pub max_ticks: Option<u64>,
    /// Emit logs as JSON lines
    pub json_logs: bool,
    /// Ticks between statistics log events
    pub stats_interval: u64,
    /// Print a text preview of the last frame on exit
    pub print_final_frame: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            max_ticks: Some(500),
            json_logs: false,
            stats_interval: 100,
            print_final_frame: true,
        }
    }
}

impl PlayerConfig {
    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: PlayerConfig = serde_json::from_str(&text)?;
        config.session.validate()?;
        tracing::debug!(path = %path.display(), model = %config.session.model.kind(), "Loaded player config");
        Ok(config)
    }
}
