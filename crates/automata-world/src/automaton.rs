//! The capability set shared by every model, and the tagged union that
//! selects one of them at construction time.

use crate::change_set::ChangeSet;
use crate::models::{
    BriansBrain, Elementary, GameOfLife, LangtonsAnt, RockPaperScissors, SandPiles, SeedMode,
    Turmites,
};
use automata_core::{Coord, Dimensions, ModelKind, ModelParams, Result, Rgb};
use rand::Rng;
use tracing::info;

/// One cellular automaton: a grid it owns, a rule to advance it and a palette
/// to show it.
pub trait Automaton {
    fn kind(&self) -> ModelKind;

    fn dims(&self) -> Dimensions;

    /// Advance one tick and report the cells whose value changed
    fn step(&mut self) -> &ChangeSet;

    /// Changes reported by the latest `step`
    fn changes(&self) -> &ChangeSet;

    /// Display color of a cell. Pure.
    fn color(&self, coord: Coord) -> Rgb;

    /// The stored value that `color` is derived from
    fn value(&self, coord: Coord) -> i64;

    /// True once an agent-driven model has left the grid
    fn is_halted(&self) -> bool {
        false
    }

    /// Every cell with its color, row-major, for the first full paint
    fn initialize_colors(&self) -> Vec<(Coord, Rgb)> {
        self.dims()
            .coords()
            .map(|coord| (coord, self.color(coord)))
            .collect()
    }
}

/// The seven models, chosen once and never swapped in place
pub enum AutomatonModel {
    SandPiles(SandPiles),
    GameOfLife(GameOfLife),
    BriansBrain(BriansBrain),
    Elementary(Elementary),
    RockPaperScissors(RockPaperScissors),
    LangtonsAnt(LangtonsAnt),
    Turmites(Turmites),
}

impl AutomatonModel {
    /// Build the model described by `params`.
    ///
    /// `rng` is only consulted here, for random seeding.
    pub fn build<R: Rng + ?Sized>(
        dims: Dimensions,
        params: &ModelParams,
        rng: &mut R,
    ) -> Result<Self> {
        params.validate()?;

        let model = match *params {
            ModelParams::SandPiles { random } => {
                AutomatonModel::SandPiles(SandPiles::new(dims, random, rng))
            }
            ModelParams::GameOfLife { random } => {
                AutomatonModel::GameOfLife(GameOfLife::new(dims, random, rng))
            }
            ModelParams::BriansBrain { random } => {
                AutomatonModel::BriansBrain(BriansBrain::new(dims, random, rng))
            }
            ModelParams::Elementary { rule, seed } => AutomatonModel::Elementary(
                Elementary::new(dims, rule, SeedMode::try_from(seed)?, rng)?,
            ),
            ModelParams::RockPaperScissors { power, random } => AutomatonModel::RockPaperScissors(
                RockPaperScissors::new(dims, power, random, rng)?,
            ),
            ModelParams::LangtonsAnt { rule, steps } => {
                AutomatonModel::LangtonsAnt(LangtonsAnt::new(dims, rule, steps)?)
            }
            ModelParams::Turmites { rule, steps } => {
                AutomatonModel::Turmites(Turmites::new(dims, rule, steps)?)
            }
        };

        info!(
            model = %model.kind(),
            width = dims.width,
            height = dims.height,
            params = ?params,
            "Built automaton"
        );
        Ok(model)
    }

    fn inner(&self) -> &dyn Automaton {
        match self {
            AutomatonModel::SandPiles(m) => m,
            AutomatonModel::GameOfLife(m) => m,
            AutomatonModel::BriansBrain(m) => m,
            AutomatonModel::Elementary(m) => m,
            AutomatonModel::RockPaperScissors(m) => m,
            AutomatonModel::LangtonsAnt(m) => m,
            AutomatonModel::Turmites(m) => m,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Automaton {
        match self {
            AutomatonModel::SandPiles(m) => m,
            AutomatonModel::GameOfLife(m) => m,
            AutomatonModel::BriansBrain(m) => m,
            AutomatonModel::Elementary(m) => m,
            AutomatonModel::RockPaperScissors(m) => m,
            AutomatonModel::LangtonsAnt(m) => m,
            AutomatonModel::Turmites(m) => m,
        }
    }
}

impl Automaton for AutomatonModel {
    fn kind(&self) -> ModelKind {
        self.inner().kind()
    }

    fn dims(&self) -> Dimensions {
        self.inner().dims()
    }

    fn step(&mut self) -> &ChangeSet {
        self.inner_mut().step()
    }

    fn changes(&self) -> &ChangeSet {
        self.inner().changes()
    }

    fn color(&self, coord: Coord) -> Rgb {
        self.inner().color(coord)
    }

    fn value(&self, coord: Coord) -> i64 {
        self.inner().value(coord)
    }

    fn is_halted(&self) -> bool {
        self.inner().is_halted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automata_core::Error;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn dims() -> Dimensions {
        Dimensions::square(20).unwrap()
    }

    #[test]
    fn test_build_every_kind() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for kind in ModelKind::ALL {
            let params = ModelParams::default_for(kind);
            let mut model = AutomatonModel::build(dims(), &params, &mut rng).unwrap();
            assert_eq!(model.kind(), kind);
            assert_eq!(model.dims(), dims());
            assert_eq!(model.initialize_colors().len(), 400);
            model.step();
            for coord in model.changes() {
                model.color(coord);
            }
        }
    }

    #[test]
    fn test_initialize_colors_row_major() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let dims = Dimensions::new(3, 2).unwrap();
        let model = AutomatonModel::build(dims, &ModelParams::SandPiles { random: 0 }, &mut rng)
            .unwrap();
        let coords: Vec<_> = model.initialize_colors().into_iter().map(|(c, _)| c).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[1], Coord::new(0, 1));
        assert_eq!(coords[3], Coord::new(1, 0));
        assert!(model
            .initialize_colors()
            .iter()
            .all(|&(_, color)| color == Rgb::BLACK));
    }

    #[test]
    fn test_build_rejects_bad_params() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let cases = [
            ModelParams::Elementary { rule: 256, seed: 0 },
            ModelParams::Elementary { rule: 30, seed: 2 },
            ModelParams::RockPaperScissors {
                power: 0,
                random: 5,
            },
            ModelParams::LangtonsAnt { rule: 9, steps: 1 },
            ModelParams::Turmites { rule: 8, steps: 1 },
        ];
        for params in cases {
            let err = AutomatonModel::build(dims(), &params, &mut rng)
                .err()
                .unwrap();
            assert!(err.is_configuration(), "{:?} gave {}", params, err);
        }
        assert!(matches!(
            AutomatonModel::build(
                dims(),
                &ModelParams::Turmites { rule: 8, steps: 1 },
                &mut rng
            ),
            Err(Error::UnknownRuleSelector { selector: 8, .. })
        ));
    }

    #[test]
    fn test_same_seed_same_model() {
        let params = ModelParams::GameOfLife { random: 60 };
        let mut a = AutomatonModel::build(dims(), &params, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        let mut b = AutomatonModel::build(dims(), &params, &mut ChaCha8Rng::seed_from_u64(9))
            .unwrap();
        for _ in 0..5 {
            let left: Vec<_> = a.step().iter().collect();
            let right: Vec<_> = b.step().iter().collect();
            assert_eq!(left, right);
        }
    }

    #[test]
    fn test_agents_report_halt() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let small = Dimensions::square(3).unwrap();
        let mut ant = AutomatonModel::build(
            small,
            &ModelParams::LangtonsAnt {
                rule: 0,
                steps: 100,
            },
            &mut rng,
        )
        .unwrap();
        assert!(!ant.is_halted());
        ant.step();
        assert!(ant.is_halted());

        let mut life =
            AutomatonModel::build(small, &ModelParams::GameOfLife { random: 3 }, &mut rng).unwrap();
        life.step();
        assert!(!life.is_halted());
    }
}
