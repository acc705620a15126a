//! Cellular automaton engine.
//!
//! Seven models share one capability set ([`Automaton`]): build from grid
//! dimensions and parameters, `step` to the next generation, and report the
//! exact set of cells whose value changed so a display can repaint only those.
//! [`Session`] wraps a model with the repaint cadence used by the player.

pub mod agent;
pub mod automaton;
pub mod change_set;
pub mod color;
pub mod grid;
pub mod models;
pub mod rules;
pub mod session;

pub use agent::Agent;
pub use automaton::{Automaton, AutomatonModel};
pub use change_set::ChangeSet;
pub use color::ColorTable;
pub use grid::Grid;
pub use session::{Frame, Repaint, Session, SessionStats};
