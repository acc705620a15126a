//! The seven automaton models.

pub mod brians_brain;
pub mod elementary;
pub mod game_of_life;
pub mod langtons_ant;
pub mod rock_paper_scissors;
pub mod sand_piles;
pub mod turmites;

pub use brians_brain::BriansBrain;
pub use elementary::{Elementary, SeedMode};
pub use game_of_life::GameOfLife;
pub use langtons_ant::LangtonsAnt;
pub use rock_paper_scissors::{Cell, RockPaperScissors, Species};
pub use sand_piles::SandPiles;
pub use turmites::Turmites;
