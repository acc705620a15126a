//! Static transition tables for the rule-driven models.

use automata_core::{Direction, Error, Result};
use serde::{Deserialize, Serialize};

/// Wolfram elementary rule decoded into its eight outputs.
///
/// `outputs[0]` is the most significant bit of the rule code, i.e. the
/// result for neighbourhood `111`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementaryRule {
    code: u8,
    outputs: [u8; 8],
}

impl ElementaryRule {
    pub fn from_code(code: u32) -> Result<Self> {
        let code = u8::try_from(code).map_err(|_| Error::RuleCodeOutOfRange(code))?;
        let mut outputs = [0u8; 8];
        for (i, output) in outputs.iter_mut().enumerate() {
            *output = (code >> (7 - i)) & 1;
        }
        Ok(Self { code, outputs })
    }

    pub fn code(&self) -> u8 {
        self.code
    }

    pub fn outputs(&self) -> &[u8; 8] {
        &self.outputs
    }

    /// Next state of a cell from its (left, centre, right) neighbourhood
    pub fn apply(&self, left: u8, center: u8, right: u8) -> u8 {
        let key = (left << 2 | center << 1 | right) as usize;
        self.outputs[7 - key]
    }
}

/// Turn applied to an agent's heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    None,
    Right,
    Reverse,
    Left,
}

impl Turn {
    /// Decode the 1/2/4/8 turn notation used by turmite tables
    pub fn from_code(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Turn::None),
            2 => Ok(Turn::Right),
            4 => Ok(Turn::Reverse),
            8 => Ok(Turn::Left),
            other => Err(Error::InvalidRule(format!("unknown turn code {}", other))),
        }
    }

    pub fn apply(self, direction: Direction) -> Direction {
        match self {
            Turn::None => direction,
            Turn::Right => direction.turn_right(),
            Turn::Reverse => direction.reverse(),
            Turn::Left => direction.turn_left(),
        }
    }
}

/// Built-in Langton's ant rule strings, by selector
pub const ANT_RULES: [&str; 5] = ["LR", "LLRR", "LRRL", "RRLLLRLLLRRR", "LRRRRRLLR"];

/// Multi-color Langton's ant rule: one turn per cell state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AntRule {
    turns: Vec<Turn>,
}

impl AntRule {
    pub fn from_selector(selector: usize) -> Result<Self> {
        let rule = ANT_RULES.get(selector).ok_or(Error::UnknownRuleSelector {
            model: "Langton's Ant",
            selector,
            available: ANT_RULES.len(),
        })?;
        Self::parse(rule)
    }

    /// Parse a string over `L`/`R`; its length is the number of cell states
    pub fn parse(rule: &str) -> Result<Self> {
        let turns = rule
            .chars()
            .map(|c| match c.to_ascii_uppercase() {
                'L' => Ok(Turn::Left),
                'R' => Ok(Turn::Right),
                other => Err(Error::InvalidRule(format!(
                    "ant rule {:?} contains {:?}; only L and R are allowed",
                    rule, other
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        if turns.len() < 2 {
            return Err(Error::InvalidRule(format!(
                "ant rule {:?} needs at least two states",
                rule
            )));
        }
        Ok(Self { turns })
    }

    pub fn states(&self) -> usize {
        self.turns.len()
    }

    pub fn turn_for(&self, value: u8) -> Turn {
        self.turns[value as usize]
    }
}

/// One turmite table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub write: u8,
    pub turn: Turn,
    pub next_state: usize,
}

/// Raw entry: (write, turn code, next state); `None` marks an unreachable slot
type RawEntry = Option<(u8, u8, usize)>;

/// Built-in turmites, indexed `[selector][head state][cell value]`
const TURMITE_RULES: [&[&[RawEntry]]; 8] = [
    &[
        &[Some((1, 2, 0)), Some((1, 2, 1))],
        &[Some((0, 1, 0)), Some((0, 1, 1))],
    ],
    &[
        &[Some((1, 1, 1)), Some((1, 8, 0))],
        &[Some((1, 2, 1)), Some((0, 1, 0))],
    ],
    &[
        &[Some((1, 2, 1)), Some((0, 2, 1))],
        &[Some((1, 1, 0)), Some((1, 1, 1))],
    ],
    &[
        &[Some((1, 2, 1)), Some((1, 8, 1))],
        &[Some((1, 2, 1)), Some((0, 2, 0))],
    ],
    &[
        &[Some((1, 8, 0)), Some((1, 2, 1))],
        &[Some((0, 2, 0)), Some((0, 8, 1))],
    ],
    &[
        &[Some((1, 8, 1)), Some((1, 8, 1))],
        &[Some((1, 2, 1)), Some((0, 1, 0))],
    ],
    &[
        &[Some((0, 1, 1)), Some((0, 2, 1))],
        &[Some((1, 8, 0)), Some((0, 1, 1))],
    ],
    &[
        &[Some((1, 8, 1)), Some((1, 2, 0))],
        &[Some((1, 4, 1)), Some((1, 4, 2))],
        &[None, Some((0, 4, 0))],
    ],
];

pub const TURMITE_RULE_COUNT: usize = TURMITE_RULES.len();

/// Turmite transition table indexed by (head state, cell value)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurmiteTable {
    states: Vec<Vec<Option<Transition>>>,
}

impl TurmiteTable {
    pub fn from_selector(selector: usize) -> Result<Self> {
        let raw = TURMITE_RULES.get(selector).ok_or(Error::UnknownRuleSelector {
            model: "Turmites",
            selector,
            available: TURMITE_RULES.len(),
        })?;

        let states = raw
            .iter()
            .map(|row| {
                row.iter()
                    .map(|entry| {
                        entry
                            .map(|(write, turn, next_state)| -> Result<Transition> {
                                Ok(Transition {
                                    write,
                                    turn: Turn::from_code(turn)?,
                                    next_state,
                                })
                            })
                            .transpose()
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(states)
    }

    /// Build a table, checking that every entry points at a defined head state
    pub fn new(states: Vec<Vec<Option<Transition>>>) -> Result<Self> {
        if states.is_empty() {
            return Err(Error::InvalidRule("turmite table has no states".to_string()));
        }
        for (state, row) in states.iter().enumerate() {
            for transition in row.iter().flatten() {
                if transition.next_state >= states.len() {
                    return Err(Error::InvalidRule(format!(
                        "state {} jumps to undefined state {}",
                        state, transition.next_state
                    )));
                }
            }
        }
        Ok(Self { states })
    }

    pub fn head_states(&self) -> usize {
        self.states.len()
    }

    /// Largest cell value any entry writes
    pub fn max_written_value(&self) -> u8 {
        self.states
            .iter()
            .flatten()
            .flatten()
            .map(|t| t.write)
            .max()
            .unwrap_or(0)
    }

    pub fn lookup(&self, state: usize, value: u8) -> Option<Transition> {
        self.states
            .get(state)
            .and_then(|row| row.get(value as usize))
            .copied()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elementary_decoding() {
        let rule = ElementaryRule::from_code(90).unwrap();
        assert_eq!(rule.outputs(), &[0, 1, 0, 1, 1, 0, 1, 0]);
        // 111 -> bit 7, 000 -> bit 0
        assert_eq!(rule.apply(1, 1, 1), 0);
        assert_eq!(rule.apply(1, 0, 0), 1);
        assert_eq!(rule.apply(0, 0, 1), 1);
        assert_eq!(rule.apply(0, 0, 0), 0);

        let rule30 = ElementaryRule::from_code(30).unwrap();
        assert_eq!(rule30.apply(1, 0, 0), 1);
        assert_eq!(rule30.apply(1, 1, 0), 0);
    }

    #[test]
    fn test_elementary_code_range() {
        assert!(ElementaryRule::from_code(255).is_ok());
        assert!(matches!(
            ElementaryRule::from_code(256),
            Err(Error::RuleCodeOutOfRange(256))
        ));
    }

    #[test]
    fn test_turn_codes() {
        assert_eq!(Turn::from_code(2).unwrap().apply(Direction::Up), Direction::Right);
        assert_eq!(Turn::from_code(8).unwrap().apply(Direction::Up), Direction::Left);
        assert_eq!(Turn::from_code(4).unwrap().apply(Direction::Up), Direction::Down);
        assert_eq!(Turn::from_code(1).unwrap().apply(Direction::Up), Direction::Up);
        assert!(Turn::from_code(3).is_err());
    }

    #[test]
    fn test_ant_rules() {
        let rule = AntRule::from_selector(0).unwrap();
        assert_eq!(rule.states(), 2);
        assert_eq!(rule.turn_for(0), Turn::Left);
        assert_eq!(rule.turn_for(1), Turn::Right);

        assert_eq!(AntRule::from_selector(3).unwrap().states(), 12);
        assert!(AntRule::from_selector(5).is_err());
        assert!(AntRule::parse("LXR").is_err());
        assert!(AntRule::parse("L").is_err());
    }

    #[test]
    fn test_turmite_tables() {
        for selector in 0..TURMITE_RULE_COUNT {
            let table = TurmiteTable::from_selector(selector).unwrap();
            assert!(table.max_written_value() <= 1);
        }

        let table = TurmiteTable::from_selector(0).unwrap();
        assert_eq!(table.head_states(), 2);
        assert_eq!(
            table.lookup(1, 0),
            Some(Transition {
                write: 0,
                turn: Turn::None,
                next_state: 0
            })
        );

        let three_state = TurmiteTable::from_selector(7).unwrap();
        assert_eq!(three_state.head_states(), 3);
        assert_eq!(three_state.lookup(2, 0), None);
        assert!(TurmiteTable::from_selector(8).is_err());
    }

    #[test]
    fn test_turmite_table_rejects_dangling_state() {
        let states = vec![vec![Some(Transition {
            write: 1,
            turn: Turn::Right,
            next_state: 3,
        })]];
        assert!(TurmiteTable::new(states).is_err());
    }
}
