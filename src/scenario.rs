//! Serializable description of a starting position.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::state::{Board, Diver, GameState};
use crate::tier::Tier;
use crate::util::Cell;
use crate::value::Points;
use crate::{Error, Result, MAX_TREASURES};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub position: Cell,
    pub banked: Points,
    #[serde(default)]
    pub hold: Vec<u8>,
}

/// Raw starting position. Board tiers use 0 for an empty cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub oxygen: i32,
    pub red: Seat,
    pub green: Seat,
    #[serde(default)]
    pub board: BTreeMap<Cell, u8>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            oxygen: 9,
            red: Seat {
                position: 5,
                banked: 21,
                hold: vec![4, 2],
            },
            green: Seat {
                position: 2,
                banked: 27,
                hold: vec![3, 1],
            },
            board: BTreeMap::from([(1, 1), (2, 0), (3, 1), (4, 1), (5, 1)]),
        }
    }
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn state(&self) -> Result<GameState> {
        GameState::try_from(self)
    }
}

impl Seat {
    fn diver(&self) -> Result<Diver> {
        if self.position < 0 {
            return Err(Error::Position(self.position));
        }
        let hold = self
            .hold
            .iter()
            .map(|&d| Tier::try_from(d))
            .collect::<Result<Vec<_>>>()?;
        Ok(Diver::new(self.position, self.banked, hold))
    }
}

impl TryFrom<&Scenario> for GameState {
    type Error = Error;

    fn try_from(value: &Scenario) -> Result<Self> {
        if value.oxygen <= 0 {
            return Err(Error::Oxygen(value.oxygen));
        }
        let treasures = value.red.hold.len()
            + value.green.hold.len()
            + value.board.values().filter(|&&d| d != 0).count();
        if treasures > MAX_TREASURES {
            return Err(Error::Treasures(treasures));
        }
        let board = value
            .board
            .iter()
            .filter(|(_, &d)| d != 0)
            .map(|(&c, &d)| Tier::try_from(d).map(|t| (c, t)))
            .collect::<Result<Board>>()?;
        Ok(GameState::new(
            value.oxygen,
            value.red.diver()?,
            value.green.diver()?,
            board,
        ))
    }
}

/// Parses `4,2` into treasure depths. An empty string is an empty hold.
pub fn parse_hold(text: &str) -> Result<Vec<u8>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Tier>().map(u8::from))
        .collect()
}

/// Parses `1:1,2:0,3:4` into a board of cell depths.
pub fn parse_board(text: &str) -> Result<BTreeMap<Cell, u8>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| -> Result<(Cell, u8)> {
            let (cell, depth) = s
                .split(':')
                .map(str::trim)
                .collect_tuple()
                .ok_or_else(|| Error::Cell(s.to_string()))?;
            let cell = cell.parse().map_err(|_| Error::Cell(s.to_string()))?;
            let depth: u8 = depth.parse().map_err(|_| Error::Cell(s.to_string()))?;
            if depth != 0 {
                Tier::try_from(depth)?;
            }
            Ok((cell, depth))
        })
        .collect()
}
