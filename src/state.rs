use std::collections::BTreeMap;

use itertools::Itertools;

use crate::die::Die;
use crate::tier::Tier;
use crate::util::{Cell, OverflowResult};
use crate::value::Points;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Red,
    Green,
}

impl Side {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Side::Red => Side::Green,
            Side::Green => Side::Red,
        }
    }
}

/// What the active diver did with a single roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    Dock,
    Take(Tier),
    Leave,
    Drop(Tier),
    Keep,
    Swim,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diver {
    pub position: Cell,
    pub banked: Points,
    pub hold: Vec<Tier>,
    pub returned: bool,
}

impl Diver {
    /// A diver starting at or above the surface counts as already returned.
    #[must_use]
    pub fn new(position: Cell, banked: Points, hold: Vec<Tier>) -> Self {
        Self {
            position,
            banked,
            hold,
            returned: position <= 0,
        }
    }

    #[must_use]
    pub fn carried(&self) -> usize {
        self.hold.len()
    }

    /// Removes the first treasure of the lowest tier.
    pub fn drop_lightest(&mut self) -> Option<Tier> {
        let i = self.hold.iter().position_min()?;
        Some(self.hold.remove(i))
    }

    /// Distribution of the summed hold value over all `4^k` equally likely resolutions.
    pub fn totals(&self) -> OverflowResult<Die> {
        self.hold
            .iter()
            .try_fold(Die::scalar(0), |acc, t| acc.apply_two(t.die(), |x, y| x + y))
    }
}

/// Treasure occupancy of the track. A cell absent from the map is empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board(BTreeMap<Cell, Tier>);

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn treasure(&self, cell: Cell) -> Option<Tier> {
        self.0.get(&cell).copied()
    }

    pub fn take(&mut self, cell: Cell) -> Option<Tier> {
        self.0.remove(&cell)
    }

    pub fn place(&mut self, cell: Cell, tier: Tier) {
        self.0.insert(cell, tier);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Cell, Tier)> for Board {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (Cell, Tier)>,
    {
        Self(iter.into_iter().collect())
    }
}

/// Full snapshot of a round. Each branch of the walk owns its own copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub oxygen: i32,
    pub red: Diver,
    pub green: Diver,
    pub board: Board,
}

impl GameState {
    #[must_use]
    pub fn new(oxygen: i32, red: Diver, green: Diver, board: Board) -> Self {
        Self {
            oxygen,
            red,
            green,
            board,
        }
    }

    #[must_use]
    pub fn diver(&self, side: Side) -> &Diver {
        match side {
            Side::Red => &self.red,
            Side::Green => &self.green,
        }
    }

    pub fn diver_mut(&mut self, side: Side) -> &mut Diver {
        match side {
            Side::Red => &mut self.red,
            Side::Green => &mut self.green,
        }
    }

    #[must_use]
    pub fn all_returned(&self) -> bool {
        self.red.returned && self.green.returned
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.all_returned() || self.oxygen <= 0
    }

    /// Same round with the colours exchanged.
    #[must_use]
    pub fn swapped(&self) -> Self {
        Self {
            oxygen: self.oxygen,
            red: self.green.clone(),
            green: self.red.clone(),
            board: self.board.clone(),
        }
    }

    /// Oxygen spent by `side` at the start of its action.
    pub fn breathe(&mut self, side: Side) {
        self.oxygen -= self.diver(side).carried() as i32;
    }

    /// Cell reached by `side` for a roll of `roll`, before any decision.
    #[must_use]
    pub fn landing(&self, side: Side, roll: Points) -> Cell {
        let me = self.diver(side);
        let other = self.diver(side.other()).position;
        let distance = (roll - me.carried() as Points).max(0);
        let mut cell = me.position - distance;
        if me.position > other && cell <= other && other > 0 {
            cell -= 1;
        }
        cell
    }

    /// Every equally likely continuation after `side` rolls `roll`.
    ///
    /// One entry when there is nothing to decide, two otherwise.
    #[must_use]
    pub fn moves(&self, side: Side, roll: Points) -> Vec<(Decision, GameState)> {
        let cell = self.landing(side, roll);
        let mut next = self.clone();
        next.diver_mut(side).position = cell;

        if cell <= 0 {
            next.diver_mut(side).returned = true;
            return vec![(Decision::Dock, next)];
        }

        if let Some(tier) = next.board.treasure(cell) {
            let mut taken = next.clone();
            taken.board.take(cell);
            taken.diver_mut(side).hold.push(tier);
            return vec![(Decision::Take(tier), taken), (Decision::Leave, next)];
        }

        if next.diver(side).carried() > 0 {
            let mut dropped = next.clone();
            if let Some(tier) = dropped.diver_mut(side).drop_lightest() {
                dropped.board.place(cell, tier);
                return vec![(Decision::Drop(tier), dropped), (Decision::Keep, next)];
            }
        }

        vec![(Decision::Swim, next)]
    }
}
