use std::cmp::Ordering;
use std::ops::{Add, AddAssign};

use crate::die::Die;
use crate::state::{GameState, Side};
use crate::Result;

/// Share of equally likely treasure resolutions won by each side, or tied.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Verdict {
    pub red: f64,
    pub green: f64,
    pub tied: f64,
}

/// Receives the probability mass of every finished branch of a walk.
pub trait Settle {
    fn settle(&mut self, state: &GameState, mass: f64);

    fn prune(&mut self, _mass: f64) {}
}

/// Running result of a walk.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Tally {
    pub red: f64,
    pub green: f64,
    pub tied: f64,
    pub pruned: f64,
    /// Mass of finished branches whose outcome counts overflowed.
    pub unscored: f64,
    pub settled: u64,
}

/// Resolves a finished round.
///
/// A diver still underwater when the round ends loses every carried treasure but keeps the
/// banked score.
pub fn score(state: &GameState) -> Result<Verdict> {
    let totals = |side: Side| {
        let diver = state.diver(side);
        if diver.returned {
            diver.totals()
        } else {
            Ok(Die::scalar(0))
        }
    };
    let (red, green) = (totals(Side::Red)?, totals(Side::Green)?);
    let (red_banked, green_banked) = (state.red.banked, state.green.banked);

    let cmp = red.apply_two(&green, |r, g| (red_banked + r).cmp(&(green_banked + g)))?;
    if cmp.denom() == 0 {
        return Ok(Verdict::default());
    }

    Ok(Verdict {
        red: cmp.chance(|o| *o == Ordering::Greater),
        green: cmp.chance(|o| *o == Ordering::Less),
        tied: cmp.chance(|o| *o == Ordering::Equal),
    })
}

impl Tally {
    #[must_use]
    pub fn total(&self) -> f64 {
        self.red + self.green + self.tied + self.pruned + self.unscored
    }

    #[must_use]
    pub fn win_probability(&self) -> f64 {
        self.red
    }
}

impl Settle for Tally {
    fn settle(&mut self, state: &GameState, mass: f64) {
        self.settled += 1;
        match score(state) {
            Ok(verdict) => {
                self.red += mass * verdict.red;
                self.green += mass * verdict.green;
                self.tied += mass * verdict.tied;
            }
            Err(e) => {
                log::warn!(
                    "{:<32}{:<16}",
                    format!("unscored branch: {e}"),
                    format!("mass {mass:e}")
                );
                self.unscored += mass;
            }
        }
    }

    fn prune(&mut self, mass: f64) {
        self.pruned += mass;
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Self) {
        self.red += rhs.red;
        self.green += rhs.green;
        self.tied += rhs.tied;
        self.pruned += rhs.pruned;
        self.unscored += rhs.unscored;
        self.settled += rhs.settled;
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Board, Diver};
    use crate::tier::Tier;
    use crate::Error;

    fn finished(red: Diver, green: Diver) -> GameState {
        GameState::new(3, red, green, Board::new())
    }

    fn docked(banked: i32, hold: Vec<Tier>) -> Diver {
        Diver::new(0, banked, hold)
    }

    #[test]
    fn banked_only() {
        let v = score(&finished(docked(10, vec![]), docked(9, vec![]))).unwrap();
        assert_eq!(v, Verdict { red: 1.0, green: 0.0, tied: 0.0 });

        let v = score(&finished(docked(9, vec![]), docked(9, vec![]))).unwrap();
        assert_eq!(v, Verdict { red: 0.0, green: 0.0, tied: 1.0 });
    }

    #[test]
    fn one_shallow_treasure_against_a_lead() {
        // red 10 + {0,1,2,3} against green 11
        let v = score(&finished(docked(10, vec![Tier::Shallow]), docked(11, vec![]))).unwrap();
        assert_eq!(v.red, 0.5);
        assert_eq!(v.tied, 0.25);
        assert_eq!(v.green, 0.25);
    }

    #[test]
    fn pairings_cross_both_holds() {
        // red {0..3} vs green {0..3}: 16 pairings, 6 red wins, 4 ties
        let v = score(&finished(
            docked(0, vec![Tier::Shallow]),
            docked(0, vec![Tier::Shallow]),
        ))
        .unwrap();
        assert_eq!(v.red, 6.0 / 16.0);
        assert_eq!(v.green, 6.0 / 16.0);
        assert_eq!(v.tied, 4.0 / 16.0);
    }

    #[test]
    fn stranded_diver_loses_treasures_but_keeps_bank() {
        let mut state = finished(
            Diver::new(4, 20, vec![Tier::Abyss, Tier::Abyss]),
            docked(21, vec![]),
        );
        state.oxygen = 0;
        let v = score(&state).unwrap();
        assert_eq!(v.green, 1.0);

        state.red.banked = 22;
        assert_eq!(score(&state).unwrap().red, 1.0);
    }

    #[test]
    fn overflowing_pairings_are_reported_not_dropped() {
        // 4^32 resolutions per side: each fits, their pairings do not
        let state = finished(
            docked(0, vec![Tier::Shallow; 32]),
            docked(0, vec![Tier::Shallow; 32]),
        );
        assert!(matches!(score(&state), Err(Error::Overflow(_))));

        let mut tally = Tally::default();
        tally.settle(&state, 0.75);
        assert_eq!(tally.unscored, 0.75);
        assert_eq!(tally.red + tally.green + tally.tied, 0.0);
        assert_eq!(tally.total(), 0.75);
        assert_eq!(tally.settled, 1);
    }

    #[test]
    fn stranded_hoard_does_not_overflow() {
        let mut state = finished(
            Diver::new(3, 5, vec![Tier::Shallow; 40]),
            docked(0, vec![Tier::Shallow; 40]),
        );
        state.oxygen = 0;
        // only green's hold is resolved
        let v = score(&state).unwrap();
        assert!((v.red + v.green + v.tied - 1.0).abs() < 1e-12);
    }

    #[test]
    fn tally_accumulates_mass() {
        let state = finished(docked(10, vec![Tier::Shallow]), docked(11, vec![]));
        let mut tally = Tally::default();
        tally.settle(&state, 0.5);
        tally.settle(&state, 0.25);
        tally.prune(0.25);
        assert_eq!(tally.red, 0.375);
        assert_eq!(tally.settled, 2);
        assert!((tally.total() - 1.0).abs() < 1e-15);

        let merged = tally + tally;
        assert_eq!(merged.settled, 4);
        assert_eq!(merged.pruned, 0.5);
    }
}
