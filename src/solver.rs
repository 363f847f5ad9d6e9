use std::fmt::{self, Display};
use std::str::FromStr;

use bon::Builder;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::score::Tally;
use crate::state::{GameState, Side};
use crate::walk::Walker;
use crate::{Error, Result, EPSILON};

/// Who acts first in the round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Opening {
    /// Coin flip: each side opens with probability one half.
    #[default]
    Random,
    Red,
    Green,
}

impl Opening {
    #[must_use]
    pub fn starts(self) -> Vec<(Side, f64)> {
        match self {
            Opening::Random => vec![(Side::Red, 0.5), (Side::Green, 0.5)],
            Opening::Red => vec![(Side::Red, 1.0)],
            Opening::Green => vec![(Side::Green, 1.0)],
        }
    }
}

impl FromStr for Opening {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Opening::Random),
            "red" => Ok(Opening::Red),
            "green" => Ok(Opening::Green),
            _ => Err(Error::Opening(s.to_string())),
        }
    }
}

impl Display for Opening {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Opening::Random => write!(f, "random"),
            Opening::Red => write!(f, "red"),
            Opening::Green => write!(f, "green"),
        }
    }
}

#[derive(Debug, Clone, Copy, Builder)]
pub struct Solver {
    #[builder(default = EPSILON)]
    epsilon: f64,
    #[builder(default)]
    opening: Opening,
}

impl Default for Solver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Solver {
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    #[must_use]
    pub fn opening(&self) -> Opening {
        self.opening
    }

    #[must_use]
    pub fn solve(&self, state: &GameState) -> Tally {
        log::debug!(
            "{:<32}{:<16}{:<16}",
            "walking round",
            format!("opening {}", self.opening),
            format!("epsilon {:e}", self.epsilon)
        );
        let tally = self.run(state);
        log::debug!(
            "{:<32}{:<16}{:<16}",
            "walk complete",
            format!("settled {}", tally.settled),
            format!("pruned {:e}", tally.pruned)
        );
        tally
    }

    #[must_use]
    pub fn win_probability(&self, state: &GameState) -> f64 {
        self.solve(state).win_probability()
    }

    #[cfg(not(feature = "parallel"))]
    fn run(&self, state: &GameState) -> Tally {
        let mut tally = Tally::default();
        for (side, mass) in self.opening.starts() {
            Walker::new(self.epsilon, &mut tally).walk(state.clone(), side, mass);
        }
        tally
    }

    #[cfg(feature = "parallel")]
    fn run(&self, state: &GameState) -> Tally {
        self.opening
            .starts()
            .into_par_iter()
            .map(|(side, mass)| {
                let mut tally = Tally::default();
                Walker::new(self.epsilon, &mut tally).walk(state.clone(), side, mass);
                tally
            })
            .reduce(Tally::default, |a, b| a + b)
    }
}

/// Probability that Red finishes strictly ahead, with a random opening.
#[must_use]
pub fn win_probability(state: &GameState) -> f64 {
    Solver::default().win_probability(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Board, Diver};
    use crate::tier::Tier;

    fn race() -> GameState {
        GameState::new(
            5,
            Diver::new(4, 10, vec![Tier::Shallow]),
            Diver::new(2, 11, Vec::new()),
            [(1, Tier::Middle), (3, Tier::Shallow)].into_iter().collect::<Board>(),
        )
    }

    #[test]
    fn opening_parses() {
        assert_eq!("Random".parse::<Opening>().unwrap(), Opening::Random);
        assert_eq!("green".parse::<Opening>().unwrap(), Opening::Green);
        assert!(matches!("blue".parse::<Opening>(), Err(Error::Opening(_))));
        assert_eq!(Opening::Red.to_string(), "red");
    }

    #[test]
    fn random_opening_averages_fixed_openings() {
        let state = race();
        let red = Solver::builder().opening(Opening::Red).build().solve(&state);
        let green = Solver::builder().opening(Opening::Green).build().solve(&state);
        let random = Solver::default().solve(&state);
        let mean = 0.5 * (red.red + green.red);
        assert!((random.red - mean).abs() < 1e-9);
        assert!((random.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn solve_merges_one_walk_per_opening() {
        let state = race();
        let mut expected = Tally::default();
        for (side, mass) in Opening::Random.starts() {
            Walker::new(EPSILON, &mut expected).walk(state.clone(), side, mass);
        }
        let tally = Solver::default().solve(&state);
        assert_eq!(tally.settled, expected.settled);
        assert!((tally.red - expected.red).abs() < 1e-9);
        assert!((tally.green - expected.green).abs() < 1e-9);
        assert!((tally.pruned - expected.pruned).abs() < 1e-9);
    }

    #[test]
    fn certain_outcome() {
        let state = GameState::new(
            3,
            Diver::new(0, 30, Vec::new()),
            Diver::new(0, 10, Vec::new()),
            Board::new(),
        );
        assert_eq!(win_probability(&state), 1.0);
        assert_eq!(win_probability(&state.swapped()), 0.0);
    }

    #[test]
    fn defaults() {
        let solver = Solver::default();
        assert_eq!(solver.epsilon(), 1e-9);
        assert_eq!(solver.opening(), Opening::Random);
    }
}
