use std::cmp::Ordering;

use bon::Builder;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::defs::roll;
use crate::solver::Opening;
use crate::state::{GameState, Side};
use crate::value::Points;
use crate::APPROX_SAMPLE_SIZE;

/// Monte Carlo estimate of the same quantity the walk computes exactly.
#[derive(Debug, Builder)]
pub struct Approx<G = StdRng>
where
    G: RngCore,
{
    #[builder(finish_fn)]
    rng: G,
    #[builder(default = APPROX_SAMPLE_SIZE)]
    sample_size: u32,
    #[builder(default)]
    opening: Opening,
}

impl Default for Approx<StdRng> {
    fn default() -> Self {
        Self::builder().build(StdRng::from_entropy())
    }
}

impl<G> Approx<G>
where
    G: RngCore,
{
    /// Fraction of sampled rounds Red wins outright.
    #[must_use]
    pub fn estimate(&mut self, state: &GameState) -> f64 {
        let mut wins = 0u32;
        for _ in 0..self.sample_size {
            if self.play(state.clone()) == Ordering::Greater {
                wins += 1;
            }
        }
        log::debug!(
            "{:<32}{:<16}{:<16}",
            "sampled rounds",
            format!("samples {}", self.sample_size),
            format!("red wins {wins}")
        );
        f64::from(wins) / f64::from(self.sample_size.max(1))
    }

    fn play(&mut self, mut state: GameState) -> Ordering {
        let mut side = match self.opening {
            Opening::Random if self.rng.gen_bool(0.5) => Side::Red,
            Opening::Random => Side::Green,
            Opening::Red => Side::Red,
            Opening::Green => Side::Green,
        };

        while !state.all_returned() {
            if state.diver(side).returned {
                side = side.other();
                continue;
            }
            state.breathe(side);
            let sum = *roll().sample_rng(&mut self.rng);
            let mut moves = state.moves(side, sum);
            let pick = self.rng.gen_range(0..moves.len());
            let (decision, next) = moves.swap_remove(pick);
            log::trace!(
                "{:<32}{:<16}{:<16}",
                format!("{side:?} rolls {sum}"),
                format!("{decision:?}"),
                format!("oxygen {}", next.oxygen)
            );
            state = next;
            if state.oxygen <= 0 {
                break;
            }
            side = side.other();
        }

        let red = self.resolve(&state, Side::Red);
        let green = self.resolve(&state, Side::Green);
        red.cmp(&green)
    }

    fn resolve(&mut self, state: &GameState, side: Side) -> Points {
        let diver = state.diver(side);
        if !diver.returned {
            return diver.banked;
        }
        diver.banked
            + diver
                .hold
                .iter()
                .map(|t| *t.die().sample_rng(&mut self.rng))
                .sum::<Points>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Board, Diver};
    use crate::tier::Tier;

    #[test]
    fn certain_round_is_always_won() {
        let state = GameState::new(
            3,
            Diver::new(0, 30, Vec::new()),
            Diver::new(0, 10, Vec::new()),
            Board::new(),
        );
        let mut approx = Approx::builder()
            .sample_size(100)
            .build(StdRng::seed_from_u64(1));
        assert_eq!(approx.estimate(&state), 1.0);
    }

    #[test]
    fn coin_flip_treasure() {
        // red 10 + {0,1,2,3} against green 11: red wins half the time
        let state = GameState::new(
            3,
            Diver::new(0, 10, vec![Tier::Shallow]),
            Diver::new(0, 11, Vec::new()),
            Board::new(),
        );
        let mut approx = Approx::builder()
            .sample_size(20_000)
            .opening(Opening::Red)
            .build(StdRng::seed_from_u64(2));
        assert!((approx.estimate(&state) - 0.5).abs() < 0.03);
    }
}
