use crate::defs::roll;
use crate::score::Settle;
use crate::state::{GameState, Side};

/// Depth-first walk over every dice outcome and decision of a round.
pub struct Walker<'a, S>
where
    S: Settle,
{
    epsilon: f64,
    sink: &'a mut S,
}

impl<'a, S> Walker<'a, S>
where
    S: Settle,
{
    pub fn new(epsilon: f64, sink: &'a mut S) -> Self {
        Self { epsilon, sink }
    }

    /// Explores every continuation of `state` with `side` to act, reached with probability `mass`.
    pub fn walk(&mut self, mut state: GameState, side: Side, mass: f64) {
        if mass < self.epsilon {
            self.sink.prune(mass);
            return;
        }

        if state.all_returned() {
            self.sink.settle(&state, mass);
            return;
        }

        if state.diver(side).returned {
            self.walk(state, side.other(), mass);
            return;
        }

        state.breathe(side);

        let dice = roll();
        let denom = dice.denom() as f64;
        for (&sum, &count) in dice.iter() {
            let chance = count as f64 / denom;
            let moves = state.moves(side, sum);
            let share = 1.0 / moves.len() as f64;
            for (_, next) in moves {
                let m = mass * chance * share;
                if next.oxygen <= 0 {
                    self.sink.settle(&next, m);
                } else {
                    self.walk(next, side.other(), m);
                }
            }
        }
    }
}
