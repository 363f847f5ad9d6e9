mod approx;
pub mod defs;
mod die;
pub mod scenario;
mod score;
mod solver;
mod state;
mod tier;
mod util;
mod value;
mod walk;

pub use approx::Approx;
pub use die::Die;
pub use scenario::{Scenario, Seat};
pub use score::{score, Settle, Tally, Verdict};
pub use solver::{win_probability, Opening, Solver};
pub use state::{Board, Decision, Diver, GameState, Side};
use thiserror::Error;
pub use tier::Tier;
pub use util::{Cell, Outcome, OverflowError};
pub use value::{ComputableValue, Points, Value};
pub use walk::Walker;

pub type Result<T> = ::core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("treasure tier {0} is outside 1..=4")]
    Tier(u8),
    #[error("oxygen must be positive, got {0}")]
    Oxygen(i32),
    #[error("starting position must not be negative, got {0}")]
    Position(i32),
    #[error("cannot parse board cell `{0}`, expected `cell:tier`")]
    Cell(String),
    #[error("cannot parse treasure list `{0}`, expected comma separated tiers")]
    Hold(String),
    #[error("unknown opening `{0}`, expected random, red or green")]
    Opening(String),
    #[error("{0} treasures in play, at most 63 can be scored exactly")]
    Treasures(usize),
    #[error(transparent)]
    Overflow(#[from] OverflowError),
    #[error("malformed scenario: {0}")]
    Json(#[from] serde_json::Error),
}

const EPSILON: f64 = 1e-9;
const APPROX_SAMPLE_SIZE: u32 = 1_000_000;
/// Treasures in holds and on the board together; `4^63` resolutions still fit in an `Outcome`.
pub const MAX_TREASURES: usize = 63;
