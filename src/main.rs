use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use deepsea::scenario::{parse_board, parse_hold};
use deepsea::{Approx, Opening, Scenario, Solver};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Exact probability that Red wins a two-diver treasure round.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON scenario file; the reference round when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,
    #[arg(long)]
    oxygen: Option<i32>,
    #[arg(long)]
    red_position: Option<i32>,
    #[arg(long)]
    green_position: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    red_banked: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    green_banked: Option<i32>,
    /// Carried tiers, e.g. `4,2`
    #[arg(long)]
    red_hold: Option<String>,
    #[arg(long)]
    green_hold: Option<String>,
    /// Treasure per cell, e.g. `1:1,2:0,3:1`
    #[arg(long)]
    board: Option<String>,
    /// Branches less likely than this are abandoned
    #[arg(long, default_value_t = 1e-9)]
    epsilon: f64,
    #[arg(long, default_value_t = Opening::Random)]
    opening: Opening,
    /// Also play this many random rounds as a cross-check
    #[arg(long)]
    samples: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn scenario(&self) -> anyhow::Result<Scenario> {
        let mut scenario = match &self.scenario {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                Scenario::from_json(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => Scenario::default(),
        };
        if let Some(x) = self.oxygen {
            scenario.oxygen = x;
        }
        if let Some(x) = self.red_position {
            scenario.red.position = x;
        }
        if let Some(x) = self.green_position {
            scenario.green.position = x;
        }
        if let Some(x) = self.red_banked {
            scenario.red.banked = x;
        }
        if let Some(x) = self.green_banked {
            scenario.green.banked = x;
        }
        if let Some(x) = &self.red_hold {
            scenario.red.hold = parse_hold(x)?;
        }
        if let Some(x) = &self.green_hold {
            scenario.green.hold = parse_hold(x)?;
        }
        if let Some(x) = &self.board {
            scenario.board = parse_board(x)?;
        }
        Ok(scenario)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let scenario = args.scenario()?;
    let state = scenario.state().context("invalid starting position")?;
    log::info!(
        "{:<32}{:<16}{:<16}",
        "starting position",
        format!("oxygen {}", state.oxygen),
        format!("treasures {}", state.board.len())
    );
    log::info!(
        "{:<32}{:<16}{:<16}",
        "expected hold value",
        format!("red {:.3}", state.red.totals()?.mean()),
        format!("green {:.3}", state.green.totals()?.mean())
    );

    println!("Calculating win probability for Red player...");
    let tally = Solver::builder()
        .epsilon(args.epsilon)
        .opening(args.opening)
        .build()
        .solve(&state);

    println!("------------------------------------------");
    println!(
        "Total Red Player Win Probability: {:.4}%",
        tally.win_probability() * 100.0
    );
    println!("------------------------------------------");
    log::info!(
        "{:<32}{:<16}{:<16}",
        "green wins / ties",
        format!("{:.4}%", tally.green * 100.0),
        format!("{:.4}%", tally.tied * 100.0)
    );
    if tally.unscored > 0.0 {
        log::warn!("{:<32}{:<16}", "unscored mass", format!("{:e}", tally.unscored));
    }

    if let Some(samples) = args.samples {
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let estimate = Approx::builder()
            .sample_size(samples)
            .opening(args.opening)
            .build(rng)
            .estimate(&state);
        println!("Sampled Red Player Win Probability: {:.4}%", estimate * 100.0);
    }

    Ok(())
}
