//! Monte Carlo engine: plays N games by sampling one outcome per plate
//! appearance and applying the same transition rules as the analytic model.
//!
//! The mean runs per game converges to [`crate::estimator::Estimator::estimate`],
//! which makes the engine a cross-check on the graph builder and solver.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;
use tracing::info;

use crate::constants::OUTCOME_COUNT;
use crate::error::{EstimateError, Result};
use crate::game_mechanics::apply_outcome;
use crate::outcome_model::OutcomeDistribution;
use crate::types::{GameState, Outcome, RateStats};

/// How often each outcome was sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeTally {
    counts: [u64; OUTCOME_COUNT],
}

impl OutcomeTally {
    #[inline(always)]
    pub fn record(&mut self, outcome: Outcome) {
        self.counts[outcome.index()] += 1;
    }

    pub fn get(&self, outcome: Outcome) -> u64 {
        self.counts[outcome.index()]
    }

    /// Total plate appearances.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn merge(&mut self, other: &OutcomeTally) {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }
}

/// Results of a batch simulation.
pub struct SimulationResult {
    /// Runs per game, sorted ascending.
    pub runs: Vec<u32>,
    pub mean: f64,
    pub std_dev: f64,
    pub min: u32,
    pub max: u32,
    pub median: u32,
    pub tally: OutcomeTally,
    pub elapsed: std::time::Duration,
}

/// Play one half-inning from bases empty, returning the runs scored.
pub fn simulate_half_inning(
    dist: &OutcomeDistribution,
    rng: &mut SmallRng,
    tally: &mut OutcomeTally,
) -> u32 {
    let mut state = GameState::INITIAL;
    let mut runs = 0u32;
    while !state.is_terminal() {
        let outcome = dist.sample(rng.random::<f64>());
        tally.record(outcome);
        let next = apply_outcome(state, outcome);
        runs += next.runs_scored() as u32;
        state = next.clear_runs_scored();
    }
    runs
}

/// Play `innings` half-innings, returning the total runs.
pub fn simulate_game(
    dist: &OutcomeDistribution,
    innings: u32,
    rng: &mut SmallRng,
    tally: &mut OutcomeTally,
) -> u32 {
    (0..innings)
        .map(|_| simulate_half_inning(dist, rng, tally))
        .sum()
}

/// Simulate N games in parallel. Game `i` is seeded with `seed + i`, so the
/// result is the same for a given seed regardless of thread count.
pub fn simulate_batch(
    stats: &RateStats,
    innings: u32,
    num_games: usize,
    seed: u64,
) -> Result<SimulationResult> {
    if num_games == 0 {
        return Err(EstimateError::InvalidInput(
            "number of games must be positive".to_string(),
        ));
    }
    let dist = OutcomeDistribution::from_stats(stats)?;
    let start = Instant::now();

    let games: Vec<(u32, OutcomeTally)> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut tally = OutcomeTally::default();
            let runs = simulate_game(&dist, innings, &mut rng, &mut tally);
            (runs, tally)
        })
        .collect();

    let elapsed = start.elapsed();

    let mut tally = OutcomeTally::default();
    let mut runs: Vec<u32> = Vec::with_capacity(num_games);
    for (r, t) in &games {
        runs.push(*r);
        tally.merge(t);
    }

    let sum: f64 = runs.iter().map(|&r| r as f64).sum();
    let mean = sum / num_games as f64;
    let variance: f64 = runs
        .iter()
        .map(|&r| (r as f64 - mean).powi(2))
        .sum::<f64>()
        / num_games as f64;
    let std_dev = variance.sqrt();

    runs.sort_unstable();
    let min = runs[0];
    let max = runs[num_games - 1];
    let median = runs[num_games / 2];

    info!(
        games = num_games,
        mean,
        std_dev,
        elapsed_ms = elapsed.as_millis() as u64,
        "simulation complete"
    );

    Ok(SimulationResult {
        runs,
        mean,
        std_dev,
        min,
        max,
        median,
        tally,
        elapsed,
    })
}
