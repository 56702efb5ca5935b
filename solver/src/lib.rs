//! # Run Expectancy — base/out Markov-chain run estimator
//!
//! Estimates how many runs a lineup scores per game from its per-plate-appearance
//! outcome counts (walks, strikeouts, fielder's choices, reached on error,
//! singles, doubles, triples, home runs).
//!
//! ## Algorithm overview
//!
//! | Step | Rust module | Description |
//! |------|-------------|-------------|
//! | 0 | [`outcome_model`] | Rate statistics to a probability for each of 9 outcome categories |
//! | 1 | [`transitions`] | Worklist discovery of every base/out state reachable from bases empty, nobody out, with merged (next_state, runs, probability) edges |
//! | 2 | [`state_computation`] | Fixed-point iteration of expected runs until the third out, 50 passes by default |
//! | 3 | [`estimator`] | Expected runs from the initial state, times innings per game (7 by default) |
//!
//! The per-play successor function lives in [`game_mechanics`] and is shared
//! with the Monte Carlo engine in [`simulation`].
//!
//! ## State representation
//!
//! A half-inning situation is one byte: outs in bits 0-1, base occupancy in bits
//! 2-4, runs scored on the last play in bits 5-7 (see [`constants`]). Runners
//! advance by shifting the occupancy bits; bits pushed past third base land in
//! the runs field. Graph nodes always have the runs field cleared, giving at most
//! 25 states (8 base patterns x 3 out counts, plus three outs).
//!
//! ## Simplified base running
//!
//! Every runner advances the same number of bases on a play: one on a walk,
//! single, error or productive out, two on a double, three on a triple or home
//! run. Walks do not distinguish forced runners, fielder's choices retire the
//! batter, and singles never score a runner from second.

pub mod constants;
pub mod env_config;
pub mod error;
pub mod estimator;
pub mod game_mechanics;
pub mod outcome_model;
pub mod simulation;
pub mod state_computation;
pub mod transitions;
pub mod types;

pub use error::{EstimateError, Result};
pub use estimator::{estimate_runs, Estimator, EstimatorConfig, RunEstimate};
pub use types::{GameState, Outcome, RateStats};
