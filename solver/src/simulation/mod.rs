//! Sampling-based alternative to the analytic estimator.
//!
//! - [`engine`]: play N games by drawing outcomes and applying the shared transition rules

pub mod engine;

pub use engine::{
    simulate_batch, simulate_game, simulate_half_inning, OutcomeTally, SimulationResult,
};
