//! Estimator entry point: rate statistics in, expected runs per game out.
//!
//! Every call classifies the stats, builds its own transition graph, and solves
//! it. Nothing is cached between calls, so results do not depend on call order.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_INNINGS_PER_GAME, DEFAULT_REFINEMENT_PASSES};
use crate::env_config;
use crate::error::Result;
use crate::outcome_model::OutcomeDistribution;
use crate::state_computation::{compute_expected_runs, ExpectedRunsTable};
use crate::transitions::TransitionGraph;
use crate::types::RateStats;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Half-innings the lineup bats per game.
    pub innings_per_game: u32,
    /// Fixed-point refinement passes in the solver.
    pub refinement_passes: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            innings_per_game: DEFAULT_INNINGS_PER_GAME,
            refinement_passes: DEFAULT_REFINEMENT_PASSES,
        }
    }
}

impl EstimatorConfig {
    /// Defaults overridden by `RUNS_INNINGS_PER_GAME` and `RUNS_REFINEMENT_PASSES`.
    pub fn from_env() -> Self {
        Self {
            innings_per_game: env_config::innings_per_game(),
            refinement_passes: env_config::refinement_passes(),
        }
    }
}

/// Result of one estimate.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunEstimate {
    /// Expected runs in one half-inning from bases empty, nobody out.
    pub runs_per_inning: f64,
    pub innings_per_game: u32,
    /// `runs_per_inning * innings_per_game`.
    pub expected_runs: f64,
    /// Reachable states, terminal included.
    pub states: usize,
    pub passes: usize,
    pub converged: bool,
}

/// Everything computed for one lineup.
pub struct Solution {
    pub distribution: OutcomeDistribution,
    pub graph: TransitionGraph,
    pub table: ExpectedRunsTable,
}

#[derive(Clone, Debug, Default)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Classify, build the graph and solve it.
    pub fn solve(&self, stats: &RateStats) -> Result<Solution> {
        let distribution = OutcomeDistribution::from_stats(stats)?;
        let graph = TransitionGraph::build(&distribution);
        let table = compute_expected_runs(&graph, self.config.refinement_passes);
        Ok(Solution {
            distribution,
            graph,
            table,
        })
    }

    pub fn estimate(&self, stats: &RateStats) -> Result<RunEstimate> {
        let solution = self.solve(stats)?;
        let runs_per_inning = solution.table.initial();
        let estimate = RunEstimate {
            runs_per_inning,
            innings_per_game: self.config.innings_per_game,
            expected_runs: runs_per_inning * self.config.innings_per_game as f64,
            states: solution.graph.len(),
            passes: solution.table.passes(),
            converged: solution.table.converged(),
        };
        debug!(
            runs_per_inning,
            expected_runs = estimate.expected_runs,
            "estimate complete"
        );
        Ok(estimate)
    }
}

/// Expected runs over a game with the default seven innings and 50 passes.
///
/// Counts are signed so callers holding untyped numbers get an
/// [`EstimateError::InvalidInput`](crate::error::EstimateError::InvalidInput)
/// for negatives instead of a conversion panic.
#[allow(clippy::too_many_arguments)]
pub fn estimate_runs(
    plate_appearances: i64,
    walks: i64,
    strikeouts: i64,
    fielders_choices: i64,
    reached_on_error: i64,
    singles: i64,
    doubles: i64,
    triples: i64,
    home_runs: i64,
) -> Result<f64> {
    let stats = RateStats::from_signed(
        plate_appearances,
        walks,
        strikeouts,
        fielders_choices,
        reached_on_error,
        singles,
        doubles,
        triples,
        home_runs,
    )?;
    Ok(Estimator::default().estimate(&stats)?.expected_runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimateError;

    #[test]
    fn test_strikeouts_only_is_zero() {
        assert_eq!(estimate_runs(27, 0, 27, 0, 0, 0, 0, 0, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_scales_by_innings() {
        let stats = RateStats::from_signed(4, 0, 2, 0, 0, 0, 0, 0, 2).unwrap();
        let seven = Estimator::default().estimate(&stats).unwrap();
        assert!((seven.runs_per_inning - 3.0).abs() < 1e-9);
        assert!((seven.expected_runs - 21.0).abs() < 1e-8);
        assert_eq!(seven.innings_per_game, 7);

        let nine = Estimator::new(EstimatorConfig {
            innings_per_game: 9,
            ..EstimatorConfig::default()
        })
        .estimate(&stats)
        .unwrap();
        assert!((nine.expected_runs - 27.0).abs() < 1e-8);
        assert_eq!(nine.runs_per_inning, seven.runs_per_inning);
    }

    #[test]
    fn test_repeatable() {
        let first = estimate_runs(40, 2, 6, 1, 4, 9, 2, 1, 1).unwrap();
        let _other = estimate_runs(13, 0, 3, 1, 1, 3, 1, 1, 1).unwrap();
        let second = estimate_runs(40, 2, 6, 1, 4, 9, 2, 1, 1).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            estimate_runs(0, 0, 0, 0, 0, 0, 0, 0, 0),
            Err(EstimateError::InvalidInput(_))
        ));
        assert!(matches!(
            estimate_runs(10, 0, 0, 0, 0, 0, 0, 0, -2),
            Err(EstimateError::InvalidInput(_))
        ));
        assert!(matches!(
            estimate_runs(10, 5, 5, 0, 0, 1, 0, 0, 0),
            Err(EstimateError::InvalidInput(_))
        ));
        // Home runs every time: the inning never ends.
        assert!(matches!(
            estimate_runs(10, 0, 0, 0, 0, 0, 0, 0, 10),
            Err(EstimateError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_estimate_reports_graph() {
        let stats = RateStats::from_signed(15, 2, 3, 0, 1, 3, 0, 0, 0).unwrap();
        let est = Estimator::default().estimate(&stats).unwrap();
        assert!(est.expected_runs > 0.0);
        assert!(est.converged);
        assert_eq!(est.passes, 50);
        assert!(est.states <= 25);
    }

    #[test]
    fn test_config_json() {
        let config: EstimatorConfig =
            serde_json::from_str(r#"{"innings_per_game": 9, "refinement_passes": 80}"#).unwrap();
        assert_eq!(config.innings_per_game, 9);
        assert_eq!(config.refinement_passes, 80);
    }
}
