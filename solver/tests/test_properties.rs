//! Property-based tests for the base/out model.

use proptest::prelude::*;

use run_expectancy::game_mechanics::{add_out, move_runners};
use run_expectancy::outcome_model::OutcomeDistribution;
use run_expectancy::state_computation::compute_expected_runs;
use run_expectancy::transitions::TransitionGraph;
use run_expectancy::{Estimator, GameState, RateStats};

/// Strategy: generate valid rate statistics (named counts plus 0-20 balls-in-play outs).
fn stats_strategy() -> impl Strategy<Value = RateStats> {
    (prop::array::uniform8(0u32..=8), 0u32..=20).prop_filter_map(
        "no outcome records an out",
        |(c, extra)| {
            let named: u32 = c.iter().sum();
            let stats = RateStats {
                plate_appearances: named + extra,
                walks: c[0],
                strikeouts: c[1],
                fielders_choices: c[2],
                reached_on_error: c[3],
                singles: c[4],
                doubles: c[5],
                triples: c[6],
                home_runs: c[7],
            };
            stats.validate().ok().map(|_| stats)
        },
    )
}

/// Strategy: any non-terminal state, possibly carrying runs.
fn state_strategy() -> impl Strategy<Value = GameState> {
    (any::<[bool; 3]>(), 0u8..=2, 0u8..=1).prop_map(|(b, outs, runs)| {
        GameState::new(b[0], b[1], b[2], outs).add_runs_scored(runs)
    })
}

proptest! {
    // 1. Every row of the transition graph is a probability distribution
    #[test]
    fn rows_sum_to_one(stats in stats_strategy()) {
        let dist = OutcomeDistribution::from_stats(&stats).unwrap();
        let graph = TransitionGraph::build(&dist);
        prop_assert!(graph.len() <= 25);
        for &state in graph.states() {
            let row = graph.transitions(state);
            let total: f64 = row.iter().map(|t| t.prob).sum();
            prop_assert!((total - 1.0).abs() < 1e-9, "{} sums to {}", state, total);
            prop_assert!(row.iter().all(|t| t.prob > 0.0));
            if state.is_terminal() {
                prop_assert_eq!(row.len(), 1);
                prop_assert_eq!(row[0].next_state, GameState::TERMINAL);
                prop_assert_eq!(row[0].runs, 0);
            }
        }
    }

    // 2. The third out always yields the canonical terminal state
    #[test]
    fn third_out_is_terminal(b in any::<[bool; 3]>(), runs in 0u8..=4) {
        let s = GameState::new(b[0], b[1], b[2], 2).add_runs_scored(runs);
        prop_assert_eq!(add_out(s), GameState::TERMINAL);
    }

    // 3. Advancing further never scores fewer runs, and runners are conserved
    #[test]
    fn move_runners_monotone(state in state_strategy(), a in 0u8..=3, b in 0u8..=3) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let near = move_runners(state, lo);
        let far = move_runners(state, hi);
        prop_assert!(near.runs_scored() <= far.runs_scored());
        prop_assert_eq!(far.outs(), state.outs());
        let scored = (far.runs_scored() - state.runs_scored()) as u32;
        prop_assert_eq!(far.runners_on() + scored, state.runners_on());
    }

    // 4. Terminal value is exactly zero and every value is non-negative
    #[test]
    fn expected_runs_non_negative(stats in stats_strategy()) {
        let dist = OutcomeDistribution::from_stats(&stats).unwrap();
        let graph = TransitionGraph::build(&dist);
        let table = compute_expected_runs(&graph, 50);
        prop_assert_eq!(table.get(GameState::TERMINAL), Some(0.0));
        for &state in graph.states() {
            prop_assert!(table.get(state).unwrap() >= 0.0);
        }
    }

    // 5. Turning a ball-in-play out into a home run raises the estimate
    #[test]
    fn more_home_runs_more_runs(c in prop::array::uniform8(0u32..=3)) {
        let base = RateStats {
            plate_appearances: 40,
            walks: c[0],
            strikeouts: c[1],
            fielders_choices: c[2],
            reached_on_error: c[3],
            singles: c[4],
            doubles: c[5],
            triples: c[6],
            home_runs: c[7],
        };
        let more = RateStats { home_runs: base.home_runs + 1, ..base };
        let estimator = Estimator::default();
        let lo = estimator.estimate(&base).unwrap().expected_runs;
        let hi = estimator.estimate(&more).unwrap().expected_runs;
        prop_assert!(lo >= 0.0);
        prop_assert!(hi > lo, "hr {} -> {}: {} !> {}", base.home_runs, more.home_runs, hi, lo);
    }

    // 6. Same input, same output
    #[test]
    fn estimate_is_repeatable(stats in stats_strategy(), other in stats_strategy()) {
        let estimator = Estimator::default();
        let first = estimator.estimate(&stats).unwrap();
        let _ = estimator.estimate(&other).unwrap();
        let second = estimator.estimate(&stats).unwrap();
        prop_assert_eq!(first, second);
    }

    // 7. Clearing runs leaves bases and outs untouched
    #[test]
    fn clear_runs_preserves_situation(state in state_strategy(), runs in 0u8..=3) {
        let s = state.add_runs_scored(runs);
        let cleared = s.clear_runs_scored();
        prop_assert_eq!(cleared.runs_scored(), 0);
        prop_assert_eq!(cleared.bases(), state.bases());
        prop_assert_eq!(cleared.outs(), state.outs());
    }
}
