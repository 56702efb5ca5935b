//! Reachability graph: every base/out state reachable from the empty-bases,
//! nobody-out state, with its outgoing (next_state, runs, probability) edges.
//!
//! Discovery uses an explicit worklist rather than recursion. Nodes are
//! canonical states (runs field cleared); the runs a play produces travel on the
//! edge. The graph is built fresh for each outcome distribution and is immutable
//! afterwards.

use tracing::debug;

use crate::constants::*;
use crate::game_mechanics::apply_outcome;
use crate::outcome_model::OutcomeDistribution;
use crate::types::GameState;

/// A single transition: from the current state to `next_state`, scoring `runs`
/// with probability `prob`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTransition {
    pub next_state: GameState,
    pub runs: u8,
    pub prob: f64,
}

/// Compute all transitions from `state` under `dist`.
///
/// Outcomes that lead to the same (next_state, runs) pair are merged by summing
/// their probabilities. Zero-probability outcomes produce no edge. The terminal
/// state has a single self-edge with probability 1 and no runs.
pub fn compute_transitions(state: GameState, dist: &OutcomeDistribution) -> Vec<StateTransition> {
    if state.is_terminal() {
        return vec![StateTransition {
            next_state: GameState::TERMINAL,
            runs: 0,
            prob: 1.0,
        }];
    }

    let mut raw: Vec<((GameState, u8), f64)> = Vec::with_capacity(OUTCOME_COUNT);
    for (outcome, p) in dist.iter() {
        if p <= 0.0 {
            continue;
        }
        let next = apply_outcome(state, outcome);
        raw.push(((next.clear_runs_scored(), next.runs_scored()), p));
    }

    // Sort by key and merge duplicates.
    raw.sort_unstable_by_key(|&(k, _)| k);
    let mut result: Vec<StateTransition> = Vec::with_capacity(raw.len());
    for ((next_state, runs), prob) in raw {
        if let Some(last) = result.last_mut() {
            if last.next_state == next_state && last.runs == runs {
                last.prob += prob;
                continue;
            }
        }
        result.push(StateTransition {
            next_state,
            runs,
            prob,
        });
    }
    result
}

/// Transition rows for every state reachable from [`GameState::INITIAL`].
pub struct TransitionGraph {
    /// rows[state_index(key)]: outgoing edges, empty for undiscovered slots.
    rows: Vec<Vec<StateTransition>>,
    /// Discovered states in discovery order.
    states: Vec<GameState>,
}

impl TransitionGraph {
    /// Discover every reachable state and its transitions.
    pub fn build(dist: &OutcomeDistribution) -> Self {
        let mut rows: Vec<Vec<StateTransition>> = vec![Vec::new(); NUM_STATE_SLOTS];
        let mut seen = [false; NUM_STATE_SLOTS];
        let mut states = Vec::new();
        let mut worklist = vec![GameState::INITIAL];
        seen[state_index(GameState::INITIAL.key())] = true;

        while let Some(state) = worklist.pop() {
            let row = compute_transitions(state, dist);
            for t in &row {
                let si = state_index(t.next_state.key());
                if !seen[si] {
                    seen[si] = true;
                    worklist.push(t.next_state);
                }
            }
            rows[state_index(state.key())] = row;
            states.push(state);
        }

        debug!(states = states.len(), "transition graph built");
        Self { rows, states }
    }

    /// Discovered states in discovery order.
    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn contains(&self, state: GameState) -> bool {
        !self.transitions(state).is_empty()
    }

    /// Outgoing edges of `state`. Empty if `state` was never reached.
    pub fn transitions(&self, state: GameState) -> &[StateTransition] {
        let key = state.clear_runs_scored().key() as usize;
        self.rows.get(key).map(Vec::as_slice).unwrap_or(&[])
    }
}
