//! Expected-runs solver: E[S] for every discovered state S, the expected runs
//! scored from S before the third out.
//!
//! Fixed-point iteration with ping-pong buffers:
//!
//! ```text
//! E_0[S]   = 0
//! E_k+1[S] = sum over edges (S -> S', runs, p) of p * (runs + E_k[S'])
//! ```
//!
//! After k passes E_k[S] is the expected runs over at most k more plate
//! appearances, so the values rise monotonically toward the fixed point. The
//! terminal state has a zero-run self-edge and stays at 0. The pass count is
//! fixed rather than convergence-driven; the final pass delta is kept so
//! callers can tell when a high on-base line needed more passes.

use tracing::{trace, warn};

use crate::constants::*;
use crate::transitions::TransitionGraph;
use crate::types::GameState;

/// Solved expected-runs values for one transition graph.
#[derive(Clone, Debug)]
pub struct ExpectedRunsTable {
    /// values[state_index(key)] = E[S]; undiscovered slots stay 0.
    values: [f64; NUM_STATE_SLOTS],
    discovered: [bool; NUM_STATE_SLOTS],
    passes: usize,
    last_delta: f64,
}

impl ExpectedRunsTable {
    /// Expected runs from `state` until three outs, if `state` was discovered.
    pub fn get(&self, state: GameState) -> Option<f64> {
        let si = state_index(state.clear_runs_scored().key());
        self.discovered[si].then_some(self.values[si])
    }

    /// Expected runs per half-inning: E at bases empty, nobody out.
    pub fn initial(&self) -> f64 {
        self.values[state_index(GameState::INITIAL.key())]
    }

    /// Refinement passes performed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Largest change of any state value during the final pass.
    pub fn last_delta(&self) -> f64 {
        self.last_delta
    }

    pub fn converged(&self) -> bool {
        self.last_delta <= CONVERGENCE_TOLERANCE
    }

    /// Base/out run-expectancy grid.
    ///
    /// `matrix[bases][outs]` where `bases` is the 3-bit occupancy pattern
    /// (bit 0 = first, bit 1 = second, bit 2 = third) and `outs` is 0..=2.
    /// States the lineup can never reach are `None`.
    pub fn run_expectancy_matrix(&self) -> [[Option<f64>; 3]; 8] {
        let mut matrix = [[None; 3]; 8];
        for (bases, row) in matrix.iter_mut().enumerate() {
            for (outs, cell) in row.iter_mut().enumerate() {
                let state = GameState::new(bases & 1 != 0, bases & 2 != 0, bases & 4 != 0, outs as u8);
                *cell = self.get(state);
            }
        }
        matrix
    }
}

/// Run `passes` refinement passes over `graph`.
pub fn compute_expected_runs(graph: &TransitionGraph, passes: usize) -> ExpectedRunsTable {
    let mut prev = [0.0f64; NUM_STATE_SLOTS];
    let mut next = [0.0f64; NUM_STATE_SLOTS];
    let mut discovered = [false; NUM_STATE_SLOTS];
    for &state in graph.states() {
        discovered[state_index(state.key())] = true;
    }

    let mut last_delta = 0.0f64;
    for pass in 0..passes {
        last_delta = 0.0;
        for &state in graph.states() {
            let si = state_index(state.key());
            let ev: f64 = graph
                .transitions(state)
                .iter()
                .map(|t| t.prob * (t.runs as f64 + prev[state_index(t.next_state.key())]))
                .sum();
            last_delta = last_delta.max((ev - prev[si]).abs());
            next[si] = ev;
        }
        std::mem::swap(&mut prev, &mut next);
        trace!(pass, delta = last_delta, "refinement pass");
    }

    if last_delta > CONVERGENCE_TOLERANCE {
        warn!(
            passes,
            delta = last_delta,
            "expected runs not converged; increase refinement passes"
        );
    }

    ExpectedRunsTable {
        values: prev,
        discovered,
        passes,
        last_delta,
    }
}
