//! Base/out transition rules: the successor function n(S, o) for a state S and
//! plate-appearance outcome o.
//!
//! Runners are moved by shifting the occupancy bits as if they were a binary
//! number. Bits shifted past third base land in the runs field, where each set
//! bit is one runner who crossed the plate.

use crate::constants::*;
use crate::types::{GameState, Outcome, OutcomeRule};

/// Record one out.
///
/// The third out returns [`GameState::TERMINAL`], discarding runners and any
/// runs on the play.
#[inline(always)]
pub fn add_out(state: GameState) -> GameState {
    if state.outs() >= OUTS_PER_INNING - 1 {
        return GameState::TERMINAL;
    }
    // Outs occupy the low bits and are below 2 here, so the add cannot carry.
    GameState::from_raw(state.key() + 1)
}

/// Advance every runner by `bases`, crediting the runners pushed past third.
///
/// Runs already in the runs field are kept.
#[inline(always)]
pub fn move_runners(state: GameState, bases: u8) -> GameState {
    debug_assert!(bases <= 3, "runners cannot advance {} bases", bases);
    let shifted = (state.key() & BASES_MASK) << bases;
    // Overflow pattern 0b011 is two runners, not three: count bits, not value.
    let scored = (shifted >> RUNS_SHIFT).count_ones() as u8;
    GameState::from_raw((shifted & BASES_MASK) | state.outs())
        .add_runs_scored(state.runs_scored() + scored)
}

/// Apply an outcome rule: out, then runner movement, then batter score, then
/// batter placement.
///
/// The out is applied first so a third out short-circuits before any run can be
/// credited on the same play.
pub fn state_transition(state: GameState, rule: &OutcomeRule) -> GameState {
    let with_out = if rule.records_out {
        add_out(state)
    } else {
        state
    };
    if with_out.is_terminal() {
        return with_out;
    }

    let moved = if rule.runner_advance > 0 {
        move_runners(with_out, rule.runner_advance)
    } else {
        with_out
    };
    let scored = if rule.batter_scores {
        moved.add_runs_scored(1)
    } else {
        moved
    };
    match rule.batter_base {
        Some(base) => scored.with_runner(base),
        None => scored,
    }
}

/// Successor of `state` after `outcome`, with the play's runs still in the runs field.
#[inline(always)]
pub fn apply_outcome(state: GameState, outcome: Outcome) -> GameState {
    state_transition(state, &outcome.rule())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn st(b1: bool, b2: bool, b3: bool, outs: u8) -> GameState {
        GameState::new(b1, b2, b3, outs)
    }

    #[test]
    fn test_add_out_increments() {
        let s = st(true, false, true, 0).add_runs_scored(1);
        let next = add_out(s);
        assert_eq!(next.outs(), 1);
        assert!(next.on_first() && next.on_third());
        assert_eq!(next.runs_scored(), 1);
    }

    #[test]
    fn test_third_out_is_canonical_terminal() {
        for bases in 0..8u8 {
            let s = st(bases & 1 != 0, bases & 2 != 0, bases & 4 != 0, 2);
            assert_eq!(add_out(s), GameState::TERMINAL);
        }
    }

    #[test]
    fn test_move_runners_counts_runners_not_value() {
        // Second and third, two bases: both score.
        let s = move_runners(st(false, true, true, 0), 2);
        assert_eq!(s.runs_scored(), 2);
        assert_eq!(s.runners_on(), 0);

        // Bases loaded, one base: runner from third scores, the rest shift up.
        let s = move_runners(st(true, true, true, 1), 1);
        assert_eq!(s.runs_scored(), 1);
        assert!(!s.on_first() && s.on_second() && s.on_third());
        assert_eq!(s.outs(), 1);

        // Bases loaded, three bases: everyone scores.
        let s = move_runners(st(true, true, true, 2), 3);
        assert_eq!(s.runs_scored(), 3);
        assert_eq!(s.runners_on(), 0);
        assert_eq!(s.outs(), 2);
    }

    #[test]
    fn test_move_runners_zero_is_identity() {
        let s = st(true, false, true, 1);
        assert_eq!(move_runners(s, 0), s);
    }

    #[test]
    fn test_grand_slam_scores_four() {
        let s = apply_outcome(st(true, true, true, 0), Outcome::HomeRun);
        assert_eq!(s.runs_scored(), 4);
        assert_eq!(s.clear_runs_scored(), GameState::INITIAL);
    }

    #[test]
    fn test_no_runs_on_third_out() {
        // Productive out with a runner on third and two outs: inning over, run does not count.
        let s = apply_outcome(st(false, false, true, 2), Outcome::ProductiveOut);
        assert_eq!(s, GameState::TERMINAL);
        assert_eq!(s.runs_scored(), 0);
    }

    #[test]
    fn test_productive_out_scores_from_third() {
        let s = apply_outcome(st(false, false, true, 0), Outcome::ProductiveOut);
        assert_eq!(s.runs_scored(), 1);
        assert_eq!(s.clear_runs_scored(), st(false, false, false, 1));
    }

    #[test]
    fn test_walk_moves_every_runner() {
        // Lone runner on second goes to third on a walk under the uniform-advance rule.
        let s = apply_outcome(st(false, true, false, 0), Outcome::Walk);
        assert_eq!(s, st(true, false, true, 0));
    }

    #[test]
    fn test_hits_place_batter() {
        let s = apply_outcome(st(true, false, false, 1), Outcome::Double);
        assert_eq!(s, st(false, true, true, 1));

        let s = apply_outcome(st(true, false, false, 1), Outcome::Triple);
        assert_eq!(s.runs_scored(), 1);
        assert_eq!(s.clear_runs_scored(), st(false, false, true, 1));

        let s = apply_outcome(GameState::INITIAL, Outcome::ErrorOrSingle);
        assert_eq!(s, st(true, false, false, 0));
    }

    #[test]
    fn test_strikeout_and_fielders_choice_agree() {
        let s = st(true, true, false, 1);
        assert_eq!(
            apply_outcome(s, Outcome::Strikeout),
            apply_outcome(s, Outcome::FieldersChoice)
        );
        assert_eq!(apply_outcome(s, Outcome::Strikeout), st(true, true, false, 2));
    }
}
