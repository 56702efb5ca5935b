//! Model constants and state-indexing functions.
//!
//! A half-inning situation packs into one byte with disjoint fields:
//!
//! | Bits | Field | Range |
//! |------|-------|-------|
//! | 0..=1 | outs | 0..=3 |
//! | 2..=4 | base occupancy (bit 2 = first, bit 3 = second, bit 4 = third) | 3 flags |
//! | 5..=7 | runs scored on the last play | 0..=7 |
//!
//! The runs field sits above third base, so shifting the occupancy pattern left
//! by N bases pushes runners past third straight into the runs field. Being the
//! topmost field, it can never alias a base bit.

/// Mask for the outs field (bits 0-1).
pub const OUTS_MASK: u8 = 0b0000_0011;

/// Bit position of first base.
pub const FIRST_BASE_SHIFT: u32 = 2;

/// Occupancy bit for a runner on first.
pub const FIRST_BASE_MASK: u8 = 1 << FIRST_BASE_SHIFT;

/// Occupancy bit for a runner on second.
pub const SECOND_BASE_MASK: u8 = 1 << 3;

/// Occupancy bit for a runner on third.
pub const THIRD_BASE_MASK: u8 = 1 << 4;

/// All three occupancy bits.
pub const BASES_MASK: u8 = FIRST_BASE_MASK | SECOND_BASE_MASK | THIRD_BASE_MASK;

/// Bit position of the runs-just-scored field.
pub const RUNS_SHIFT: u32 = 5;

/// Mask for the runs-just-scored field (bits 5-7).
pub const RUNS_MASK: u8 = 0b111 << RUNS_SHIFT;

/// Largest value the runs field can hold.
pub const MAX_RUNS_FIELD: u8 = 0b111;

/// Most runs a single plate appearance can produce: bases loaded plus the batter.
pub const MAX_RUNS_PER_PLAY: u8 = 4;

/// Outs that end a half-inning.
pub const OUTS_PER_INNING: u8 = 3;

/// Number of canonical (runs-cleared) state slots: every 5-bit key.
///
/// Only 25 are legal (8 base patterns x outs 0..=2, plus the terminal state),
/// but a flat 32-slot array indexes directly by key without a lookup.
pub const NUM_STATE_SLOTS: usize = 1 << RUNS_SHIFT;

/// Number of plate-appearance outcome categories.
pub const OUTCOME_COUNT: usize = 9;

/// Share of balls-in-play outs that advance every runner one base.
pub const PRODUCTIVE_OUT_SHARE: f64 = 0.33;

/// Share of balls-in-play outs that leave the runners where they are.
pub const UNPRODUCTIVE_OUT_SHARE: f64 = 0.67;

/// Default innings per game.
///
/// Seven, not nine: the model was built for a seven-inning league. Override with
/// `RUNS_INNINGS_PER_GAME` or `EstimatorConfig::innings_per_game`.
pub const DEFAULT_INNINGS_PER_GAME: u32 = 7;

/// Default number of fixed-point refinement passes in the expected-runs solver.
pub const DEFAULT_REFINEMENT_PASSES: usize = 50;

/// Largest change between the last two solver passes that still counts as converged.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-9;

/// Human-readable outcome names, indexed by `Outcome as usize`.
pub const OUTCOME_NAMES: [&str; OUTCOME_COUNT] = [
    "Walk",
    "Strikeout",
    "Fielder's Choice",
    "Error or Single",
    "Double",
    "Triple",
    "Home Run",
    "Productive Out",
    "Unproductive Out",
];

/// Map a state key to its flat array slot.
///
/// Only canonical keys (runs field cleared) are valid slots.
#[inline(always)]
pub fn state_index(key: u8) -> usize {
    debug_assert!(
        key & RUNS_MASK == 0,
        "state key {:#010b} still carries runs",
        key
    );
    key as usize
}
