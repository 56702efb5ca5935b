//! Core data structures: the packed base/out state, the outcome rule table, and
//! the per-lineup rate statistics.
//!
//! The central type is [`GameState`], an immutable one-byte value whose field
//! layout is documented in [`crate::constants`]. States are compared and hashed
//! by value; a state used as a graph node always has its runs field cleared.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{EstimateError, Result};

/// A base, used for batter placement and occupancy queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    /// Occupancy bit for this base.
    #[inline(always)]
    pub const fn mask(self) -> u8 {
        match self {
            Base::First => FIRST_BASE_MASK,
            Base::Second => SECOND_BASE_MASK,
            Base::Third => THIRD_BASE_MASK,
        }
    }
}

/// Half-inning situation: runners on base, outs, and runs credited on the last play.
///
/// The runs field is transient. It is filled by the transition functions in
/// [`crate::game_mechanics`], read out as the edge payload, and cleared with
/// [`GameState::clear_runs_scored`] before the state is used as a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameState(u8);

impl GameState {
    /// Bases empty, nobody out.
    pub const INITIAL: GameState = GameState(0);

    /// Three outs. Carries no runner or run information.
    pub const TERMINAL: GameState = GameState(OUTS_PER_INNING);

    /// Encode a fresh state (no runs just scored).
    ///
    /// Any state with three or more outs collapses to [`GameState::TERMINAL`].
    pub fn new(on_first: bool, on_second: bool, on_third: bool, outs: u8) -> Self {
        if outs >= OUTS_PER_INNING {
            return Self::TERMINAL;
        }
        let mut key = outs;
        if on_first {
            key |= FIRST_BASE_MASK;
        }
        if on_second {
            key |= SECOND_BASE_MASK;
        }
        if on_third {
            key |= THIRD_BASE_MASK;
        }
        Self(key)
    }

    /// Decode a raw key, rejecting field combinations no transition can produce.
    pub fn from_key(key: u8) -> Result<Self> {
        let state = Self(key);
        if state.is_terminal() && key & (BASES_MASK | RUNS_MASK) != 0 {
            return Err(EstimateError::IllFormedState {
                key,
                reason: "runner or run information after the third out",
            });
        }
        if state.runs_scored() > MAX_RUNS_PER_PLAY {
            return Err(EstimateError::IllFormedState {
                key,
                reason: "more runs than a single play can score",
            });
        }
        Ok(state)
    }

    /// Wrap a key produced by the transition engine without validation.
    #[inline(always)]
    pub(crate) const fn from_raw(key: u8) -> Self {
        Self(key)
    }

    /// Raw packed key.
    #[inline(always)]
    pub const fn key(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub const fn outs(self) -> u8 {
        self.0 & OUTS_MASK
    }

    #[inline(always)]
    pub const fn runs_scored(self) -> u8 {
        self.0 >> RUNS_SHIFT
    }

    #[inline(always)]
    pub const fn is_terminal(self) -> bool {
        self.outs() >= OUTS_PER_INNING
    }

    #[inline(always)]
    pub const fn is_occupied(self, base: Base) -> bool {
        self.0 & base.mask() != 0
    }

    pub const fn on_first(self) -> bool {
        self.is_occupied(Base::First)
    }

    pub const fn on_second(self) -> bool {
        self.is_occupied(Base::Second)
    }

    pub const fn on_third(self) -> bool {
        self.is_occupied(Base::Third)
    }

    /// Occupancy as a 3-bit pattern: bit 0 = first, bit 1 = second, bit 2 = third.
    #[inline(always)]
    pub const fn bases(self) -> u8 {
        (self.0 & BASES_MASK) >> FIRST_BASE_SHIFT
    }

    /// Number of runners on base.
    pub const fn runners_on(self) -> u32 {
        self.bases().count_ones()
    }

    /// Drop the runs field, giving the canonical graph-node key.
    #[inline(always)]
    pub const fn clear_runs_scored(self) -> Self {
        Self(self.0 & !RUNS_MASK)
    }

    /// Add `runs` to the runs field.
    #[inline(always)]
    pub fn add_runs_scored(self, runs: u8) -> Self {
        let total = self.runs_scored() + runs;
        debug_assert!(
            total <= MAX_RUNS_PER_PLAY,
            "{} runs on one play from {}",
            total,
            self
        );
        Self((self.0 & !RUNS_MASK) | ((total & MAX_RUNS_FIELD) << RUNS_SHIFT))
    }

    /// Put a runner on `base`.
    #[inline(always)]
    pub const fn with_runner(self, base: Base) -> Self {
        Self(self.0 | base.mask())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "1b: {}, 2b: {}, 3b: {}, {} outs (and {} just scored)",
            self.on_first(),
            self.on_second(),
            self.on_third(),
            self.outs(),
            self.runs_scored()
        )
    }
}

/// Plate-appearance outcome category.
///
/// Errors and singles share a category: both put the batter on first and move
/// every runner up one base. Balls-in-play outs split into productive (runners
/// advance one base) and unproductive (no advancement).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Outcome {
    Walk,
    Strikeout,
    FieldersChoice,
    ErrorOrSingle,
    Double,
    Triple,
    HomeRun,
    ProductiveOut,
    UnproductiveOut,
}

/// How an outcome changes the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutcomeRule {
    /// Whether the play records an out.
    pub records_out: bool,
    /// Bases every existing runner moves up.
    pub runner_advance: u8,
    /// Whether the batter crosses the plate on the play.
    pub batter_scores: bool,
    /// Where the batter ends up, if on base.
    pub batter_base: Option<Base>,
}

impl Outcome {
    pub const ALL: [Outcome; OUTCOME_COUNT] = [
        Outcome::Walk,
        Outcome::Strikeout,
        Outcome::FieldersChoice,
        Outcome::ErrorOrSingle,
        Outcome::Double,
        Outcome::Triple,
        Outcome::HomeRun,
        Outcome::ProductiveOut,
        Outcome::UnproductiveOut,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        OUTCOME_NAMES[self as usize]
    }

    /// The fixed advancement rule for this outcome.
    ///
    /// Every runner moves the same number of bases regardless of whether they are
    /// forced. Walks therefore push a lone runner on second to third, fielder's
    /// choices retire the batter rather than a lead runner, and singles never
    /// score a runner from second.
    pub const fn rule(self) -> OutcomeRule {
        let (records_out, runner_advance, batter_scores, batter_base) = match self {
            Outcome::Walk => (false, 1, false, Some(Base::First)),
            Outcome::Strikeout => (true, 0, false, None),
            Outcome::FieldersChoice => (true, 0, false, None),
            Outcome::ErrorOrSingle => (false, 1, false, Some(Base::First)),
            Outcome::Double => (false, 2, false, Some(Base::Second)),
            Outcome::Triple => (false, 3, false, Some(Base::Third)),
            Outcome::HomeRun => (false, 3, true, None),
            Outcome::ProductiveOut => (true, 1, false, None),
            Outcome::UnproductiveOut => (true, 0, false, None),
        };
        OutcomeRule {
            records_out,
            runner_advance,
            batter_scores,
            batter_base,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-lineup plate-appearance counts.
///
/// Plate appearances not covered by a named category are balls-in-play outs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateStats {
    pub plate_appearances: u32,
    #[serde(default)]
    pub walks: u32,
    #[serde(default)]
    pub strikeouts: u32,
    #[serde(default)]
    pub fielders_choices: u32,
    #[serde(default)]
    pub reached_on_error: u32,
    #[serde(default)]
    pub singles: u32,
    #[serde(default)]
    pub doubles: u32,
    #[serde(default)]
    pub triples: u32,
    #[serde(default)]
    pub home_runs: u32,
}

impl RateStats {
    /// Build from signed counts, as they arrive from loosely typed callers.
    #[allow(clippy::too_many_arguments)]
    pub fn from_signed(
        plate_appearances: i64,
        walks: i64,
        strikeouts: i64,
        fielders_choices: i64,
        reached_on_error: i64,
        singles: i64,
        doubles: i64,
        triples: i64,
        home_runs: i64,
    ) -> Result<Self> {
        let count = |name: &str, value: i64| -> Result<u32> {
            u32::try_from(value).map_err(|_| {
                EstimateError::InvalidInput(format!(
                    "{name} must be a non-negative count, got {value}"
                ))
            })
        };
        let stats = Self {
            plate_appearances: count("plate appearances", plate_appearances)?,
            walks: count("walks", walks)?,
            strikeouts: count("strikeouts", strikeouts)?,
            fielders_choices: count("fielder's choices", fielders_choices)?,
            reached_on_error: count("reached on error", reached_on_error)?,
            singles: count("singles", singles)?,
            doubles: count("doubles", doubles)?,
            triples: count("triples", triples)?,
            home_runs: count("home runs", home_runs)?,
        };
        stats.validate()?;
        Ok(stats)
    }

    /// Sum of every named category.
    pub fn named_total(&self) -> u64 {
        [
            self.walks,
            self.strikeouts,
            self.fielders_choices,
            self.reached_on_error,
            self.singles,
            self.doubles,
            self.triples,
            self.home_runs,
        ]
        .iter()
        .map(|&c| c as u64)
        .sum()
    }

    /// Plate appearances left over for balls-in-play outs.
    ///
    /// Only meaningful after [`RateStats::validate`] has passed.
    pub fn balls_in_play_outs(&self) -> u64 {
        (self.plate_appearances as u64).saturating_sub(self.named_total())
    }

    /// Reject counts that cannot form a distribution with a reachable third out.
    pub fn validate(&self) -> Result<()> {
        if self.plate_appearances == 0 {
            return Err(EstimateError::InvalidInput(
                "plate appearances must be positive".to_string(),
            ));
        }
        let named = self.named_total();
        if named > self.plate_appearances as u64 {
            return Err(EstimateError::InvalidInput(format!(
                "named outcomes sum to {named}, more than {} plate appearances",
                self.plate_appearances
            )));
        }
        let outs = self.strikeouts as u64 + self.fielders_choices as u64 + self.balls_in_play_outs();
        if outs == 0 {
            return Err(EstimateError::InvalidInput(
                "no plate appearance records an out, so the half-inning never ends".to_string(),
            ));
        }
        Ok(())
    }
}
