//! Outcome classifier: rate statistics to a probability distribution over
//! [`Outcome`] categories.
//!
//! Each named category gets `count / plate_appearances`. The residual mass is
//! balls-in-play outs, split by the fixed [`PRODUCTIVE_OUT_SHARE`] /
//! [`UNPRODUCTIVE_OUT_SHARE`] heuristic.

use crate::constants::*;
use crate::error::Result;
use crate::types::{Outcome, RateStats};

/// Probability of each outcome for one plate appearance.
#[derive(Clone, Debug, PartialEq)]
pub struct OutcomeDistribution {
    probs: [f64; OUTCOME_COUNT],
    ball_in_play_out: f64,
}

impl OutcomeDistribution {
    /// Validate `stats` and classify them.
    pub fn from_stats(stats: &RateStats) -> Result<Self> {
        stats.validate()?;

        let pa = stats.plate_appearances as f64;
        let rate = |count: u64| count as f64 / pa;

        // Residual from the integer counts so it can never dip below zero.
        let ball_in_play_out = rate(stats.balls_in_play_outs());

        let mut probs = [0.0; OUTCOME_COUNT];
        probs[Outcome::Walk.index()] = rate(stats.walks as u64);
        probs[Outcome::Strikeout.index()] = rate(stats.strikeouts as u64);
        probs[Outcome::FieldersChoice.index()] = rate(stats.fielders_choices as u64);
        probs[Outcome::ErrorOrSingle.index()] =
            rate(stats.reached_on_error as u64 + stats.singles as u64);
        probs[Outcome::Double.index()] = rate(stats.doubles as u64);
        probs[Outcome::Triple.index()] = rate(stats.triples as u64);
        probs[Outcome::HomeRun.index()] = rate(stats.home_runs as u64);
        probs[Outcome::ProductiveOut.index()] = ball_in_play_out * PRODUCTIVE_OUT_SHARE;
        probs[Outcome::UnproductiveOut.index()] = ball_in_play_out * UNPRODUCTIVE_OUT_SHARE;

        Ok(Self {
            probs,
            ball_in_play_out,
        })
    }

    #[inline(always)]
    pub fn probability(&self, outcome: Outcome) -> f64 {
        self.probs[outcome.index()]
    }

    /// Combined probability of a productive or unproductive ball-in-play out.
    pub fn ball_in_play_out(&self) -> f64 {
        self.ball_in_play_out
    }

    /// Probability that a plate appearance records an out.
    pub fn out_probability(&self) -> f64 {
        Outcome::ALL
            .iter()
            .filter(|o| o.rule().records_out)
            .map(|&o| self.probability(o))
            .sum()
    }

    /// Outcomes paired with their probability, in [`Outcome::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Outcome, f64)> + '_ {
        Outcome::ALL.iter().map(move |&o| (o, self.probability(o)))
    }

    /// Pick the outcome whose cumulative probability band contains `u` in `[0, 1)`.
    ///
    /// Floating-point shortfall at the top of the range falls through to the
    /// last outcome with non-zero probability.
    pub fn sample(&self, u: f64) -> Outcome {
        let mut cumulative = 0.0;
        let mut last = Outcome::UnproductiveOut;
        for (outcome, p) in self.iter() {
            if p <= 0.0 {
                continue;
            }
            cumulative += p;
            last = outcome;
            if u < cumulative {
                return outcome;
            }
        }
        last
    }
}
