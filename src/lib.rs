//! `stimgen`: paired-lottery stimulus generation for a gauge-style gambling
//! experiment.
//!
//! Each stimulus is a choice between a "left" and a "right" gamble; a gamble
//! is a probability paired with one or two payoff magnitudes.  The crate
//! produces stimuli in two modes:
//!
//! - **Exhaustive mode** ([`StimulusGenerator::write_all`]): enumerate every
//!   structurally distinct lottery pair across the nine catalogued
//!   categories, in a fixed deterministic order, and append one row per
//!   combination to a [`StimulusSink`] (one table, one header, 168 rows for
//!   the standard domains).
//! - **Sampling mode** ([`StimulusGenerator::sample`]): pick a category under
//!   the configured [`GeneratorConfig`] weights, draw one instance of its
//!   rule, then randomize left/right placement and the initial display angle
//!   of each side.
//!
//! The category taxonomy ([`Category`]):
//!
//! | id | label | probabilities | outcomes |
//! |----|-------|---------------|----------|
//! | 1 | control, mixed sign | equal, from `P_SET` | one negative × one positive |
//! | 2 | control, positive | equal | 2-combination of `X_POS` |
//! | 3 | control, negative | equal | 2-combination of `X_NEG` |
//! | 4 | control, fixed outcome, positive | 2-combination of `P_SET` | one positive on both sides |
//! | 5 | control, fixed outcome, negative | 2-combination of `P_SET` | one negative on both sides |
//! | 6 | incongruent, positive | 2-combination, ascending | 2-combination of `X_POS`, descending |
//! | 7 | incongruent, negative | 2-combination, ascending | 2-combination of `X_NEG`, ascending |
//! | 8 | congruent, positive | 2-combination, ascending | 2-combination of `X_POS`, ascending |
//! | 9 | congruent, negative | 2-combination, ascending | 2-combination of `X_NEG`, descending |
//!
//! A tenth, unconstrained rule ([`Category::Random`]) draws from the full
//! signed outcome domain and rejection-samples away degenerate pairs
//! (identical sides at equal probability, mirrored sides at complementary
//! probability), with a retry ceiling instead of an unbounded loop.
//!
//! **Goals:**
//! - **Deterministic by default**: enumeration order is fixed, and the
//!   sampling RNG is injected — [`StimulusGenerator::with_seed`] gives a
//!   reproducible stream, [`StimulusGenerator::new`] uses seed 0.
//! - **Validated configuration**: out-of-range probabilities or weights that
//!   do not sum to 1 fail at construction with a [`ConfigError`], never as a
//!   silent behavioral skew.
//! - **Thin at the edges**: persistence is a [`StimulusSink`] collaborator
//!   (the bundled [`CsvSink`] writes a named-column table); the experiment
//!   renderer that consumes [`StimulusRecord`]s is out of scope.
//!
//! **Non-goals:** no UI, no statistical analysis of the generated stimuli,
//! no real-time experiment delivery, no persistence-format guarantee beyond
//! "a table with named columns".

mod error;
pub use error::*;

mod config;
pub use config::*;

mod category;
pub use category::*;

mod generator;
pub use generator::*;

mod sink;
pub use sink::*;

/// Probability domain shared by every category rule.
pub const P_SET: [f64; 4] = [0.25, 0.5, 0.75, 1.0];

/// Positive outcome domain.
pub const X_POS: [i32; 3] = [1, 2, 3];

/// Negative outcome domain.
pub const X_NEG: [i32; 3] = [-3, -2, -1];

/// One side of a stimulus: a probability and up to two payoff magnitudes.
///
/// `x1` is zero for every catalogued category; only the unconstrained
/// sampler produces two-outcome gambles.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gamble {
    /// Probability of winning `x0` (otherwise `x1`), in `P_SET`.
    pub p: f64,
    /// Primary outcome magnitude.
    pub x0: i32,
    /// Secondary outcome magnitude (0 unless mixed two-outcome).
    pub x1: i32,
}

/// Raw ordered output of a category rule, before side assignment.
///
/// Index 0 and 1 are "first computed" and "second computed", not left and
/// right; [`StimulusGenerator`] permutes them onto sides so that rule
/// ordering never correlates with screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotteryPair {
    pub p: [f64; 2],
    pub x0: [i32; 2],
    pub x1: [i32; 2],
}

impl LotteryPair {
    /// A pair with only primary outcomes (`x1 = 0` on both sides).
    pub const fn main_only(p: [f64; 2], x0: [i32; 2]) -> Self {
        Self { p, x0, x1: [0, 0] }
    }

    /// The gamble at `index` (0 or 1).
    pub fn gamble(&self, index: usize) -> Gamble {
        Gamble {
            p: self.p[index],
            x0: self.x0[index],
            x1: self.x1[index],
        }
    }
}

/// One fully formed stimulus, as handed to the experiment-delivery layer.
///
/// Ephemeral: created per sampling call, consumed, dropped.  Angles are the
/// initial rotational offsets of the display gauges, uniform in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StimulusRecord {
    pub left: Gamble,
    pub right: Gamble,
    pub left_angle: u16,
    pub right_angle: u16,
    /// The category whose rule produced this stimulus.
    pub category: Category,
}

/// One row of the persisted exhaustive table.
///
/// Carries only the primary outcomes (every catalogued category has
/// `x1 = 0`) plus the category id and a human-readable comment for auditing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExhaustiveRow {
    pub left_p: f64,
    pub left_x0: i32,
    pub right_p: f64,
    pub right_x0: i32,
    pub lottery_type: u8,
    pub comment: &'static str,
}
