//! Stimulus generation: category choice, side assignment, exhaustive output.
//!
//! The generator owns the only RNG in the crate.  It is **seedable** so that
//! sampled trial sequences are reproducible; default construction uses a
//! fixed seed (deterministic by default).

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::{
    Category, ConfigError, GeneratorConfig, LotteryPair, SampleError, SinkError, StimulusRecord,
    StimulusSink,
};

/// With-losses control rules, in [`GeneratorConfig::control_loss_weights`]
/// order.
const WITH_LOSS_CONTROL: [Category; 3] = [
    Category::ControlNegative,
    Category::FixedOutcomeNegative,
    Category::ControlMixed,
];

/// Without-losses control rules, chosen uniformly.
const WITHOUT_LOSS_CONTROL: [Category; 2] =
    [Category::ControlPositive, Category::FixedOutcomePositive];

/// Seedable stimulus generator.
///
/// Construction validates the configuration; a malformed config is a
/// [`ConfigError`] before any generation occurs.
#[derive(Debug, Clone)]
pub struct StimulusGenerator {
    cfg: GeneratorConfig,
    rng: StdRng,
}

impl StimulusGenerator {
    /// Create a generator with a deterministic fixed seed (0).
    pub fn new(cfg: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_seed(cfg, 0)
    }

    /// Create a generator with an explicit seed (reproducible).
    pub fn with_seed(cfg: GeneratorConfig, seed: u64) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.cfg
    }

    /// Draw one stimulus under the configured category weights.
    ///
    /// Category choice is a cascade of independent Bernoulli draws:
    /// control → with-losses → (non-control only) incongruent; the
    /// with-losses control branch distributes over its three rules via
    /// `control_loss_weights`.
    pub fn sample(&mut self) -> Result<StimulusRecord, SampleError> {
        let category = self.pick_category();
        debug!(category = category.comment(), "sampling stimulus");
        let pair = category.sample_pair(&mut self.rng, self.cfg.max_rejections)?;
        Ok(self.assign_sides(category, pair))
    }

    /// Draw one stimulus from the unconstrained superset rule.
    ///
    /// Fails with [`SampleError::Exhausted`] if the rejection sampler runs
    /// out of retry budget.
    pub fn sample_unconstrained(&mut self) -> Result<StimulusRecord, SampleError> {
        debug!(category = Category::Random.comment(), "sampling stimulus");
        let pair = Category::Random.sample_pair(&mut self.rng, self.cfg.max_rejections)?;
        Ok(self.assign_sides(Category::Random, pair))
    }

    fn pick_category(&mut self) -> Category {
        let control = self.rng.random::<f64>() < self.cfg.prob_control;
        let with_losses = self.rng.random::<f64>() < self.cfg.prob_with_losses;

        if control {
            if with_losses {
                return self.weighted_with_loss_control();
            }
            return WITHOUT_LOSS_CONTROL[self.rng.random_range(0..WITHOUT_LOSS_CONTROL.len())];
        }

        let incongruent = self.rng.random::<f64>() < self.cfg.prob_incongruent;
        match (incongruent, with_losses) {
            (true, true) => Category::IncongruentNegative,
            (true, false) => Category::IncongruentPositive,
            (false, true) => Category::CongruentNegative,
            (false, false) => Category::CongruentPositive,
        }
    }

    /// Weighted choice among the three with-losses control rules (CDF scan).
    fn weighted_with_loss_control(&mut self) -> Category {
        let r: f64 = self.rng.random();
        let mut cdf = 0.0;
        for (category, w) in WITH_LOSS_CONTROL
            .iter()
            .zip(self.cfg.control_loss_weights)
        {
            cdf += w;
            if r < cdf {
                return *category;
            }
        }
        // Numerical fallback: weights sum to 1 within tolerance.
        WITH_LOSS_CONTROL[WITH_LOSS_CONTROL.len() - 1]
    }

    /// Map an ordered pair onto sides via a uniform permutation of `{0, 1}`,
    /// then draw each side's initial gauge angle uniformly from `[0, 360)`.
    fn assign_sides(&mut self, category: Category, pair: LotteryPair) -> StimulusRecord {
        let mut order = [0usize, 1usize];
        order.shuffle(&mut self.rng);
        StimulusRecord {
            left: pair.gamble(order[0]),
            right: pair.gamble(order[1]),
            left_angle: self.rng.random_range(0..360),
            right_angle: self.rng.random_range(0..360),
            category,
        }
    }

    /// Exhaustive mode: append every catalogued combination to `sink`, in
    /// category order 1→9, then close the sink exactly once.
    ///
    /// Returns the number of rows appended.  Sink errors propagate and abort
    /// the run, leaving the sink non-closed (caller cleans up).
    pub fn write_all<S: StimulusSink>(&self, sink: &mut S) -> Result<usize, SinkError> {
        let mut rows = 0usize;
        for category in Category::ENUMERATED {
            let combos = category.enumerate();
            info!(
                category = category.comment(),
                combinations = combos.len(),
                "enumerating category"
            );
            for pair in combos {
                sink.append(&pair.exhaustive_row(category))?;
                rows += 1;
            }
        }
        sink.close()?;
        info!(rows, "stimulus table complete");
        Ok(rows)
    }
}

impl LotteryPair {
    /// Shape this pair as a persisted-table row for `category`.
    ///
    /// Enumeration order is the table order: index 0 is left, index 1 is
    /// right.  Side randomization applies only to sampling mode.
    pub fn exhaustive_row(&self, category: Category) -> crate::ExhaustiveRow {
        crate::ExhaustiveRow {
            left_p: self.p[0],
            left_x0: self.x0[0],
            right_p: self.p[1],
            right_x0: self.x0[1],
            lottery_type: category.id(),
            comment: category.comment(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySink;

    fn forced(cfg: GeneratorConfig) -> StimulusGenerator {
        StimulusGenerator::with_seed(cfg, 99).unwrap()
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let cfg = GeneratorConfig {
            prob_control: -0.1,
            ..Default::default()
        };
        assert!(StimulusGenerator::new(cfg).is_err());
    }

    #[test]
    fn same_seed_yields_same_sample_stream() {
        let cfg = GeneratorConfig::default();
        let mut a = StimulusGenerator::with_seed(cfg, 42).unwrap();
        let mut b = StimulusGenerator::with_seed(cfg, 42).unwrap();
        for _ in 0..100 {
            assert_eq!(a.sample().unwrap(), b.sample().unwrap());
        }
    }

    #[test]
    fn pure_control_without_losses_uses_only_the_two_positive_control_rules() {
        let mut g = forced(GeneratorConfig {
            prob_control: 1.0,
            prob_with_losses: 0.0,
            ..Default::default()
        });
        for _ in 0..200 {
            let s = g.sample().unwrap();
            assert!(WITHOUT_LOSS_CONTROL.contains(&s.category), "{:?}", s.category);
        }
    }

    #[test]
    fn point_mass_weights_pin_the_with_loss_control_rule() {
        let mut g = forced(GeneratorConfig {
            prob_control: 1.0,
            prob_with_losses: 1.0,
            control_loss_weights: [0.0, 1.0, 0.0],
            ..Default::default()
        });
        for _ in 0..200 {
            assert_eq!(g.sample().unwrap().category, Category::FixedOutcomeNegative);
        }
    }

    #[test]
    fn non_control_branch_combines_congruency_and_losses() {
        let mut g = forced(GeneratorConfig {
            prob_control: 0.0,
            prob_with_losses: 1.0,
            prob_incongruent: 1.0,
            ..Default::default()
        });
        for _ in 0..200 {
            assert_eq!(g.sample().unwrap().category, Category::IncongruentNegative);
        }
    }

    #[test]
    fn angles_are_within_the_gauge_range() {
        let mut g = forced(GeneratorConfig::default());
        for _ in 0..500 {
            let s = g.sample().unwrap();
            assert!(s.left_angle < 360);
            assert!(s.right_angle < 360);
        }
    }

    #[test]
    fn write_all_emits_the_full_catalog_and_closes_once() {
        let g = StimulusGenerator::new(GeneratorConfig::default()).unwrap();
        let mut sink = MemorySink::default();
        let rows = g.write_all(&mut sink).unwrap();
        assert_eq!(rows, 168);
        assert_eq!(sink.rows.len(), 168);
        assert_eq!(sink.closed, 1);
    }
}
