//! Generator configuration.
//!
//! All sampling-mode weights live here.  Validation happens once, at
//! [`crate::StimulusGenerator`] construction: an out-of-range probability or
//! a malformed weight vector is a [`ConfigError`], never a silent skew in
//! the sampled category mix.

use crate::ConfigError;

/// Tolerance for the weight-sum check.
const WEIGHT_SUM_EPS: f64 = 1e-9;

/// Weights steering sampling-mode category choice.
///
/// Category choice is a cascade of independent Bernoulli draws (control →
/// with-losses → incongruent); see [`crate::StimulusGenerator::sample`].
/// `control_loss_weights` distributes the with-losses control branch over
/// its three rules, in order: control negative, fixed-outcome negative,
/// mixed sign.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Probability of a control trial (one option dominates).
    pub prob_control: f64,
    /// Probability that a trial includes losses.
    pub prob_with_losses: f64,
    /// Probability that a non-control trial is incongruent.
    pub prob_incongruent: f64,
    /// Distribution over the three with-losses control rules.
    /// Must be non-negative and sum to 1.0.
    pub control_loss_weights: [f64; 3],
    /// Retry ceiling for the unconstrained rejection sampler.
    pub max_rejections: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            prob_control: 0.5,
            prob_with_losses: 0.5,
            prob_incongruent: 0.5,
            control_loss_weights: [0.6, 0.3, 0.1],
            max_rejections: 10_000,
        }
    }
}

impl GeneratorConfig {
    /// Check every invariant the sampler relies on.
    ///
    /// Called by [`crate::StimulusGenerator::with_seed`]; exposed so callers
    /// assembling configs from external input can fail early themselves.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("prob_control", self.prob_control),
            ("prob_with_losses", self.prob_with_losses),
            ("prob_incongruent", self.prob_incongruent),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        for (index, &value) in self.control_loss_weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeWeight { index, value });
            }
        }
        let sum: f64 = self.control_loss_weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_EPS {
            return Err(ConfigError::WeightSum { sum });
        }

        if self.max_rejections == 0 {
            return Err(ConfigError::ZeroRejectionBudget);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_probability_outside_unit_interval() {
        let cfg = GeneratorConfig {
            prob_control: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ProbabilityOutOfRange {
                name: "prob_control",
                ..
            })
        ));
    }

    #[test]
    fn rejects_nan_probability() {
        let cfg = GeneratorConfig {
            prob_incongruent: f64::NAN,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let cfg = GeneratorConfig {
            control_loss_weights: [0.6, 0.3, 0.3],
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::WeightSum { .. })));
    }

    #[test]
    fn rejects_negative_weight() {
        let cfg = GeneratorConfig {
            control_loss_weights: [1.2, -0.1, -0.1],
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NegativeWeight { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_zero_rejection_budget() {
        let cfg = GeneratorConfig {
            max_rejections: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::ZeroRejectionBudget)
        ));
    }

    #[test]
    fn degenerate_point_weights_are_valid() {
        let cfg = GeneratorConfig {
            control_loss_weights: [0.0, 0.0, 1.0],
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
