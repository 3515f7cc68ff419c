//! Error taxonomy.
//!
//! Three independent failure surfaces, matching the three fallible seams of
//! the crate:
//!
//! - [`ConfigError`]: rejected at generator construction, before any
//!   generation occurs.
//! - [`SampleError`]: the unconstrained sampler ran out of retry budget.
//! - [`SinkError`]: the output table could not be created, appended to, or
//!   flushed.  Not recoverable locally; the sink is left non-closed and the
//!   generation run is over.

use std::path::PathBuf;
use thiserror::Error;

/// A [`crate::GeneratorConfig`] that cannot produce well-defined samples.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A Bernoulli parameter is outside `[0, 1]` (or NaN).
    #[error("{name} must be in [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },

    /// A control-subcategory weight is negative (or NaN).
    #[error("control_loss_weights[{index}] must be non-negative, got {value}")]
    NegativeWeight { index: usize, value: f64 },

    /// The control-subcategory weights do not form a distribution.
    #[error("control_loss_weights must sum to 1.0, got {sum}")]
    WeightSum { sum: f64 },

    /// The rejection-sampling retry ceiling is zero.
    #[error("max_rejections must be at least 1")]
    ZeroRejectionBudget,
}

/// Sampling failed to produce a valid stimulus.
#[derive(Debug, Error)]
pub enum SampleError {
    /// The unconstrained sampler rejected every candidate within budget.
    #[error("no valid unconstrained sample found after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// The output table could not be written.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to create output directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open output table {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to write table header")]
    Header(#[source] csv::Error),

    #[error("failed to append row {row} to output table")]
    Append {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("failed to flush output table")]
    Flush(#[from] std::io::Error),
}
