pub mod error;
pub mod traits;
pub mod types;
pub mod weights;

pub use error::ScoringError;
pub use traits::{MetricStore, ScoreSink};
pub use types::{
    Direction, Distribution, Factor, FactorResult, MetricSpec, SecurityScoreRecord,
    SecuritySnapshot, SubScore, ValidityPredicate,
};
pub use weights::{redistribute, weighted_score};

/// Score of a security sitting exactly at the population mean.
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Points of score per standard deviation from the mean.
pub const Z_SCALE: f64 = 15.0;

/// Lower bound of every score the engine emits.
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of every score the engine emits.
pub const MAX_SCORE: f64 = 100.0;

/// Tolerance for weight-sum validation at config load.
pub const WEIGHT_EPSILON: f64 = 1e-6;

/// Distributions built from fewer accepted values than this are flagged
/// low-confidence (still valid, still used).
pub const LOW_CONFIDENCE_COUNT: usize = 30;
