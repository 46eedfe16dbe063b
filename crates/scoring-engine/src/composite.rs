//! Pass 2, step 3: factor scores -> composite.

use scoring_core::{weighted_score, Factor, FactorResult};
use std::collections::BTreeMap;

/// Combine factor scores into the final composite using the declared
/// inter-factor weight table.
///
/// Unavailable factors are dropped and the remaining declared weights
/// rescaled to sum to 1.0 — the same redistribution the aggregator applies
/// within a factor. All factors unavailable means the composite is
/// unavailable, never coerced to zero: zero is a legitimate low score.
pub fn compose(factors: &[FactorResult], weights: &BTreeMap<Factor, f64>) -> Option<f64> {
    let present: Vec<(f64, f64)> = factors
        .iter()
        .filter_map(|result| {
            let score = result.score?;
            let weight = weights.get(&result.factor).copied()?;
            Some((score, weight))
        })
        .collect();
    weighted_score(&present)
}
