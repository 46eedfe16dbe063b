//! Pass 2, step 2: sub-scores -> factor score.

use scoring_core::{weighted_score, SubScore};

/// Combine a factor's constituent sub-scores into one factor score.
///
/// `constituents` pairs each metric's declared intra-factor weight with its
/// (possibly unavailable) sub-score. The gate is any-available: a factor is
/// unavailable only when *every* constituent is — requiring all constituents
/// silently drops scores for securities missing one metric out of several.
/// Declared weights of the present subset are redistributed to sum to 1.0,
/// mirroring the composite level exactly.
pub fn aggregate(constituents: &[(f64, Option<SubScore>)]) -> Option<f64> {
    let present: Vec<(f64, f64)> = constituents
        .iter()
        .filter_map(|(weight, sub)| sub.as_ref().map(|s| (s.score, *weight)))
        .collect();
    weighted_score(&present)
}
