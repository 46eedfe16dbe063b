//! Weight redistribution over available constituents.
//!
//! Used identically at both levels of the engine: intra-factor (sub-scores
//! into a factor score) and inter-factor (factor scores into the composite).
//! Both levels must route through this module; the two drifting apart is a
//! known consistency defect.

use crate::{MAX_SCORE, MIN_SCORE};

/// Rescale the declared weights of the present constituents so they sum to
/// exactly 1.0. Returns `None` when nothing is present or the declared weights
/// sum to zero (e.g. only a policy-zeroed factor survived).
pub fn redistribute(present: &[f64]) -> Option<Vec<f64>> {
    if present.is_empty() {
        return None;
    }
    let total: f64 = present.iter().sum();
    if total <= 0.0 {
        return None;
    }
    Some(present.iter().map(|w| w / total).collect())
}

/// Weighted combination of `(score, declared_weight)` pairs for the present
/// constituents only. Weights are redistributed to sum to 1.0 first; the
/// result is clamped to [0, 100].
pub fn weighted_score(present: &[(f64, f64)]) -> Option<f64> {
    let declared: Vec<f64> = present.iter().map(|(_, w)| *w).collect();
    let rescaled = redistribute(&declared)?;
    let combined: f64 = present
        .iter()
        .zip(rescaled.iter())
        .map(|((score, _), w)| score * w)
        .sum();
    Some(combined.clamp(MIN_SCORE, MAX_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redistributed_weights_sum_to_one() {
        let rescaled = redistribute(&[0.1368, 0.1711, 0.1026]).unwrap();
        let sum: f64 = rescaled.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn redistribute_empty_is_none() {
        assert!(redistribute(&[]).is_none());
    }

    #[test]
    fn redistribute_zero_total_is_none() {
        assert!(redistribute(&[0.0, 0.0]).is_none());
    }

    #[test]
    fn single_constituent_gets_full_weight() {
        let score = weighted_score(&[(72.5, 0.25)]).unwrap();
        assert_eq!(score, 72.5);
    }

    #[test]
    fn weighted_score_matches_hand_computation() {
        // Present weights 0.4 and 0.1 rescale to 0.8 and 0.2.
        let score = weighted_score(&[(60.0, 0.4), (30.0, 0.1)]).unwrap();
        assert!((score - (60.0 * 0.8 + 30.0 * 0.2)).abs() < 1e-12);
    }

    #[test]
    fn weighted_score_is_clamped() {
        assert_eq!(weighted_score(&[(150.0, 1.0)]).unwrap(), 100.0);
        assert_eq!(weighted_score(&[(-20.0, 1.0)]).unwrap(), 0.0);
    }

    #[test]
    fn zero_weight_constituent_contributes_nothing() {
        let score = weighted_score(&[(10.0, 0.0), (80.0, 0.5)]).unwrap();
        assert_eq!(score, 80.0);
    }
}
