//! Pass 2, step 1: raw value -> 0-100 sub-score against a completed
//! distribution.

use scoring_core::{
    Direction, Distribution, MetricSpec, SubScore, MAX_SCORE, MIN_SCORE, NEUTRAL_SCORE, Z_SCALE,
};

/// Normalize one security's raw value for one metric.
///
/// Returns `None` when the value is absent or fails the spec's predicate —
/// the same predicate instance that gated the distribution build. A value the
/// builder would have rejected must never be scored, and a value it accepted
/// must never be silently excluded here; that symmetry is the engine's core
/// correctness invariant.
///
/// Scale: `clamp(50 + 15z, 0, 100)` with z computed on the winsorized value
/// and negated for lower-is-better metrics. Zero standard deviation (every
/// accepted value identical) yields the neutral 50, not a division error.
pub fn normalize(raw: Option<f64>, spec: &MetricSpec, dist: &Distribution) -> Option<SubScore> {
    let value = raw?;
    if !spec.predicate.accepts(value) {
        return None;
    }

    let clipped = value.clamp(dist.winsor_min, dist.winsor_max);
    let score = if dist.std_dev <= f64::EPSILON {
        NEUTRAL_SCORE
    } else {
        let mut z = (clipped - dist.mean) / dist.std_dev;
        if spec.direction == Direction::LowerIsBetter {
            z = -z;
        }
        (NEUTRAL_SCORE + Z_SCALE * z).clamp(MIN_SCORE, MAX_SCORE)
    };

    Some(SubScore {
        metric: spec.name.clone(),
        raw_value: value,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::build_distribution;
    use scoring_core::{Factor, SecuritySnapshot, ValidityPredicate};

    fn pe_spec() -> MetricSpec {
        MetricSpec {
            name: "pe_ratio".to_string(),
            factor: Factor::Value,
            direction: Direction::LowerIsBetter,
            predicate: ValidityPredicate::Positive,
            winsor_lower: 0.0,
            winsor_upper: 1.0,
            weight: 1.0,
        }
    }

    fn pe_distribution(values: &[f64]) -> Distribution {
        let universe: Vec<SecuritySnapshot> = values
            .iter()
            .enumerate()
            .map(|(i, v)| SecuritySnapshot::new(format!("S{}", i)).with_metric("pe_ratio", *v))
            .collect();
        build_distribution(&universe, &pe_spec()).unwrap()
    }

    #[test]
    fn absent_value_is_unavailable() {
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        assert!(normalize(None, &pe_spec(), &dist).is_none());
    }

    #[test]
    fn rejected_value_is_unavailable_not_penalized() {
        // The P/E = -5 security from the population scenario: its value never
        // entered the distribution, so it gets no score at all — not zero.
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        assert!(normalize(Some(-5.0), &pe_spec(), &dist).is_none());
        assert!(normalize(Some(f64::NAN), &pe_spec(), &dist).is_none());
    }

    #[test]
    fn cheap_pe_scores_above_neutral_after_inversion() {
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        let sub = normalize(Some(10.0), &pe_spec(), &dist).unwrap();
        // z = (10 - 17.5) / 5.59 ≈ -1.342, inverted for lower-is-better:
        // score ≈ 50 + 15 * 1.342 ≈ 70.1.
        assert!(sub.score > 50.0);
        assert!((sub.score - 70.12).abs() < 0.1);
        assert_eq!(sub.raw_value, 10.0);
    }

    #[test]
    fn expensive_pe_scores_below_neutral() {
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        let sub = normalize(Some(25.0), &pe_spec(), &dist).unwrap();
        assert!(sub.score < 50.0);
    }

    #[test]
    fn mean_value_scores_exactly_neutral() {
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        let sub = normalize(Some(17.5), &pe_spec(), &dist).unwrap();
        assert!((sub.score - 50.0).abs() < 1e-12);
    }

    #[test]
    fn zero_std_dev_yields_neutral_score() {
        let dist = pe_distribution(&[12.0, 12.0, 12.0]);
        let sub = normalize(Some(12.0), &pe_spec(), &dist).unwrap();
        assert_eq!(sub.score, 50.0);
    }

    #[test]
    fn extreme_value_is_clamped_into_range() {
        let mut dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        // Widen the clip window so a far-tail raw value reaches the z-score.
        dist.winsor_max = 1.0e6;
        let sub = normalize(Some(1.0e6), &pe_spec(), &dist).unwrap();
        assert_eq!(sub.score, 0.0); // lower-is-better, enormous P/E
        assert!(sub.score.is_finite());
    }

    #[test]
    fn value_beyond_winsor_bound_is_scored_at_the_bound() {
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        let at_bound = normalize(Some(25.0), &pe_spec(), &dist).unwrap();
        let beyond = normalize(Some(400.0), &pe_spec(), &dist).unwrap();
        assert_eq!(at_bound.score, beyond.score);
        // The raw input is preserved unclipped for audit.
        assert_eq!(beyond.raw_value, 400.0);
    }

    #[test]
    fn higher_is_better_direction_is_not_inverted() {
        let spec = MetricSpec {
            direction: Direction::HigherIsBetter,
            ..pe_spec()
        };
        let dist = pe_distribution(&[10.0, 15.0, 20.0, 25.0]);
        let sub = normalize(Some(25.0), &spec, &dist).unwrap();
        assert!(sub.score > 50.0);
    }
}
