//! Pass 1: population distributions per metric.

use rayon::prelude::*;
use scoring_core::{Distribution, MetricSpec, SecuritySnapshot, LOW_CONFIDENCE_COUNT};
use statrs::statistics::Statistics;
use std::collections::HashMap;

/// Completed output of pass 1, passed by shared reference into pass 2.
pub type DistributionMap = HashMap<String, Distribution>;

/// Build distributions for every metric over the full universe.
///
/// Parallel across metrics; each metric's scan is a single sequential pass,
/// since winsorized statistics are a function of the whole accepted set and
/// cannot be streamed incrementally. Metrics with zero accepted values
/// (universe-wide outage) get no entry and are logged once at warn level.
pub fn build_distributions(
    universe: &[SecuritySnapshot],
    specs: &[MetricSpec],
) -> DistributionMap {
    specs
        .par_iter()
        .filter_map(|spec| build_distribution(universe, spec).map(|d| (spec.name.clone(), d)))
        .collect()
}

/// Build one metric's distribution, or `None` when no security in the
/// universe has an accepted value for it.
pub fn build_distribution(
    universe: &[SecuritySnapshot],
    spec: &MetricSpec,
) -> Option<Distribution> {
    // The predicate here is the same instance the normalizer applies later;
    // the accepted set and the eligibility set must be identical.
    let mut accepted: Vec<f64> = universe
        .iter()
        .filter_map(|security| security.value(&spec.name))
        .filter(|v| spec.predicate.accepts(*v))
        .collect();

    if accepted.is_empty() {
        tracing::warn!(
            metric = %spec.name,
            universe = universe.len(),
            "no accepted values for metric, scoring it as unavailable universe-wide"
        );
        return None;
    }

    accepted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let winsor_min = percentile_of_sorted(&accepted, spec.winsor_lower);
    let winsor_max = percentile_of_sorted(&accepted, spec.winsor_upper);

    // Values beyond the percentile bounds are clipped, not dropped; a single
    // pathological outlier must not dominate the standard deviation.
    let clipped: Vec<f64> = accepted
        .iter()
        .map(|v| v.clamp(winsor_min, winsor_max))
        .collect();

    let mean = clipped.as_slice().mean();
    let std_dev = clipped.as_slice().population_std_dev();

    let count = accepted.len();
    let low_confidence = count < LOW_CONFIDENCE_COUNT;
    if low_confidence {
        tracing::debug!(
            metric = %spec.name,
            accepted = count,
            "low-confidence distribution"
        );
    }

    Some(Distribution {
        metric: spec.name.clone(),
        accepted,
        count,
        mean,
        std_dev,
        winsor_min,
        winsor_max,
        low_confidence,
    })
}

/// Linear-interpolation percentile of a sorted slice, `pct` in [0, 1].
fn percentile_of_sorted(sorted: &[f64], pct: f64) -> f64 {
    let n = sorted.len();
    if n == 1 || pct <= 0.0 {
        return sorted[0];
    }
    if pct >= 1.0 {
        return sorted[n - 1];
    }
    let rank = pct * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::{Direction, Factor, ValidityPredicate};

    fn pe_spec(winsor_lower: f64, winsor_upper: f64) -> MetricSpec {
        MetricSpec {
            name: "pe_ratio".to_string(),
            factor: Factor::Value,
            direction: Direction::LowerIsBetter,
            predicate: ValidityPredicate::Positive,
            winsor_lower,
            winsor_upper,
            weight: 1.0,
        }
    }

    fn universe_from(values: &[(&str, f64)]) -> Vec<SecuritySnapshot> {
        values
            .iter()
            .map(|(sym, v)| SecuritySnapshot::new(*sym).with_metric("pe_ratio", *v))
            .collect()
    }

    #[test]
    fn predicate_excludes_values_from_population() {
        // Universe P/E = {10, 15, 20, 25, -5}; predicate "positive" must keep
        // -5 out of the statistics entirely. Winsor bounds are wide open so
        // the four-point sample is not clipped.
        let universe = universe_from(&[
            ("A", 10.0),
            ("B", 15.0),
            ("C", 20.0),
            ("D", 25.0),
            ("E", -5.0),
        ]);
        let dist = build_distribution(&universe, &pe_spec(0.0, 1.0)).unwrap();

        assert_eq!(dist.count, 4);
        assert_eq!(dist.accepted, vec![10.0, 15.0, 20.0, 25.0]);
        assert!((dist.mean - 17.5).abs() < 1e-12);
        assert!((dist.std_dev - 5.5901699437).abs() < 1e-6);
    }

    #[test]
    fn missing_values_are_skipped_not_zeroed() {
        let mut universe = universe_from(&[("A", 10.0), ("B", 30.0)]);
        universe.push(SecuritySnapshot::new("C")); // no pe_ratio at all
        let dist = build_distribution(&universe, &pe_spec(0.0, 1.0)).unwrap();
        assert_eq!(dist.count, 2);
        assert!((dist.mean - 20.0).abs() < 1e-12);
    }

    #[test]
    fn universe_wide_outage_yields_no_distribution() {
        let universe = universe_from(&[("A", -1.0), ("B", -2.0)]);
        assert!(build_distribution(&universe, &pe_spec(0.01, 0.99)).is_none());

        let empty: Vec<SecuritySnapshot> = vec![];
        assert!(build_distribution(&empty, &pe_spec(0.01, 0.99)).is_none());
    }

    #[test]
    fn small_sample_is_low_confidence() {
        let universe = universe_from(&[("A", 10.0), ("B", 15.0)]);
        let dist = build_distribution(&universe, &pe_spec(0.0, 1.0)).unwrap();
        assert!(dist.low_confidence);
    }

    #[test]
    fn winsorization_clips_but_never_excludes() {
        // 101 accepted values 0..=100: the 1st/99th percentile bounds land
        // exactly on 1.0 and 99.0 under linear interpolation.
        let values: Vec<(String, f64)> = (0..=100)
            .map(|i| (format!("S{}", i), i as f64))
            .collect();
        let universe: Vec<SecuritySnapshot> = values
            .iter()
            .map(|(sym, v)| SecuritySnapshot::new(sym.clone()).with_metric("pe_ratio", *v))
            .collect();
        let spec = MetricSpec {
            predicate: ValidityPredicate::NonNegative,
            ..pe_spec(0.01, 0.99)
        };
        let dist = build_distribution(&universe, &spec).unwrap();

        assert_eq!(dist.count, 101);
        assert!((dist.winsor_min - 1.0).abs() < 1e-12);
        assert!((dist.winsor_max - 99.0).abs() < 1e-12);
        // The tail values are clipped into the statistics, not removed: the
        // mean stays 50 by symmetry and the accepted set keeps all 101.
        assert_eq!(dist.accepted.len(), 101);
        assert!((dist.mean - 50.0).abs() < 1e-12);
    }

    #[test]
    fn outlier_does_not_dominate_std_dev() {
        let mut universe: Vec<SecuritySnapshot> = (0..200)
            .map(|i| {
                SecuritySnapshot::new(format!("S{}", i))
                    .with_metric("pe_ratio", 15.0 + (i % 10) as f64)
            })
            .collect();
        universe.push(SecuritySnapshot::new("BLOWUP").with_metric("pe_ratio", 1.0e9));

        let dist = build_distribution(&universe, &pe_spec(0.01, 0.99)).unwrap();
        // Clipped to the 99th percentile bound, the outlier moves std_dev by
        // at most the width of the bulk of the sample.
        assert!(dist.std_dev < 10.0);
        assert!(dist.winsor_max < 1.0e9);
    }

    #[test]
    fn percentile_interpolates_between_ranks() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_eq!(percentile_of_sorted(&sorted, 0.0), 10.0);
        assert_eq!(percentile_of_sorted(&sorted, 1.0), 40.0);
        assert!((percentile_of_sorted(&sorted, 0.5) - 25.0).abs() < 1e-12);
        assert!((percentile_of_sorted(&sorted, 0.25) - 17.5).abs() < 1e-12);
    }

    #[test]
    fn build_distributions_is_keyed_by_metric_name() {
        let universe = universe_from(&[("A", 10.0), ("B", 20.0)]);
        let specs = vec![pe_spec(0.0, 1.0)];
        let map = build_distributions(&universe, &specs);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("pe_ratio"));
    }
}
