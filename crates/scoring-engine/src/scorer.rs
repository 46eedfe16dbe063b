//! Pass 2: full per-security scoring.

use crate::{aggregate, compose, normalize, DistributionMap};
use chrono::{DateTime, Utc};
use scoring_config::ScoringConfig;
use scoring_core::{FactorResult, SecurityScoreRecord, SecuritySnapshot};

/// Score one security against the completed distribution map.
///
/// Pure: the output depends only on the snapshot, the config, and the
/// distributions. Safe to run in parallel across securities with no
/// cross-security dependency. A metric with no distribution (universe-wide
/// outage) is unavailable for every security that reaches here; a metric
/// missing from this one snapshot only narrows this security's factors.
pub fn score_security(
    snapshot: &SecuritySnapshot,
    config: &ScoringConfig,
    distributions: &DistributionMap,
    as_of: DateTime<Utc>,
) -> SecurityScoreRecord {
    let mut factors = Vec::new();

    for factor in config.configured_factors() {
        let specs = config.metrics_for(factor);
        let constituents: Vec<_> = specs
            .iter()
            .map(|spec| {
                let sub = distributions
                    .get(&spec.name)
                    .and_then(|dist| normalize(snapshot.value(&spec.name), spec, dist));
                (spec.weight, sub)
            })
            .collect();

        let score = aggregate(&constituents);
        let sub_scores = constituents.into_iter().filter_map(|(_, s)| s).collect();
        factors.push(FactorResult {
            factor,
            score,
            sub_scores,
        });
    }

    let composite = compose(&factors, &config.factor_weights);

    SecurityScoreRecord {
        symbol: snapshot.symbol.clone(),
        computed_at: as_of,
        composite,
        factors,
    }
}
