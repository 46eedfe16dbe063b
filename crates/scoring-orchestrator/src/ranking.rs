//! Ranked listing over computed score records, for screening and dashboard
//! surfaces.

use scoring_core::SecurityScoreRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedSecurity {
    pub rank: usize,
    pub symbol: String,
    pub composite: f64,
    /// Factor names scoring 70 or above, for display.
    pub key_strengths: Vec<String>,
}

/// Rank records by composite, best first, truncated to `limit`.
///
/// Securities with an unavailable composite are excluded — they render as
/// "insufficient data" downstream, never as a zero entry at the bottom of
/// the table.
pub fn rank(records: &[SecurityScoreRecord], limit: usize) -> Vec<RankedSecurity> {
    let mut scored: Vec<(&SecurityScoreRecord, f64)> = records
        .iter()
        .filter_map(|r| r.composite.map(|c| (r, c)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);

    scored
        .into_iter()
        .enumerate()
        .map(|(i, (record, composite))| RankedSecurity {
            rank: i + 1,
            symbol: record.symbol.clone(),
            composite,
            key_strengths: record
                .factors
                .iter()
                .filter(|f| f.score.is_some_and(|s| s >= 70.0))
                .map(|f| f.factor.as_str().to_string())
                .collect(),
        })
        .collect()
}
