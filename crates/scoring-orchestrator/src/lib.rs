//! Batch run driver for the scoring engine.
//!
//! One run: bulk read of the universe, phase 1 (distributions, parallel
//! across metrics), phase 2 (per-security scoring, parallel across
//! securities), then a per-record transactional write. An interrupted run is
//! simply rerun from phase 1; distributions are a function of a full-universe
//! snapshot and are never reused across runs.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use scoring_config::ScoringConfig;
use scoring_core::{MetricStore, ScoreSink, ScoringError, SecurityScoreRecord};
use scoring_engine::{build_distributions, score_security};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub mod ranking;

pub use ranking::{rank, RankedSecurity};

/// Summary of one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub as_of: DateTime<Utc>,
    pub total_securities: usize,
    /// Securities with an available composite.
    pub scored: usize,
    /// Securities whose composite came out unavailable.
    pub unavailable: usize,
    /// Metrics with zero accepted values universe-wide this run.
    pub metric_outages: Vec<String>,
    /// Metrics whose distribution was built from a thin accepted set.
    pub low_confidence_metrics: Vec<String>,
    pub elapsed_ms: u128,
}

#[derive(Debug)]
pub struct ScoringOrchestrator {
    config: ScoringConfig,
}

impl ScoringOrchestrator {
    /// Build an orchestrator from a validated config. Malformed weights are a
    /// fatal pre-run error; nothing is computed against a bad weight table.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Execute one full scoring run and persist every record.
    ///
    /// Returns the computed records alongside the report; the records are
    /// already durable by the time this returns. A persistence failure is
    /// surfaced to the caller for retry; the computation itself is idempotent
    /// and safe to rerun from phase 1.
    pub async fn run(
        &self,
        store: &dyn MetricStore,
        sink: &dyn ScoreSink,
    ) -> Result<(RunReport, Vec<SecurityScoreRecord>), ScoringError> {
        let started = Instant::now();
        let as_of = Utc::now();

        let universe = store.load_universe().await?;
        tracing::info!("📥 Loaded universe of {} securities", universe.len());

        // Phase 1: full-universe distributions. Must complete for every
        // metric before any security is scored; z-scores are meaningless
        // against a partially scanned population.
        let distributions = build_distributions(&universe, &self.config.metrics);
        let metric_outages: Vec<String> = self
            .config
            .metrics
            .iter()
            .filter(|spec| !distributions.contains_key(&spec.name))
            .map(|spec| spec.name.clone())
            .collect();
        let low_confidence_metrics: Vec<String> = distributions
            .values()
            .filter(|d| d.low_confidence)
            .map(|d| d.metric.clone())
            .collect();
        tracing::info!(
            "📊 Phase 1 complete: {}/{} metric distributions built",
            distributions.len(),
            self.config.metrics.len()
        );
        for metric in &metric_outages {
            tracing::warn!(metric = %metric, "metric unavailable universe-wide this run");
        }

        // Phase 2: embarrassingly parallel, pure per security.
        let records: Vec<SecurityScoreRecord> = universe
            .par_iter()
            .map(|snapshot| score_security(snapshot, &self.config, &distributions, as_of))
            .collect();
        let scored = records.iter().filter(|r| r.composite.is_some()).count();
        tracing::info!(
            "✅ Phase 2 complete: {}/{} securities scored",
            scored,
            records.len()
        );

        sink.write_all(&records).await?;

        let report = RunReport {
            as_of,
            total_securities: records.len(),
            scored,
            unavailable: records.len() - scored,
            metric_outages,
            low_confidence_metrics,
            elapsed_ms: started.elapsed().as_millis(),
        };
        Ok((report, records))
    }
}
