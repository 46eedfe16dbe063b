//! Run configuration: the metric catalog and the inter-factor weight table.
//!
//! Loaded once per run, never hot-reloaded. Validation failures abort before
//! any computation starts; a malformed weight table must never silently skew
//! scores.

use scoring_core::{Factor, MetricSpec, ScoringError, WEIGHT_EPSILON};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

mod catalog;

pub use catalog::default_config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub metrics: Vec<MetricSpec>,
    /// Declared inter-factor weights; must sum to 1.0 across all factors.
    pub factor_weights: BTreeMap<Factor, f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        default_config()
    }
}

impl ScoringConfig {
    /// Load and validate a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ScoringError> {
        let raw = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ScoringError::Config(format!("cannot read config file: {}", e)))?;
        Self::from_json(&raw)
    }

    /// Parse and validate a config from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, ScoringError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| ScoringError::Config(format!("malformed config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Metric specs belonging to one factor, in catalog order.
    pub fn metrics_for(&self, factor: Factor) -> Vec<&MetricSpec> {
        self.metrics.iter().filter(|m| m.factor == factor).collect()
    }

    /// Factors that have at least one configured metric.
    pub fn configured_factors(&self) -> Vec<Factor> {
        Factor::ALL
            .into_iter()
            .filter(|f| self.metrics.iter().any(|m| m.factor == *f))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.metrics.is_empty() {
            return Err(ScoringError::Config("no metrics configured".to_string()));
        }

        let mut seen = HashSet::new();
        for spec in &self.metrics {
            if !seen.insert(spec.name.as_str()) {
                return Err(ScoringError::Config(format!(
                    "duplicate metric name '{}'",
                    spec.name
                )));
            }
            if !(spec.weight.is_finite() && spec.weight >= 0.0) {
                return Err(ScoringError::Config(format!(
                    "metric '{}' has invalid weight {}",
                    spec.name, spec.weight
                )));
            }
            // Strict bounds: percentiles of exactly 0 or 1 disable
            // winsorization entirely.
            if !(spec.winsor_lower > 0.0
                && spec.winsor_upper < 1.0
                && spec.winsor_lower < spec.winsor_upper)
            {
                return Err(ScoringError::Config(format!(
                    "metric '{}' has invalid winsor bounds [{}, {}]",
                    spec.name, spec.winsor_lower, spec.winsor_upper
                )));
            }
        }

        // Intra-factor weights must sum to 1.0 per configured factor.
        for factor in self.configured_factors() {
            let sum: f64 = self.metrics_for(factor).iter().map(|m| m.weight).sum();
            if (sum - 1.0).abs() > WEIGHT_EPSILON {
                return Err(ScoringError::Config(format!(
                    "intra-factor weights for {} sum to {}, expected 1.0",
                    factor.as_str(),
                    sum
                )));
            }
        }

        // Every configured factor needs an entry in the weight table, and the
        // declared inter-factor weights must sum to 1.0.
        for factor in self.configured_factors() {
            if !self.factor_weights.contains_key(&factor) {
                return Err(ScoringError::Config(format!(
                    "factor {} has metrics but no composite weight",
                    factor.as_str()
                )));
            }
        }
        for (factor, weight) in &self.factor_weights {
            if !(weight.is_finite() && *weight >= 0.0) {
                return Err(ScoringError::Config(format!(
                    "factor {} has invalid weight {}",
                    factor.as_str(),
                    weight
                )));
            }
        }
        let inter_sum: f64 = self.factor_weights.values().sum();
        if (inter_sum - 1.0).abs() > WEIGHT_EPSILON {
            return Err(ScoringError::Config(format!(
                "inter-factor weights sum to {}, expected 1.0",
                inter_sum
            )));
        }

        Ok(())
    }
}
