use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Factor families a metric can belong to.
///
/// Sentiment is computed like any other factor but carries zero weight in the
/// composite under current policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Value,
    Quality,
    Growth,
    Momentum,
    Trend,
    Stability,
    Positioning,
    Sentiment,
}

impl Factor {
    /// All factors, in the fixed order used for score records.
    pub const ALL: [Factor; 8] = [
        Factor::Value,
        Factor::Quality,
        Factor::Growth,
        Factor::Momentum,
        Factor::Trend,
        Factor::Stability,
        Factor::Positioning,
        Factor::Sentiment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Value => "value",
            Factor::Quality => "quality",
            Factor::Growth => "growth",
            Factor::Momentum => "momentum",
            Factor::Trend => "trend",
            Factor::Stability => "stability",
            Factor::Positioning => "positioning",
            Factor::Sentiment => "sentiment",
        }
    }
}

/// Whether high raw values are favorable or unfavorable for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Validity predicate attached to a `MetricSpec`.
///
/// The same predicate instance decides inclusion when a distribution is built
/// and eligibility when a value is scored against it. NaN and infinities never
/// pass any variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidityPredicate {
    /// Any finite value.
    Finite,
    /// Strictly positive (ratios where zero/negative means "not meaningful").
    Positive,
    /// Zero or above.
    NonNegative,
    /// Inclusive range.
    Bounded { min: f64, max: f64 },
}

impl ValidityPredicate {
    pub fn accepts(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            ValidityPredicate::Finite => true,
            ValidityPredicate::Positive => value > 0.0,
            ValidityPredicate::NonNegative => value >= 0.0,
            ValidityPredicate::Bounded { min, max } => value >= *min && value <= *max,
        }
    }
}

fn default_winsor_lower() -> f64 {
    0.01
}

fn default_winsor_upper() -> f64 {
    0.99
}

/// Static declaration of one raw metric. Immutable per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub factor: Factor,
    pub direction: Direction,
    pub predicate: ValidityPredicate,
    /// Winsorization percentile bounds as fractions in (0, 1).
    #[serde(default = "default_winsor_lower")]
    pub winsor_lower: f64,
    #[serde(default = "default_winsor_upper")]
    pub winsor_upper: f64,
    /// Intra-factor weight; weights within one factor sum to 1.0.
    pub weight: f64,
}

/// One security's raw metric values for a run. Missing metrics are a valid
/// input state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecuritySnapshot {
    pub symbol: String,
    pub metrics: HashMap<String, f64>,
}

impl SecuritySnapshot {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            metrics: HashMap::new(),
        }
    }

    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    pub fn value(&self, metric: &str) -> Option<f64> {
        self.metrics.get(metric).copied()
    }
}

/// Population statistics for one metric, built once per run from the full
/// universe and discarded afterward.
#[derive(Debug, Clone, Serialize)]
pub struct Distribution {
    pub metric: String,
    /// Accepted raw values, sorted ascending. The percentile bounds below are
    /// derived from exactly this set.
    pub accepted: Vec<f64>,
    pub count: usize,
    /// Mean of the winsorized accepted values.
    pub mean: f64,
    /// Population standard deviation of the winsorized accepted values.
    pub std_dev: f64,
    pub winsor_min: f64,
    pub winsor_max: f64,
    /// Fewer than `LOW_CONFIDENCE_COUNT` accepted values.
    pub low_confidence: bool,
}

/// One security's normalized 0-100 score for one metric, with the raw input
/// behind it retained for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    pub metric: String,
    pub raw_value: f64,
    pub score: f64,
}

/// One factor's outcome for a security. `score` is `None` only when every
/// constituent metric was unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorResult {
    pub factor: Factor,
    pub score: Option<f64>,
    pub sub_scores: Vec<SubScore>,
}

/// Full score record for one security in one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityScoreRecord {
    pub symbol: String,
    pub computed_at: DateTime<Utc>,
    /// `None` means "insufficient data", never a proxy for zero.
    pub composite: Option<f64>,
    pub factors: Vec<FactorResult>,
}

impl SecurityScoreRecord {
    pub fn factor_score(&self, factor: Factor) -> Option<f64> {
        self.factors
            .iter()
            .find(|f| f.factor == factor)
            .and_then(|f| f.score)
    }
}
