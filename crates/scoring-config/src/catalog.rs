//! Built-in metric catalog and inter-factor weight table.
//!
//! This is the zero-config default; deployments override it with a JSON file.

use crate::ScoringConfig;
use scoring_core::{Direction, Factor, MetricSpec, ValidityPredicate};
use std::collections::BTreeMap;

fn metric(
    name: &str,
    factor: Factor,
    direction: Direction,
    predicate: ValidityPredicate,
    weight: f64,
) -> MetricSpec {
    MetricSpec {
        name: name.to_string(),
        factor,
        direction,
        predicate,
        winsor_lower: 0.01,
        winsor_upper: 0.99,
        weight,
    }
}

/// Default metric catalog covering all eight factors.
pub fn default_config() -> ScoringConfig {
    use Direction::{HigherIsBetter, LowerIsBetter};
    use ValidityPredicate::{Bounded, Finite, NonNegative, Positive};

    let metrics = vec![
        // Value: cheap multiples are favorable. Negative earnings/book make
        // the ratio meaningless, so zero and below is excluded outright.
        metric("pe_ratio", Factor::Value, LowerIsBetter, Positive, 0.40),
        metric("pb_ratio", Factor::Value, LowerIsBetter, Positive, 0.35),
        metric("ps_ratio", Factor::Value, LowerIsBetter, Positive, 0.25),
        // Quality: profitability can legitimately be negative, so only
        // non-finite values are excluded.
        metric("roe", Factor::Quality, HigherIsBetter, Finite, 0.35),
        metric("net_margin", Factor::Quality, HigherIsBetter, Finite, 0.35),
        metric(
            "debt_to_equity",
            Factor::Quality,
            LowerIsBetter,
            NonNegative,
            0.30,
        ),
        // Growth rates in percent, YoY.
        metric("revenue_growth", Factor::Growth, HigherIsBetter, Finite, 0.55),
        metric("eps_growth", Factor::Growth, HigherIsBetter, Finite, 0.45),
        // Momentum: trailing total returns in percent.
        metric("return_3m", Factor::Momentum, HigherIsBetter, Finite, 0.25),
        metric("return_6m", Factor::Momentum, HigherIsBetter, Finite, 0.35),
        metric("return_12m", Factor::Momentum, HigherIsBetter, Finite, 0.40),
        // Trend: price relative to moving averages, percent above/below.
        metric("price_vs_ma50", Factor::Trend, HigherIsBetter, Finite, 0.50),
        metric("price_vs_ma200", Factor::Trend, HigherIsBetter, Finite, 0.50),
        // Stability: calm names score high.
        metric(
            "volatility_1y",
            Factor::Stability,
            LowerIsBetter,
            Positive,
            0.40,
        ),
        metric(
            "max_drawdown_1y",
            Factor::Stability,
            LowerIsBetter,
            NonNegative,
            0.35,
        ),
        metric("beta", Factor::Stability, LowerIsBetter, Positive, 0.25),
        // Positioning: ownership and short interest in percent of float.
        metric(
            "institutional_ownership_pct",
            Factor::Positioning,
            HigherIsBetter,
            Bounded {
                min: 0.0,
                max: 100.0,
            },
            0.55,
        ),
        metric(
            "short_interest_pct",
            Factor::Positioning,
            LowerIsBetter,
            Bounded {
                min: 0.0,
                max: 100.0,
            },
            0.45,
        ),
        // Sentiment: computed for dashboards, zero composite weight.
        metric(
            "news_sentiment",
            Factor::Sentiment,
            HigherIsBetter,
            Bounded {
                min: -1.0,
                max: 1.0,
            },
            1.00,
        ),
    ];

    let factor_weights = BTreeMap::from([
        (Factor::Momentum, 0.1896),
        (Factor::Trend, 0.1368),
        (Factor::Growth, 0.1711),
        (Factor::Value, 0.1368),
        (Factor::Quality, 0.1368),
        (Factor::Stability, 0.1263),
        (Factor::Positioning, 0.1026),
        (Factor::Sentiment, 0.0),
    ]);

    ScoringConfig {
        metrics,
        factor_weights,
    }
}
