//! Two-pass cross-sectional scoring engine.
//!
//! Pass 1 ([`build_distributions`]) scans the full universe once per metric
//! and produces immutable population statistics. Pass 2 ([`score_security`])
//! is a pure function of one security's snapshot and the completed
//! distribution map; it runs independently per security.
//!
//! Scores are population-relative: nothing from pass 2 may run until pass 1
//! has observed the entire universe for every metric.

mod aggregate;
mod composite;
mod distribution;
mod normalize;
mod scorer;

pub use aggregate::aggregate;
pub use composite::compose;
pub use distribution::{build_distribution, build_distributions, DistributionMap};
pub use normalize::normalize;
pub use scorer::score_security;
