use thiserror::Error;

/// Failures that abort a run. Per-security data problems and numeric
/// degeneracy are recovered locally in the engine and never surface here.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),
}
