use crate::{ScoringError, SecurityScoreRecord, SecuritySnapshot};
use async_trait::async_trait;

/// Read-only access to per-security raw metric records. One bulk read per run.
#[async_trait]
pub trait MetricStore: Send + Sync {
    async fn load_universe(&self) -> Result<Vec<SecuritySnapshot>, ScoringError>;
}

/// Writes computed score records to durable storage. Implementations must be
/// transactional at least at one-record granularity so downstream readers
/// never see a partially written security.
#[async_trait]
pub trait ScoreSink: Send + Sync {
    async fn write_record(&self, record: &SecurityScoreRecord) -> Result<(), ScoringError>;

    async fn write_all(&self, records: &[SecurityScoreRecord]) -> Result<(), ScoringError> {
        for record in records {
            self.write_record(record).await?;
        }
        Ok(())
    }
}
