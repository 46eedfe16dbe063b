use async_trait::async_trait;
use scoring_core::{MetricStore, ScoreSink, ScoringError, SecurityScoreRecord, SecuritySnapshot};
use std::sync::Mutex;

/// In-memory store, used by tests and by the runner's dry-run mode.
#[derive(Default)]
pub struct InMemoryStore {
    universe: Vec<SecuritySnapshot>,
    written: Mutex<Vec<SecurityScoreRecord>>,
}

impl InMemoryStore {
    pub fn with_universe(universe: Vec<SecuritySnapshot>) -> Self {
        Self {
            universe,
            written: Mutex::new(Vec::new()),
        }
    }

    /// Records written so far, in write order.
    pub fn written(&self) -> Vec<SecurityScoreRecord> {
        self.written.lock().expect("store lock poisoned").clone()
    }
}

#[async_trait]
impl MetricStore for InMemoryStore {
    async fn load_universe(&self) -> Result<Vec<SecuritySnapshot>, ScoringError> {
        Ok(self.universe.clone())
    }
}

#[async_trait]
impl ScoreSink for InMemoryStore {
    async fn write_record(&self, record: &SecurityScoreRecord) -> Result<(), ScoringError> {
        self.written
            .lock()
            .map_err(|_| ScoringError::Store("score buffer lock poisoned".to_string()))?
            .push(record.clone());
        Ok(())
    }
}
