use async_trait::async_trait;
use scoring_core::{Factor, MetricStore, ScoreSink, ScoringError, SecurityScoreRecord, SecuritySnapshot};
use sqlx::SqlitePool;

fn store_err(e: sqlx::Error) -> ScoringError {
    ScoringError::Store(e.to_string())
}

/// SQLite-backed metric store and score sink.
///
/// Raw metrics are read in one bulk query per run. Each security's score
/// record is written in its own transaction so downstream readers never see a
/// partially written row set for one security.
pub struct SqliteScoreStore {
    pool: SqlitePool,
}

impl SqliteScoreStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_tables(&self) -> Result<(), ScoringError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS raw_metrics (
                symbol TEXT NOT NULL,
                metric TEXT NOT NULL,
                value REAL NOT NULL,
                PRIMARY KEY (symbol, metric)
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS security_scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                symbol TEXT NOT NULL,
                computed_at TEXT NOT NULL,
                composite REAL,
                value_score REAL,
                quality_score REAL,
                growth_score REAL,
                momentum_score REAL,
                trend_score REAL,
                stability_score REAL,
                positioning_score REAL,
                sentiment_score REAL,
                detail_json TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    /// Upsert one raw metric observation.
    pub async fn insert_metric(
        &self,
        symbol: &str,
        metric: &str,
        value: f64,
    ) -> Result<(), ScoringError> {
        sqlx::query(
            "INSERT INTO raw_metrics (symbol, metric, value) VALUES (?, ?, ?)
             ON CONFLICT (symbol, metric) DO UPDATE SET value = excluded.value",
        )
        .bind(symbol)
        .bind(metric)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(())
    }

    /// Most recent composite for a symbol. Outer `None`: never scored; inner
    /// `None`: scored but insufficient data.
    pub async fn latest_composite(
        &self,
        symbol: &str,
    ) -> Result<Option<Option<f64>>, ScoringError> {
        let row: Option<(Option<f64>,)> = sqlx::query_as(
            "SELECT composite FROM security_scores
             WHERE symbol = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(symbol)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(row.map(|(c,)| c))
    }
}

#[async_trait]
impl MetricStore for SqliteScoreStore {
    async fn load_universe(&self) -> Result<Vec<SecuritySnapshot>, ScoringError> {
        let rows: Vec<(String, String, f64)> =
            sqlx::query_as("SELECT symbol, metric, value FROM raw_metrics ORDER BY symbol")
                .fetch_all(&self.pool)
                .await
                .map_err(store_err)?;

        let row_count = rows.len();
        let mut snapshots: Vec<SecuritySnapshot> = Vec::new();
        for (symbol, metric, value) in rows {
            match snapshots.last_mut() {
                Some(current) if current.symbol == symbol => {
                    current.metrics.insert(metric, value);
                }
                _ => {
                    snapshots.push(SecuritySnapshot::new(symbol).with_metric(metric, value));
                }
            }
        }
        tracing::debug!(
            rows = row_count,
            securities = snapshots.len(),
            "loaded raw metric universe"
        );
        Ok(snapshots)
    }
}

#[async_trait]
impl ScoreSink for SqliteScoreStore {
    async fn write_record(&self, record: &SecurityScoreRecord) -> Result<(), ScoringError> {
        let detail_json = serde_json::to_string(&record.factors)
            .map_err(|e| ScoringError::Store(e.to_string()))?;

        let mut tx = self.pool.begin().await.map_err(store_err)?;
        sqlx::query(
            "INSERT INTO security_scores (
                symbol, computed_at, composite,
                value_score, quality_score, growth_score, momentum_score,
                trend_score, stability_score, positioning_score, sentiment_score,
                detail_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&record.symbol)
        .bind(record.computed_at.to_rfc3339())
        .bind(record.composite)
        .bind(record.factor_score(Factor::Value))
        .bind(record.factor_score(Factor::Quality))
        .bind(record.factor_score(Factor::Growth))
        .bind(record.factor_score(Factor::Momentum))
        .bind(record.factor_score(Factor::Trend))
        .bind(record.factor_score(Factor::Stability))
        .bind(record.factor_score(Factor::Positioning))
        .bind(record.factor_score(Factor::Sentiment))
        .bind(&detail_json)
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;
        tx.commit().await.map_err(store_err)?;

        Ok(())
    }
}
