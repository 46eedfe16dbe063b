//! rank-runner: one batch scoring run over the metric store.
//!
//! Usage:
//!   cargo run -p rank-runner                       # built-in catalog
//!   cargo run -p rank-runner -- --config cfg.json  # custom catalog/weights
//!   cargo run -p rank-runner -- --top 50
//!
//! Reads DATABASE_URL (default sqlite://rankiq.db?mode=rwc).

use scoring_config::ScoringConfig;
use scoring_orchestrator::{rank, ScoringOrchestrator};
use score_store::SqliteScoreStore;
use sqlx::sqlite::SqlitePoolOptions;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rank_runner=info,scoring_orchestrator=info,scoring_engine=info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = arg_value(&args, "--config");
    let top: usize = arg_value(&args, "--top")
        .map(|v| v.parse())
        .transpose()?
        .unwrap_or(20);

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading scoring config from {}", path);
            ScoringConfig::from_file(path)?
        }
        None => ScoringConfig::default(),
    };
    let orchestrator = ScoringOrchestrator::new(config)?;

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://rankiq.db?mode=rwc".to_string());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;
    let store = SqliteScoreStore::new(pool);
    store.init_tables().await?;

    let (report, records) = orchestrator.run(&store, &store).await?;

    tracing::info!(
        "Run complete: {}/{} securities scored in {} ms ({} insufficient data)",
        report.scored,
        report.total_securities,
        report.elapsed_ms,
        report.unavailable
    );
    if !report.metric_outages.is_empty() {
        tracing::warn!("Metric outages this run: {}", report.metric_outages.join(", "));
    }

    println!();
    println!("  #  SYMBOL      COMPOSITE  STRENGTHS");
    for entry in rank(&records, top) {
        println!(
            "{:>3}  {:<10} {:>9.2}  {}",
            entry.rank,
            entry.symbol,
            entry.composite,
            entry.key_strengths.join(", ")
        );
    }

    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
}
