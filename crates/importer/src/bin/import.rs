use std::path::PathBuf;

use clap::Parser;
use importer::{PgPlayerStore, PlayerImporter, parse_players};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "import-players")]
#[command(about = "Bulk-register players from a CSV file", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV with headers name,cnic,phone,email,ticketPrice,category,game
    file: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Parse and report the rows without writing anything
    #[arg(long)]
    validate_only: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("import={},importer={}", log_level, log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Loading players from: {}", cli.file.display());
    let bytes = tokio::fs::read(&cli.file).await?;

    if cli.validate_only {
        let rows = parse_players(&bytes)?;
        tracing::info!("✓ {} row(s) parsed, nothing written", rows.len());
        return Ok(());
    }

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await?;

    let store = PgPlayerStore::new(&pool);
    let summary = PlayerImporter::new(&store).import_csv(&bytes).await?;

    tracing::info!(
        "✓ Inserted {} player(s); skipped {} (unknown category: {}, unknown game: {}, already registered: {})",
        summary.inserted,
        summary.skipped(),
        summary.unknown_category,
        summary.unknown_game,
        summary.duplicates
    );

    Ok(())
}
