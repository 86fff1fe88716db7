use booking_fees::application::engine::SettlementEngine;
use booking_fees::config::PolicyConfig;
use booking_fees::domain::policy::FeePolicy;
use booking_fees::domain::ports::BookingStoreBox;
use booking_fees::infrastructure::in_memory::InMemoryBookingStore;
use booking_fees::interfaces::csv::event_reader::BookingEventReader;
use booking_fees::interfaces::csv::settlement_writer::SettlementWriter;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input booking events CSV file
    input: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// JSON file overriding the default fee and refund policy
    #[arg(long)]
    policy: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.policy {
        Some(path) => PolicyConfig::from_path(path).into_diagnostic()?,
        None => PolicyConfig::default(),
    };
    let policy = FeePolicy::new(&config).into_diagnostic()?;
    let engine = SettlementEngine::new(open_store(cli.db_path)?, policy);

    // Process events
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = BookingEventReader::new(file);
    for (row, event) in reader.events().enumerate() {
        match event {
            Ok(event) => {
                let booking = event.booking;
                if let Err(e) = engine.process_event(event).await {
                    tracing::warn!(row = row + 1, booking, error = %e, "failed to process booking event");
                }
            }
            Err(e) => {
                tracing::warn!(row = row + 1, error = %e, "failed to read booking event");
            }
        }
    }

    let records = engine.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = SettlementWriter::new(stdout.lock());
    writer.write_records(&records).into_diagnostic()?;

    Ok(())
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<BookingStoreBox> {
    use booking_fees::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using RocksDB booking store");
            Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?))
        }
        None => Ok(Box::new(InMemoryBookingStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<BookingStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled; falling back to in-memory storage"
        );
    }
    Ok(Box::new(InMemoryBookingStore::new()))
}
