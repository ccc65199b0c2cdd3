use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use journal_engine::config::Config;
use journal_engine::report::JournalReport;
use journal_engine::store::{JournalStore, RecordStore};

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    // Journal path can be overridden on the command line.
    let args: Vec<String> = std::env::args().collect();
    let journal_file = args.get(1).cloned().unwrap_or(cfg.journal_file);

    let store = JournalStore::open(&journal_file);
    let trades = store.list_trades().await?;
    let presessions = store.list_presessions().await?;
    let postsessions = store.list_postsessions().await?;

    println!("Journal: {}", journal_file);
    println!(
        "Records: {} trades, {} pre-sessions, {} post-session reviews",
        trades.len(),
        presessions.len(),
        postsessions.len()
    );

    let report = JournalReport::build(&trades, &presessions);
    report.print_summary();

    Ok(())
}
