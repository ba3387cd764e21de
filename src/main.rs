use anyhow::Result;
use cardscraper::{run, ScrapeConfig};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) scrape ───────────────────────────────────────────────────
    let config = ScrapeConfig::default();
    let summary = run(&config)?;

    info!(
        csv = %summary.csv_path.display(),
        records = summary.stats.records,
        "all done"
    );
    Ok(())
}
