// src/pipeline.rs

use anyhow::{Context, Result};
use chrono::Local;
use scraper::Html;
use std::{fs, path::PathBuf, time::Instant};
use tracing::{info, instrument};
use url::Url;

use crate::{
    companion::{update_companion_page, CompanionUpdate},
    config::ScrapeConfig,
    extract::{extract_records, ExtractStats},
    fetch::{Fetch, HttpFetcher},
    table::{TableLocator, REQUIRED_COLUMNS},
    write::write_records,
};

/// What a finished run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub csv_path: PathBuf,
    pub stats: ExtractStats,
    pub companion: CompanionUpdate,
}

/// Scrape the configured page over HTTP.
pub fn run(config: &ScrapeConfig) -> Result<RunSummary> {
    let fetcher = HttpFetcher::new(config)?;
    run_with(config, &fetcher)
}

/// Fetch → locate table → extract rows (icons inline) → write CSV →
/// stamp the companion page. A failed fetch or table lookup aborts the
/// run before anything touches the filesystem.
#[instrument(level = "info", skip_all, fields(url = %config.url))]
pub fn run_with<F: Fetch + ?Sized>(config: &ScrapeConfig, fetcher: &F) -> Result<RunSummary> {
    let start = Instant::now();
    let page_url =
        Url::parse(&config.url).with_context(|| format!("parsing page URL {}", config.url))?;
    let html = fetcher
        .get_text(&page_url)
        .with_context(|| format!("fetching cards page {}", page_url))?;
    let doc = Html::parse_document(&html);

    let table = TableLocator::default()
        .locate(&doc, &REQUIRED_COLUMNS)
        .context("locating cards table")?;
    info!(headers = ?table.headers, "table headers");

    fs::create_dir_all(&config.icon_dir)
        .with_context(|| format!("creating icon directory {:?}", config.icon_dir))?;

    let (records, stats) = extract_records(&table, &page_url, fetcher, config);
    write_records(&config.csv_path, &records)?;

    let companion = update_companion_page(&config.companion_page, Local::now().date_naive());

    info!(records = records.len(), elapsed = ?start.elapsed(), "run complete");
    Ok(RunSummary {
        csv_path: config.csv_path.clone(),
        stats,
        companion,
    })
}
