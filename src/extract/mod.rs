// src/extract/mod.rs

use scraper::ElementRef;
use std::path::Path;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::{
    config::ScrapeConfig,
    fetch::{download_icon, icon_filename, Fetch, IconOutcome},
    html::{selector, spaced_text, stripped_text},
    record::CardRecord,
    table::{LocatedTable, TableSchema, ATTRIBUTE, MAX_SKILLS, NAME, RARITY},
};

pub mod name;
pub mod skill;

pub use name::parse_name;
pub use skill::{skill_display_name, skill_icon_path, SkillToken};

const PREVIEW_ROWS: usize = 5;

/// Per-run counters, logged once extraction finishes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExtractStats {
    pub rows: usize,
    pub malformed: usize,
    pub untitled: usize,
    pub records: usize,
    pub icons_downloaded: usize,
    pub icons_cached: usize,
    pub icons_failed: usize,
}

/// Why a row produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSkip {
    /// Fewer `<td>` cells than the schema needs.
    Malformed,
    /// No card title in the Name cell, e.g. a section-header row.
    Untitled,
}

/// Data rows of the table: `<tbody>` rows when there are any, otherwise
/// every row after the first.
pub fn data_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let body_rows: Vec<_> = table.select(&selector("tbody tr")).collect();
    if !body_rows.is_empty() {
        return body_rows;
    }
    table.select(&selector("tr")).skip(1).collect()
}

/// Rarity icons carry the category in their alt text.
pub fn rarity_from_cell(cell: ElementRef<'_>) -> String {
    if let Some(img) = cell.select(&selector("img")).next() {
        if let Some(alt) = img.value().attr("alt").filter(|a| !a.is_empty()) {
            return alt.trim().to_string();
        }
    }
    spaced_text(cell)
}

/// First bold run in the skills cell, or empty.
pub fn first_skill(cell: ElementRef<'_>) -> String {
    cell.select(&selector("b"))
        .next()
        .map(stripped_text)
        .unwrap_or_default()
}

/// Absolute URL of the first image in the Name cell, if it has a `src`.
pub fn icon_url(cell: ElementRef<'_>, page_url: &Url) -> Option<Url> {
    let img = cell.select(&selector("img")).next()?;
    let src = img.value().attr("src").filter(|s| !s.trim().is_empty())?;
    match page_url.join(src) {
        Ok(u) => Some(u),
        Err(e) => {
            warn!(src, error = %e, "unresolvable icon src");
            None
        }
    }
}

/// Pull every field out of one row. No network access; the returned
/// record has no local icon path yet.
pub fn parse_row(
    row: ElementRef<'_>,
    schema: &TableSchema,
    page_url: &Url,
    skill_icon_dir: &Path,
) -> Result<CardRecord, RowSkip> {
    let cells: Vec<ElementRef<'_>> = row.select(&selector("td")).collect();
    if cells.len() < schema.min_cells() {
        return Err(RowSkip::Malformed);
    }
    let cell = |name: &str| schema.index(name).and_then(|i| cells.get(i).copied());
    let (Some(name_cell), Some(rarity_cell), Some(attribute_cell), Some(skills_cell)) =
        (cell(NAME), cell(RARITY), cell(ATTRIBUTE), cell(MAX_SKILLS))
    else {
        return Err(RowSkip::Malformed);
    };

    let (character, card_name) = parse_name(&spaced_text(name_cell));
    if card_name.is_empty() {
        return Err(RowSkip::Untitled);
    }

    let skill = first_skill(skills_cell);
    let record = CardRecord {
        first_skill_icon: skill_icon_path(&skill, skill_icon_dir),
        first_skill_display_name: skill_display_name(&skill),
        first_skill: skill,
        rarity: rarity_from_cell(rarity_cell),
        attribute: spaced_text(attribute_cell),
        icon_url: icon_url(name_cell, page_url).map(|u| u.to_string()),
        local_icon_path: None,
        character,
        card_name,
    };
    Ok(record)
}

/// Walk the table's data rows in order, fetching each row's icon before
/// moving on to the next.
#[instrument(level = "info", skip_all, fields(table = table.position))]
pub fn extract_records<F: Fetch + ?Sized>(
    table: &LocatedTable<'_>,
    page_url: &Url,
    fetcher: &F,
    config: &ScrapeConfig,
) -> (Vec<CardRecord>, ExtractStats) {
    let rows = data_rows(table.element);
    info!(rows = rows.len(), "extracting rows");

    let mut stats = ExtractStats::default();
    let mut records = Vec::new();

    for (i, row) in rows.into_iter().enumerate() {
        stats.rows += 1;
        let mut record = match parse_row(row, &table.schema, page_url, &config.skill_icon_dir) {
            Ok(record) => record,
            Err(RowSkip::Malformed) => {
                stats.malformed += 1;
                continue;
            }
            Err(RowSkip::Untitled) => {
                stats.untitled += 1;
                continue;
            }
        };

        if let Some(url) = record.icon_url.as_deref() {
            let filename = icon_filename(&record.character, &record.card_name);
            let outcome =
                download_icon(fetcher, url, &filename, &config.icon_dir, config.icon_width);
            match &outcome {
                IconOutcome::Downloaded(_) => stats.icons_downloaded += 1,
                IconOutcome::Cached(_) => stats.icons_cached += 1,
                IconOutcome::Failed => stats.icons_failed += 1,
            }
            record.local_icon_path = outcome.path().map(|p| p.to_string_lossy().into_owned());
        }

        debug!(row = i, card = %record.card_name, character = %record.character, "row extracted");
        if records.len() < PREVIEW_ROWS {
            info!(
                card = %record.card_name,
                character = %record.character,
                rarity = %record.rarity,
                attribute = %record.attribute,
                skill = %record.first_skill,
                "preview"
            );
        }
        records.push(record);
    }

    stats.records = records.len();
    info!(?stats, "extraction finished");
    (records, stats)
}
