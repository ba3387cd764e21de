// src/write.rs

use anyhow::{Context, Result};
use std::{fs, path::Path};
use tracing::info;

use crate::record::{CardRecord, CSV_HEADERS};

/// Write `records` as CSV to `path`, header row first.
///
/// - parent directories are created
/// - the file is written to a dot-prefixed sibling and renamed into place,
///   so a failed run never leaves a half-written dataset behind
pub fn write_records<P: AsRef<Path>>(path: P, records: &[CardRecord]) -> Result<()> {
    let path = path.as_ref();
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;

    let file_name = path
        .file_name()
        .with_context(|| format!("{:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp_path)
            .with_context(|| format!("creating {:?}", tmp_path))?;
        writer.write_record(CSV_HEADERS).context("writing CSV header")?;
        for record in records {
            writer
                .serialize(record)
                .with_context(|| format!("writing card {:?}", record.card_name))?;
        }
        writer.flush().context("flushing CSV")?;
    }

    fs::rename(&tmp_path, path).with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;
    info!(path = %path.display(), records = records.len(), "wrote dataset");
    Ok(())
}
