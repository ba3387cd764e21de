// src/companion.rs

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs, path::Path};
use tracing::{info, warn};

static DATE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<p>Cards database updated on \d{4}-\d{2}-\d{2}</p>")
        .expect("date line regex should compile")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompanionUpdate {
    /// Number of date lines rewritten.
    Updated(usize),
    MissingFile,
    PatternAbsent,
    Failed(String),
}

/// Replace every date stamp in `content` with `date`. `None` when there is
/// no stamp to replace.
pub fn stamp_date(content: &str, date: NaiveDate) -> Option<(String, usize)> {
    let count = DATE_LINE.find_iter(content).count();
    if count == 0 {
        return None;
    }
    let line = format!("<p>Cards database updated on {}</p>", date.format("%Y-%m-%d"));
    let stamped = DATE_LINE.replace_all(content, regex::NoExpand(&line)).into_owned();
    Some((stamped, count))
}

/// Refresh the "updated on" line of the static front-end page.
/// Cosmetic: every failure is a warning and the dataset is unaffected.
pub fn update_companion_page(path: &Path, date: NaiveDate) -> CompanionUpdate {
    if !path.exists() {
        warn!(path = %path.display(), "companion page not found, skipping date update");
        return CompanionUpdate::MissingFile;
    }

    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "reading companion page failed");
            return CompanionUpdate::Failed(e.to_string());
        }
    };

    let Some((stamped, count)) = stamp_date(&content, date) else {
        warn!(path = %path.display(), "could not find date pattern in companion page");
        return CompanionUpdate::PatternAbsent;
    };

    if let Err(e) = fs::write(path, stamped) {
        warn!(path = %path.display(), error = %e, "writing companion page failed");
        return CompanionUpdate::Failed(e.to_string());
    }
    info!(path = %path.display(), %date, replaced = count, "updated companion page date");
    CompanionUpdate::Updated(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn rewrites_every_stamp() {
        let tmp = tempdir().unwrap();
        let page = tmp.path().join("index.html");
        fs::write(
            &page,
            "<body>\n<p>Cards database updated on 2024-01-02</p>\n<footer><p>Cards database updated on 2023-12-31</p></footer>\n</body>",
        )
        .unwrap();

        assert_eq!(update_companion_page(&page, day()), CompanionUpdate::Updated(2));
        let text = fs::read_to_string(&page).unwrap();
        assert_eq!(text.matches("<p>Cards database updated on 2026-10-18</p>").count(), 2);
        assert!(!text.contains("2024-01-02"));
    }

    #[test]
    fn absent_pattern_leaves_file_alone() {
        let tmp = tempdir().unwrap();
        let page = tmp.path().join("index.html");
        let original = "<p>Cards database updated on yesterday</p>";
        fs::write(&page, original).unwrap();

        assert_eq!(update_companion_page(&page, day()), CompanionUpdate::PatternAbsent);
        assert_eq!(fs::read_to_string(&page).unwrap(), original);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let tmp = tempdir().unwrap();
        let outcome = update_companion_page(&tmp.path().join("nope.html"), day());
        assert_eq!(outcome, CompanionUpdate::MissingFile);
    }

    #[test]
    fn stamp_without_match_is_none() {
        assert_eq!(stamp_date("nothing here", day()), None);
    }
}
