// src/fetch/icons.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument, warn};
use url::Url;

use super::Fetch;

static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]+").expect("filename regex should compile"));

/// What happened when an icon was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconOutcome {
    /// File was already on disk; no request made.
    Cached(PathBuf),
    Downloaded(PathBuf),
    Failed,
}

impl IconOutcome {
    pub fn path(&self) -> Option<&Path> {
        match self {
            IconOutcome::Cached(p) | IconOutcome::Downloaded(p) => Some(p),
            IconOutcome::Failed => None,
        }
    }
}

/// Ask the wiki's image scaler for a small rendition unless the URL
/// already pins a width.
pub fn with_width(url: &str, width: u32) -> String {
    if url.contains("width=") {
        return url.to_string();
    }
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}width={}", url, sep, width)
}

/// Deterministic local filename for a card icon: `<character>_<card>.png`
/// with every run of unsafe characters folded to `_`.
pub fn icon_filename(character: &str, card: &str) -> String {
    let raw = format!("{}_{}.png", character, card);
    let safe = UNSAFE_FILENAME_CHARS.replace_all(&raw, "_");
    match safe.strip_suffix("_png") {
        Some(stem) => format!("{}.png", stem),
        None => safe.into_owned(),
    }
}

/// Make sure `dir/filename` holds the icon behind `url`.
///
/// An existing file short-circuits the request. Transport or write failures
/// are logged and reported as `IconOutcome::Failed`; they never abort a run.
#[instrument(level = "debug", skip(fetcher, dir))]
pub fn download_icon<F: Fetch + ?Sized>(
    fetcher: &F,
    url: &str,
    filename: &str,
    dir: &Path,
    width: u32,
) -> IconOutcome {
    let path = dir.join(filename);
    if path.exists() {
        debug!(path = %path.display(), "icon cached");
        return IconOutcome::Cached(path);
    }

    let sized = with_width(url, width);
    let url = match Url::parse(&sized) {
        Ok(u) => u,
        Err(e) => {
            warn!(url = %sized, error = %e, "bad icon URL");
            return IconOutcome::Failed;
        }
    };

    let bytes = match fetcher.get_bytes(&url) {
        Ok(b) => b,
        Err(e) => {
            warn!(url = %url, error = %e, "icon download failed");
            return IconOutcome::Failed;
        }
    };

    if let Err(e) = fs::write(&path, &bytes) {
        warn!(path = %path.display(), error = %e, "writing icon failed");
        return IconOutcome::Failed;
    }
    debug!(path = %path.display(), size = bytes.len(), "icon downloaded");
    IconOutcome::Downloaded(path)
}
