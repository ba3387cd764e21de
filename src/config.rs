// src/config.rs

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_URL: &str = "https://tot.wiki/wiki/Cards";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_ICON_WIDTH: u32 = 50;

/// Everything a run needs to know. `Default` mirrors the layout the
/// front-end expects under `data/`.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub url: String,
    pub icon_dir: PathBuf,
    /// Prefix for derived skill-icon paths. Never read or written here.
    pub skill_icon_dir: PathBuf,
    pub csv_path: PathBuf,
    pub companion_page: PathBuf,
    pub user_agent: String,
    pub timeout: Duration,
    pub icon_width: u32,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            icon_dir: PathBuf::from("data/icons"),
            skill_icon_dir: PathBuf::from("data/skill_icons"),
            csv_path: PathBuf::from("data/tot_cards_with_icons.csv"),
            companion_page: PathBuf::from("index.html"),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            icon_width: DEFAULT_ICON_WIDTH,
        }
    }
}

impl ScrapeConfig {
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_icon_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.icon_dir = dir.into();
        self
    }

    pub fn with_skill_icon_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.skill_icon_dir = dir.into();
        self
    }

    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv_path = path.into();
        self
    }

    pub fn with_companion_page(mut self, path: impl Into<PathBuf>) -> Self {
        self.companion_page = path.into();
        self
    }
}
