// src/extract/skill.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static LEVEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Lv\.\s*\d+").expect("level regex should compile"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex should compile"));

const ICON_SUFFIX: &str = "_icon.png";

/// Tier and turn markers read off a skill label such as
/// `Bait & Lure γ I`. Zero means the marker is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkillToken {
    pub tier: u8,
    pub turns: u8,
}

fn tier_of(token: &str) -> Option<u8> {
    match token {
        "I" => Some(1),
        "II" => Some(2),
        "III" => Some(3),
        _ => None,
    }
}

fn turns_of(token: &str) -> Option<u8> {
    match token {
        "α" => Some(1),
        "β" => Some(2),
        "γ" => Some(3),
        _ => None,
    }
}

impl SkillToken {
    /// Whole whitespace-separated tokens only; first match per marker wins.
    pub fn parse(label: &str) -> Self {
        let tier = label.split_whitespace().find_map(tier_of).unwrap_or(0);
        let turns = label.split_whitespace().find_map(turns_of).unwrap_or(0);
        Self { tier, turns }
    }

    pub fn display_label(&self) -> String {
        match self.turns {
            0 => format!("Tier={}", self.tier),
            1 => format!("Tier={} (1 Turn)", self.tier),
            n => format!("Tier={} ({} Turns)", self.tier, n),
        }
    }
}

/// `Tier=<n>` with an optional `(<m> Turn[s])`, or empty for no skill.
pub fn skill_display_name(label: &str) -> String {
    if label.is_empty() {
        return String::new();
    }
    SkillToken::parse(label).display_label()
}

/// Relative path of the icon for a skill: markers and `Lv. N` dropped,
/// punctuation removed, spaces turned into underscores.
/// `Bait & Lure γ I` → `<dir>/Bait_Lure_icon.png`. Empty when nothing
/// of the name is left, e.g. a bare `III`.
pub fn skill_icon_path(label: &str, dir: &Path) -> String {
    if label.is_empty() {
        return String::new();
    }
    let without_level = LEVEL.replace_all(label, " ");
    let base = without_level
        .split_whitespace()
        .filter(|t| tier_of(t).is_none() && turns_of(t).is_none())
        .collect::<Vec<_>>()
        .join(" ");
    let kept: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let stem = WHITESPACE.replace_all(kept.trim(), "_");
    if stem.is_empty() {
        return String::new();
    }
    dir.join(format!("{}{}", stem, ICON_SUFFIX))
        .to_string_lossy()
        .into_owned()
}
