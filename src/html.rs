// src/html.rs

use scraper::{ElementRef, Selector};

pub fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector should parse")
}

/// Every text node trimmed, then glued with no separator.
/// `<th>Max <br/> Skill(s)</th>` reads as `MaxSkill(s)`.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}

/// Every text node trimmed, empty ones dropped, joined by single spaces.
pub fn spaced_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
