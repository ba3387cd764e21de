// src/extract/name.rs

use once_cell::sync::Lazy;
use regex::Regex;

static QUOTED_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^(.*?)\s+"(.*?)"$"#).expect("name regex should compile"));

/// Split a Name cell like `Aladdin "Prince of Thieves"` into
/// `(character, card title)`.
///
/// Without a trailing quoted title the text is split on the first `"`;
/// the title is empty when there is nothing after it.
pub fn parse_name(text: &str) -> (String, String) {
    if let Some(caps) = QUOTED_TITLE.captures(text) {
        return (caps[1].trim().to_string(), caps[2].to_string());
    }
    let mut parts = text.split('"');
    let character = parts.next().unwrap_or_default().trim().to_string();
    let card = parts.next().map(|s| s.trim().to_string()).unwrap_or_default();
    (character, card)
}
