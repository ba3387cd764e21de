// src/record.rs

use serde::{Deserialize, Serialize};

/// One card row as written to the CSV. Field order is the column order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Eq, Default)]
pub struct CardRecord {
    #[serde(rename = "Card name")]
    pub card_name: String,
    #[serde(rename = "Character")]
    pub character: String,
    #[serde(rename = "Rarity")]
    pub rarity: String,
    #[serde(rename = "Attribute")]
    pub attribute: String,
    #[serde(rename = "First Skill")]
    pub first_skill: String,
    #[serde(rename = "First Skill Icon")]
    pub first_skill_icon: String,
    #[serde(rename = "First Skill Display Name")]
    pub first_skill_display_name: String,
    #[serde(rename = "Icon URL")]
    pub icon_url: Option<String>,
    #[serde(rename = "Local Icon Path")]
    pub local_icon_path: Option<String>,
}

/// Column headers in output order.
pub const CSV_HEADERS: [&str; 9] = [
    "Card name",
    "Character",
    "Rarity",
    "Attribute",
    "First Skill",
    "First Skill Icon",
    "First Skill Display Name",
    "Icon URL",
    "Local Icon Path",
];
