// src/table/mod.rs

use scraper::{ElementRef, Html};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

use crate::{error::ScrapeError, html::selector};

pub mod headers;

pub use headers::{default_strategies, BodyFirstRow, FirstRow, HeaderSection, HeaderStrategy};

pub const NAME: &str = "Name";
pub const RARITY: &str = "Rarity";
pub const ATTRIBUTE: &str = "Attribute";
pub const MAX_INFLUENCE: &str = "Max Influence";
pub const MAX_DEFENSE: &str = "Max Defense";
pub const MAX_SKILLS: &str = "Max Skill(s)";

/// Headers a table must carry to be the cards table.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    NAME,
    RARITY,
    ATTRIBUTE,
    MAX_INFLUENCE,
    MAX_DEFENSE,
    MAX_SKILLS,
];

const DUMP_LIMIT: usize = 500;

/// Required column name → position within the located table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: HashMap<String, usize>,
}

impl TableSchema {
    /// Resolve every required name against `headers`. A duplicated header
    /// keeps its last position.
    pub fn from_headers(headers: &[String], required: &[&str]) -> Result<Self, ScrapeError> {
        let positions: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.as_str(), i))
            .collect();

        let mut columns = HashMap::with_capacity(required.len());
        for &name in required {
            let idx = positions
                .get(name)
                .ok_or_else(|| ScrapeError::MissingColumn(name.to_string()))?;
            columns.insert(name.to_string(), *idx);
        }
        Ok(Self { columns })
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fewest `<td>` cells a data row needs: at least one per required
    /// column, and enough to reach the rightmost one.
    pub fn min_cells(&self) -> usize {
        let rightmost = self.columns.values().max().map_or(0, |i| i + 1);
        rightmost.max(self.columns.len())
    }
}

/// The cards table plus what we learned about it.
#[derive(Debug)]
pub struct LocatedTable<'a> {
    pub element: ElementRef<'a>,
    /// Position among all `<table>` elements in the document.
    pub position: usize,
    pub headers: Vec<String>,
    pub schema: TableSchema,
}

/// Scans tables in document order and picks the first whose headers cover
/// the required set. Strategies run in order; the first non-empty result
/// wins for a given table.
pub struct TableLocator {
    strategies: Vec<Box<dyn HeaderStrategy>>,
}

impl Default for TableLocator {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
        }
    }
}

impl TableLocator {
    pub fn new(strategies: Vec<Box<dyn HeaderStrategy>>) -> Self {
        Self { strategies }
    }

    /// Append a lower-priority strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn HeaderStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn discover_headers(&self, table: ElementRef<'_>) -> Vec<String> {
        for strategy in &self.strategies {
            let headers = strategy.discover(table);
            if !headers.is_empty() {
                debug!(strategy = strategy.name(), count = headers.len(), "headers found");
                return headers;
            }
        }
        Vec::new()
    }

    #[instrument(level = "info", skip_all, fields(required = required.len()))]
    pub fn locate<'a>(
        &self,
        doc: &'a Html,
        required: &[&str],
    ) -> Result<LocatedTable<'a>, ScrapeError> {
        let table_sel = selector("table");
        let wanted: HashSet<&str> = required.iter().copied().collect();

        for (position, table) in doc.select(&table_sel).enumerate() {
            let headers = self.discover_headers(table);
            if headers.is_empty() {
                continue;
            }
            let found: HashSet<&str> = headers.iter().map(String::as_str).collect();
            if wanted.is_subset(&found) {
                let schema = TableSchema::from_headers(&headers, required)?;
                info!(position, ?headers, "found cards table");
                return Ok(LocatedTable {
                    element: table,
                    position,
                    headers,
                    schema,
                });
            }
            debug!(position, ?headers, "table does not match");
        }

        let tables: Vec<String> = doc.select(&table_sel).map(dump_table).collect();
        warn!(count = tables.len(), "no matching table found");
        for (i, dump) in tables.iter().enumerate() {
            warn!(table = i, "{}", dump);
        }
        Err(ScrapeError::SchemaNotFound { tables })
    }
}

/// First few hundred characters of a table's markup, for diagnosing
/// upstream layout changes.
pub fn dump_table(table: ElementRef<'_>) -> String {
    let html = table.html();
    if html.chars().count() > DUMP_LIMIT {
        let head: String = html.chars().take(DUMP_LIMIT).collect();
        format!("{}...", head)
    } else {
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::stripped_text;

    const FULL_HEADER: &str = "<tr><th>Name</th><th>Rarity</th><th>Attribute</th>\
        <th>Max Influence</th><th>Max Defense</th><th>Max Skill(s)</th></tr>";

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn picks_first_matching_table() {
        let html = format!(
            "<table><tr><th>Foo</th></tr></table>\
             <table>{h}<tr><td>1</td></tr></table>\
             <table>{h}</table>",
            h = FULL_HEADER
        );
        let doc = Html::parse_document(&html);
        let located = TableLocator::default().locate(&doc, &REQUIRED_COLUMNS).unwrap();
        assert_eq!(located.position, 1);
        assert_eq!(located.schema.index(NAME), Some(0));
        assert_eq!(located.schema.index(MAX_SKILLS), Some(5));
    }

    #[test]
    fn table_missing_one_header_is_never_selected() {
        let html = "<table><tr><th>Name</th><th>Rarity</th><th>Attribute</th>\
            <th>Max Influence</th><th>Max Defense</th></tr></table>";
        let doc = Html::parse_document(html);
        let err = TableLocator::default().locate(&doc, &REQUIRED_COLUMNS).unwrap_err();
        match err {
            ScrapeError::SchemaNotFound { tables } => {
                assert_eq!(tables.len(), 1);
                assert!(tables[0].starts_with("<table>"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn extra_columns_and_order_do_not_matter() {
        let html = "<table><thead><tr><th>Max Skill(s)</th><th>Icon</th><th>Name</th>\
            <th>Max Defense</th><th>Rarity</th><th>Max Influence</th><th>Attribute</th>\
            </tr></thead></table>";
        let doc = Html::parse_document(html);
        let located = TableLocator::default().locate(&doc, &REQUIRED_COLUMNS).unwrap();
        assert_eq!(located.schema.index(MAX_SKILLS), Some(0));
        assert_eq!(located.schema.index(NAME), Some(2));
        assert_eq!(located.schema.min_cells(), 7);
    }

    #[test]
    fn dump_is_truncated() {
        let cells = "<tr><td>xxxxxxxxxx</td></tr>".repeat(100);
        let html = format!("<table>{}</table>", cells);
        let doc = Html::parse_document(&html);
        let err = TableLocator::default().locate(&doc, &REQUIRED_COLUMNS).unwrap_err();
        let ScrapeError::SchemaNotFound { tables } = err else {
            panic!("expected SchemaNotFound");
        };
        assert_eq!(tables[0].chars().count(), DUMP_LIMIT + 3);
        assert!(tables[0].ends_with("..."));
    }

    #[test]
    fn schema_keeps_last_duplicate_and_reports_missing() {
        let hs = headers(&["Name", "Rarity", "Name"]);
        let schema = TableSchema::from_headers(&hs, &["Name", "Rarity"]).unwrap();
        assert_eq!(schema.index("Name"), Some(2));
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.min_cells(), 3);

        let err = TableSchema::from_headers(&hs, &["Attribute"]).unwrap_err();
        assert!(matches!(err, ScrapeError::MissingColumn(c) if c == "Attribute"));
    }

    struct CaptionStrategy;

    impl HeaderStrategy for CaptionStrategy {
        fn name(&self) -> &'static str {
            "caption"
        }

        fn discover(&self, table: ElementRef<'_>) -> Vec<String> {
            table
                .select(&selector("caption"))
                .next()
                .map(|c| stripped_text(c).split(',').map(str::to_string).collect())
                .unwrap_or_default()
        }
    }

    #[test]
    fn appended_strategy_is_consulted_last() {
        let html = "<table><caption>Name,Rarity</caption><tr><td>x</td></tr></table>";
        let doc = Html::parse_document(html);
        let plain = TableLocator::default();
        assert!(plain.locate(&doc, &[NAME, RARITY]).is_err());

        let extended = TableLocator::default().with_strategy(Box::new(CaptionStrategy));
        let located = extended.locate(&doc, &[NAME, RARITY]).unwrap();
        assert_eq!(located.headers, vec!["Name", "Rarity"]);
    }
}
