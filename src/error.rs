// src/error.rs

use thiserror::Error;

/// Failures of the table-finding stage that callers may want to match on.
/// Everything else travels as `anyhow::Error` with context attached.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// No table in the page carried every required header.
    /// `tables` holds a truncated HTML dump of each table seen.
    #[error("could not find the cards table ({} tables inspected)", .tables.len())]
    SchemaNotFound { tables: Vec<String> },

    #[error("required column {0:?} missing from table headers")]
    MissingColumn(String),
}
