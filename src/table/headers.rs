// src/table/headers.rs

use scraper::ElementRef;

use crate::html::{selector, stripped_text};

/// One way of reading column headers off a table. Returns an empty vec
/// when the table doesn't have headers in the place it looks.
pub trait HeaderStrategy {
    fn name(&self) -> &'static str;
    fn discover(&self, table: ElementRef<'_>) -> Vec<String>;
}

/// `<th>` cells under the table's `<thead>`.
pub struct HeaderSection;

/// `<th>` cells of the first row in `<tbody>`. MediaWiki tables land here.
pub struct BodyFirstRow;

/// `<th>` cells of the first row anywhere in the table.
pub struct FirstRow;

/// The standard strategies in priority order.
pub fn default_strategies() -> Vec<Box<dyn HeaderStrategy>> {
    vec![Box::new(HeaderSection), Box::new(BodyFirstRow), Box::new(FirstRow)]
}

impl HeaderStrategy for HeaderSection {
    fn name(&self) -> &'static str {
        "thead"
    }

    fn discover(&self, table: ElementRef<'_>) -> Vec<String> {
        let thead = selector("thead");
        match table.select(&thead).next() {
            Some(section) => th_texts(section),
            None => Vec::new(),
        }
    }
}

impl HeaderStrategy for BodyFirstRow {
    fn name(&self) -> &'static str {
        "tbody first row"
    }

    fn discover(&self, table: ElementRef<'_>) -> Vec<String> {
        let tbody = selector("tbody");
        let tr = selector("tr");
        table
            .select(&tbody)
            .next()
            .and_then(|body| body.select(&tr).next())
            .map(th_texts)
            .unwrap_or_default()
    }
}

impl HeaderStrategy for FirstRow {
    fn name(&self) -> &'static str {
        "first row"
    }

    fn discover(&self, table: ElementRef<'_>) -> Vec<String> {
        let tr = selector("tr");
        table.select(&tr).next().map(th_texts).unwrap_or_default()
    }
}

fn th_texts(scope: ElementRef<'_>) -> Vec<String> {
    let th = selector("th");
    scope.select(&th).map(stripped_text).collect()
}
