// src/fetch/memory.rs

use anyhow::{anyhow, Result};
use std::{cell::RefCell, collections::HashMap};
use url::Url;

use super::Fetch;

/// Serves canned bodies keyed by exact URL and records every request.
/// Unknown URLs fail the way a 404 would.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    bodies: HashMap<String, Vec<u8>>,
    requests: RefCell<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    fn lookup(&self, url: &Url) -> Result<&Vec<u8>> {
        self.requests.borrow_mut().push(url.to_string());
        self.bodies
            .get(url.as_str())
            .ok_or_else(|| anyhow!("no body registered for {}", url))
    }
}

impl Fetch for MemoryFetcher {
    fn get_text(&self, url: &Url) -> Result<String> {
        let body = self.lookup(url)?;
        Ok(String::from_utf8_lossy(body).into_owned())
    }

    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        self.lookup(url).cloned()
    }
}
