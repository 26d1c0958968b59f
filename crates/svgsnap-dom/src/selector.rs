//! CSS selectors for `select` / `querySelector`.
//!
//! Parsing and matching are delegated to `scraper` (Servo's `selectors` engine). A selector is
//! parsed once and can be reused across queries.

use crate::{Error, Result};
use scraper::ElementRef;

#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    inner: scraper::Selector,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self> {
        let inner = scraper::Selector::parse(input).map_err(|err| Error::InvalidSelector {
            selector: input.to_string(),
            message: err.to_string(),
        })?;
        Ok(Self {
            source: input.to_string(),
            inner,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub(crate) fn matches(&self, element: &ElementRef<'_>) -> bool {
        self.inner.matches(element)
    }
}
