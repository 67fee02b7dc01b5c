use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Upper bound on the page count a listing may report.
pub const MAX_PAGES: u32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub page: u32,

    #[serde(default)]
    pub pages: u32,

    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Paging {
    /// Page numbers still to fetch after the page this paging block came from.
    ///
    /// Slack numbers pages from 1 but answers `page=0` with page 1, so the
    /// remaining pages start right after whatever page the server reports.
    pub fn remaining_pages(&self) -> Result<Vec<u32>, Error> {
        if self.pages > MAX_PAGES {
            return Err(Error::MalformedPaging(format!(
                "{} pages reported, at most {MAX_PAGES} supported",
                self.pages
            )));
        }
        let remaining = self.pages.saturating_sub(1);
        if self.page.checked_add(remaining).is_none() {
            return Err(Error::MalformedPaging(format!(
                "page {} with {} pages overflows the page number",
                self.page, self.pages
            )));
        }
        Ok((1..=remaining).map(|offset| self.page + offset).collect())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub files: Vec<T>,

    pub paging: Paging,
}
