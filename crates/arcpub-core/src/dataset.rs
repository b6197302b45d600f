use crate::error::{ArcPubError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::OnceLock;

static DISALLOWED_RE: OnceLock<Regex> = OnceLock::new();

fn disallowed_re() -> &'static Regex {
    DISALLOWED_RE.get_or_init(|| Regex::new(r"[^\w.+ -]").unwrap())
}

/// One entry of the input dataset. Extra fields in the JSON objects are
/// ignored; only the display name is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetItem {
    pub name: String,
}

impl DatasetItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Repository-safe form of the display name: every character outside
    /// `[word chars, '.', '+', ' ', '-']` becomes a space, then whitespace
    /// runs collapse so the result is usable as a project name.
    pub fn sanitized_name(&self) -> String {
        let replaced = disallowed_re().replace_all(&self.name, " ");
        replaced.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Lowercase hyphenated form, used for local directory names.
    pub fn slug(&self) -> String {
        self.sanitized_name()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}

/// Load a dataset from a JSON array, keeping at most `take` items.
pub fn load(path: &Path, take: Option<usize>) -> Result<Vec<DatasetItem>> {
    let data = std::fs::read_to_string(path)?;
    let mut items: Vec<DatasetItem> = serde_json::from_str(&data)?;
    if items.is_empty() {
        return Err(ArcPubError::DatasetEmpty);
    }
    if let Some(n) = take {
        items.truncate(n);
    }
    Ok(items)
}
