use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::persist::{self, LoadOutcome};
use crate::task::DEFAULT_CATEGORY;

/// Category names, distinct ignoring case, always including `General`.
#[derive(Debug)]
pub struct CategoryStore {
    path: PathBuf,
    categories: Vec<String>,
}

impl CategoryStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let categories = match Self::load(&path) {
            LoadOutcome::Loaded(list) => list,
            LoadOutcome::Absent | LoadOutcome::Corrupt(_) => vec![DEFAULT_CATEGORY.to_string()],
        };
        Self { path, categories }
    }

    /// Reads the file, trimming, dropping blanks and case-insensitive
    /// duplicates, and prepending `General` when it is missing.
    pub fn load(path: &Path) -> LoadOutcome<Vec<String>> {
        match persist::read_json::<Vec<String>>(path) {
            LoadOutcome::Loaded(raw) => LoadOutcome::Loaded(normalize(raw)),
            LoadOutcome::Absent => LoadOutcome::Absent,
            LoadOutcome::Corrupt(reason) => LoadOutcome::Corrupt(reason),
        }
    }

    pub fn save(&self) -> Result<()> {
        persist::write_json(&self.path, &self.categories)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn contains(&self, name: &str) -> bool {
        let needle = name.trim().to_lowercase();
        self.categories.iter().any(|c| c.to_lowercase() == needle)
    }

    /// Appends the trimmed name unless it is blank or already present in any
    /// casing. Returns whether the list changed.
    pub fn add_if_absent(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.categories.push(name.to_string());
        if let Err(err) = self.save() {
            tracing::error!(path = %self.path.display(), error = %err, "failed to save categories");
        }
        tracing::info!(category = name, "added category");
        true
    }
}

fn normalize(raw: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(raw.len() + 1);
    let mut out = Vec::with_capacity(raw.len() + 1);
    for name in raw {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(name.to_string());
    }
    if !seen.iter().any(|k| *k == DEFAULT_CATEGORY.to_lowercase()) {
        out.insert(0, DEFAULT_CATEGORY.to_string());
    }
    out
}
