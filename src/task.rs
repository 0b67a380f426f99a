use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#6c757d";
pub const DEFAULT_CATEGORY: &str = "General";

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})$").expect("hex color pattern is valid")
});

/// Accepted layouts for the `due` field, as sent by a `datetime-local` input.
const DUE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// One stored to-do item.
///
/// `color` and `category` stay `None` when a record was written without them;
/// display code resolves defaults without rewriting what is stored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub task: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub due: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Task {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            done: false,
            due: None,
            color: None,
            category: None,
        }
    }

    pub fn with_due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn resolved_color(&self) -> &str {
        resolve_color(self.color.as_deref())
    }

    pub fn resolved_category(&self) -> &str {
        resolve_category(self.category.as_deref())
    }

    pub fn due_at(&self) -> Option<NaiveDateTime> {
        self.due.as_deref().and_then(parse_due)
    }
}

pub fn is_valid_color(color: &str) -> bool {
    HEX_COLOR.is_match(color)
}

pub fn resolve_color(color: Option<&str>) -> &str {
    match color {
        Some(c) if is_valid_color(c) => c,
        _ => DEFAULT_COLOR,
    }
}

pub fn resolve_category(category: Option<&str>) -> &str {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => c,
        _ => DEFAULT_CATEGORY,
    }
}

pub fn parse_due(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    DUE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}
