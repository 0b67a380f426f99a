//! Display projection of stored tasks: countdown text, resolved color and
//! category, ordering and category filtering.

use std::cmp::Ordering;

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::task::Task;

/// Category filter value that shows every task.
pub const ALL_CATEGORIES: &str = "All";

/// Stand-in due date for undated tasks so they sort after dated ones.
const UNDATED_SENTINEL: NaiveDateTime = NaiveDateTime::MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub text: String,
    pub overdue: bool,
}

impl DueStatus {
    fn none() -> Self {
        Self {
            text: String::new(),
            overdue: false,
        }
    }
}

/// A task as the list page shows it. `index` is the task's position in the
/// stored sequence and is what complete/delete links refer to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub index: usize,
    pub task: String,
    pub done: bool,
    pub due: Option<String>,
    pub color: String,
    pub category: String,
    pub due_text: String,
    pub overdue: bool,
}

impl TaskView {
    pub fn build(index: usize, task: &Task, now: NaiveDateTime) -> Self {
        let status = due_status(task, now);
        Self {
            index,
            task: task.task.clone(),
            done: task.done,
            due: task.due.clone(),
            color: task.resolved_color().to_string(),
            category: task.resolved_category().to_string(),
            due_text: status.text,
            overdue: status.overdue,
        }
    }
}

pub fn due_status(task: &Task, now: NaiveDateTime) -> DueStatus {
    let Some(due) = task.due_at() else {
        return DueStatus::none();
    };
    let diff = due - now;
    let overdue = diff < TimeDelta::zero();
    let prefix = if overdue { "overdue by" } else { "due in" };
    DueStatus {
        text: format!("{prefix} {}", compact_duration(diff.abs())),
        overdue,
    }
}

/// `1d 2h 5m` style rendering, truncated to whole minutes. Zero-valued days
/// and hours are left out; minutes always appear when nothing else does.
pub fn compact_duration(span: TimeDelta) -> String {
    let total_minutes = span.num_minutes().abs();
    let days = total_minutes / (24 * 60);
    let hours = (total_minutes / 60) % 24;
    let minutes = total_minutes % 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(format!("{minutes}m"));
    }
    parts.join(" ")
}

/// Open before done, dated before undated, earlier due first.
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// A due value that does not parse counts as no due date at all.
fn sort_key(task: &Task) -> (bool, bool, NaiveDateTime) {
    let due = task.due_at();
    (task.done, due.is_none(), due.unwrap_or(UNDATED_SENTINEL))
}

/// `None` and `"All"` keep everything; anything else is an exact,
/// case-sensitive match on the resolved category.
pub fn filter_by_category(views: Vec<TaskView>, category: Option<&str>) -> Vec<TaskView> {
    match category {
        None | Some(ALL_CATEGORIES) => views,
        Some(wanted) => views.into_iter().filter(|v| v.category == wanted).collect(),
    }
}
