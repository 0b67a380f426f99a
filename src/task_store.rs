use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::persist::{self, LoadOutcome};
use crate::task::Task;

/// The ordered task sequence plus the file it is mirrored to.
///
/// Tasks are addressed by position. Every successful mutation rewrites the
/// whole file.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tasks = Self::load(&path).or_default();
        tracing::debug!(path = %path.display(), count = tasks.len(), "loaded tasks");
        Self { path, tasks }
    }

    pub fn load(path: &Path) -> LoadOutcome<Vec<Task>> {
        persist::read_json(path)
    }

    pub fn save(&self) -> Result<()> {
        persist::write_json(&self.path, &self.tasks)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn append(&mut self, task: Task) {
        self.tasks.push(task);
        self.save_or_log();
    }

    /// Returns `false` without touching anything when `index` is out of range.
    pub fn mark_done(&mut self, index: usize) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            tracing::debug!(index, len = self.tasks.len(), "complete ignored, index out of range");
            return false;
        };
        task.done = true;
        self.save_or_log();
        true
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Task> {
        if index >= self.tasks.len() {
            tracing::debug!(index, len = self.tasks.len(), "delete ignored, index out of range");
            return None;
        }
        let removed = self.tasks.remove(index);
        self.save_or_log();
        Some(removed)
    }

    /// Stable in-memory reorder. Not persisted until the next mutation.
    pub fn sort_by<F>(&mut self, compare: F)
    where
        F: FnMut(&Task, &Task) -> Ordering,
    {
        self.tasks.sort_by(compare);
    }

    fn save_or_log(&self) {
        if let Err(err) = self.save() {
            tracing::error!(path = %self.path.display(), error = %err, "failed to save tasks");
        }
    }
}
