use chrono::{Local, NaiveDateTime};

use crate::category_store::CategoryStore;
use crate::config::StorageConfig;
use crate::task::{is_valid_color, parse_due, resolve_category, Task, DEFAULT_COLOR};
use crate::task_store::TaskStore;
use crate::view::{display_order, filter_by_category, TaskView};

/// Fields of the add-task form. Everything but the label may be left blank.
#[derive(Debug, Default, Clone)]
pub struct NewTask {
    pub task: String,
    pub due: Option<String>,
    pub color: Option<String>,
    pub category: Option<String>,
}

/// What the list page needs to render.
#[derive(Debug, Clone)]
pub struct ListView {
    pub tasks: Vec<TaskView>,
    pub categories: Vec<String>,
    pub filter: Option<String>,
}

/// All live application state. Handlers get a handle to one `Board` and
/// mutate only through its methods.
#[derive(Debug)]
pub struct Board {
    tasks: TaskStore,
    categories: CategoryStore,
}

impl Board {
    pub fn new(tasks: TaskStore, categories: CategoryStore) -> Self {
        Self { tasks, categories }
    }

    pub fn open(storage: &StorageConfig) -> Self {
        let board = Self::new(
            TaskStore::open(storage.tasks_path()),
            CategoryStore::open(storage.categories_path()),
        );
        tracing::info!(
            tasks = board.tasks.len(),
            categories = board.categories.categories().len(),
            data_dir = %storage.data_dir.display(),
            "board loaded"
        );
        board
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.tasks()
    }

    pub fn categories(&self) -> &[String] {
        self.categories.categories()
    }

    /// Sorts the stored sequence into display order, then projects and
    /// filters it. Indices in the result refer to the sorted, unfiltered
    /// sequence, so they stay valid until the next mutation.
    pub fn list(&mut self, filter: Option<&str>) -> ListView {
        self.list_at(filter, Local::now().naive_local())
    }

    pub fn list_at(&mut self, filter: Option<&str>, now: NaiveDateTime) -> ListView {
        self.tasks.sort_by(display_order);
        let views = self
            .tasks
            .tasks()
            .iter()
            .enumerate()
            .map(|(index, task)| TaskView::build(index, task, now))
            .collect();
        let filter = filter.filter(|f| !f.is_empty());
        ListView {
            tasks: filter_by_category(views, filter),
            categories: self.categories.categories().to_vec(),
            filter: filter.map(str::to_string),
        }
    }

    /// Returns `false` when the label is blank and nothing was added.
    pub fn add_task(&mut self, input: NewTask) -> bool {
        let label = input.task.trim();
        if label.is_empty() {
            return false;
        }

        let due = input
            .due
            .as_deref()
            .map(str::trim)
            .filter(|raw| parse_due(raw).is_some())
            .map(str::to_string);
        let color = input
            .color
            .as_deref()
            .map(str::trim)
            .filter(|c| is_valid_color(c))
            .unwrap_or(DEFAULT_COLOR)
            .to_string();
        let category = resolve_category(input.category.as_deref()).to_string();

        self.categories.add_if_absent(&category);

        let mut task = Task::new(label).with_color(color).with_category(category);
        task.due = due;
        tracing::info!(task = %task.task, due = ?task.due, category = ?task.category, "adding task");
        self.tasks.append(task);
        true
    }

    pub fn complete(&mut self, index: usize) -> bool {
        self.tasks.mark_done(index)
    }

    pub fn delete(&mut self, index: usize) -> bool {
        self.tasks.remove_at(index).is_some()
    }

    pub fn add_category(&mut self, name: &str) -> bool {
        self.categories.add_if_absent(name)
    }
}
