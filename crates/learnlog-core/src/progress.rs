//! Per-module task lists and completion progress.
//!
//! Each skill module persists its tasks under a `{module}-tasks` slot; the
//! store treats those keys like any other. Progress is derived on read,
//! nothing is cached.

use serde::{Deserialize, Serialize};

use crate::storage::{Slot, Store};

/// One learning task inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(id: &str, title: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
        }
    }
}

/// Task list for one module, persisted through the store.
pub struct ModuleProgress {
    tasks: Slot<Vec<Task>>,
    module: String,
}

impl ModuleProgress {
    /// Bind to `module`'s task list, seeding it with `initial` on first use.
    pub fn new(store: &Store, module: &str, initial: Vec<Task>) -> Self {
        Self {
            tasks: store.slot(&format!("{module}-tasks"), initial),
            module: module.to_string(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.get()
    }

    /// Flip the completed state of the task with `task_id`. Returns false
    /// when no such task exists.
    pub fn toggle(&self, task_id: &str) -> bool {
        let mut found = false;
        self.tasks.update(|mut tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == task_id) {
                task.completed = !task.completed;
                found = true;
            }
            tasks
        });
        found
    }

    pub fn completed_count(&self) -> usize {
        self.tasks().iter().filter(|t| t.completed).count()
    }

    /// Rounded completion percentage; an empty module reports 0.
    pub fn percent_complete(&self) -> u32 {
        let tasks = self.tasks();
        if tasks.is_empty() {
            return 0;
        }
        let done = tasks.iter().filter(|t| t.completed).count();
        ((done as f64 / tasks.len() as f64) * 100.0).round() as u32
    }

    /// Clear the persisted list; the next read re-seeds the initial tasks.
    pub fn reset(&self) {
        self.tasks.clear();
    }
}

/// Seed tasks for the JavaScript module shown on the dashboard.
pub fn default_coding_tasks() -> Vec<Task> {
    vec![
        Task {
            completed: true,
            ..Task::new(
                "arrow-functions",
                "Master Arrow Functions",
                "Learn modern ES6 arrow function syntax and use cases",
            )
        },
        Task {
            completed: true,
            ..Task::new(
                "async-await",
                "Async/Await Patterns",
                "Handle promises with async/await for cleaner code",
            )
        },
        Task::new(
            "react-hooks",
            "React Hooks Practice",
            "Implement useState, useEffect, and custom hooks",
        ),
        Task::new(
            "api-integration",
            "API Integration",
            "Fetch data from REST APIs and handle responses",
        ),
        Task::new(
            "responsive-design",
            "Responsive CSS Layout",
            "Create mobile-first responsive designs with CSS Grid",
        ),
    ]
}
