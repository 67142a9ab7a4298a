use crate::model::task::Task;
use serde::Serialize;

/// Derived list counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub done: usize,
    pub left: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let done = tasks.iter().filter(|task| task.is_done).count();
        Self {
            total: tasks.len(),
            done,
            left: tasks.len() - done,
        }
    }
}

/// Point-in-time copy of the task collection, ordered by due date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
}

impl Snapshot {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
