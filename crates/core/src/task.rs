//! Task model - the unit of work the planner reasons about.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::error::ValidationError;
use crate::id::TaskId;

/// A work item with a free-text description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    #[serde(default)]
    pub id: TaskId,

    /// Free-text description, only ever matched heuristically
    #[serde(default)]
    pub content: String,

    /// Current status (informational)
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Create a pending, medium-priority task.
    pub fn new(id: impl Into<TaskId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Lower-cased content used by every heuristic.
    pub fn normalized_content(&self) -> String {
        self.content.to_lowercase()
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority
    Low,
    /// Medium priority
    #[default]
    Medium,
    /// High priority
    High,
}

impl Priority {
    /// Whether this is the high priority.
    pub fn is_high(self) -> bool {
        self == Priority::High
    }

    /// Time multiplier: `high_multiplier` for high priority, 1.0 otherwise.
    pub fn multiplier(self, high_multiplier: f64) -> f64 {
        if self.is_high() {
            high_multiplier
        } else {
            1.0
        }
    }
}

/// Task status. Does not affect analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Completed,
}

/// Validated, immutable task list indexed by id.
///
/// Every later stage takes the arena by reference and refers to tasks by
/// position, so membership sets are plain index vectors.
#[derive(Debug, Clone)]
pub struct TaskArena {
    tasks: Vec<Task>,
    index: HashMap<TaskId, usize>,
}

impl TaskArena {
    /// Validate the tasks and build the arena.
    ///
    /// Fails closed: any malformed task rejects the whole list.
    pub fn new(tasks: Vec<Task>) -> Result<Self, ValidationError> {
        if tasks.is_empty() {
            return Err(ValidationError::EmptyTaskList);
        }

        let mut index = HashMap::with_capacity(tasks.len());
        for (position, task) in tasks.iter().enumerate() {
            if task.id.is_blank() {
                return Err(ValidationError::MissingId { position });
            }
            if task.content.trim().is_empty() {
                return Err(ValidationError::EmptyContent { id: task.id.clone() });
            }
            if index.insert(task.id.clone(), position).is_some() {
                return Err(ValidationError::DuplicateId { id: task.id.clone() });
            }
        }

        Ok(Self { tasks, index })
    }

    /// Position of a task id in input order.
    pub fn index_of(&self, id: &TaskId) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Task at a position.
    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Task by id.
    pub fn by_id(&self, id: &TaskId) -> Option<&Task> {
        self.index_of(id).and_then(|i| self.get(i))
    }

    /// Tasks in input order.
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Tasks as a slice.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Always false for a constructed arena.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Ids of the tasks at the given positions, in the given order.
    pub fn ids_of(&self, indices: &[usize]) -> Vec<TaskId> {
        indices
            .iter()
            .filter_map(|&i| self.get(i))
            .map(|t| t.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserialize_full() {
        let json = r#"{"id":"1","content":"write tests","status":"in_progress","priority":"high"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, TaskId::from("1"));
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_task_deserialize_defaults() {
        let task: Task = serde_json::from_str(r#"{"content":"x"}"#).unwrap();
        assert!(task.id.is_blank());
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_missing_content_rejected_by_validation() {
        let task: Task = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert!(task.content.is_empty());
        assert_eq!(
            TaskArena::new(vec![task]).unwrap_err(),
            ValidationError::EmptyContent { id: "a".into() }
        );
    }

    #[test]
    fn test_priority_multiplier() {
        assert_eq!(Priority::High.multiplier(1.5), 1.5);
        assert_eq!(Priority::Medium.multiplier(1.5), 1.0);
        assert_eq!(Priority::Low.multiplier(1.5), 1.0);
    }

    #[test]
    fn test_arena_rejects_empty_list() {
        assert_eq!(TaskArena::new(vec![]).unwrap_err(), ValidationError::EmptyTaskList);
    }

    #[test]
    fn test_arena_rejects_missing_id() {
        let tasks = vec![Task::new("a", "one"), Task::new("", "two")];
        assert_eq!(
            TaskArena::new(tasks).unwrap_err(),
            ValidationError::MissingId { position: 1 }
        );
    }

    #[test]
    fn test_arena_rejects_blank_content() {
        let err = TaskArena::new(vec![Task::new("a", "   ")]).unwrap_err();
        assert_eq!(err, ValidationError::EmptyContent { id: "a".into() });
    }

    #[test]
    fn test_arena_rejects_duplicate_id() {
        let tasks = vec![Task::new("a", "one"), Task::new("a", "two")];
        assert_eq!(
            TaskArena::new(tasks).unwrap_err(),
            ValidationError::DuplicateId { id: "a".into() }
        );
    }

    #[test]
    fn test_arena_lookup() {
        let arena = TaskArena::new(vec![Task::new("a", "one"), Task::new("b", "two")]).unwrap();
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.index_of(&"b".into()), Some(1));
        assert_eq!(arena.by_id(&"a".into()).unwrap().content, "one");
        assert_eq!(arena.ids_of(&[1, 0]), vec![TaskId::from("b"), TaskId::from("a")]);
        assert!(arena.index_of(&"zz".into()).is_none());
    }
}
