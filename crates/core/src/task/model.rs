//! Task model definitions
//!
//! Field names serialize in camelCase; timestamps serialize as RFC 3339
//! strings. This is the wire and file format for whole-collection storage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Urgent,
    High,
    Medium,
    Low,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl TaskPriority {
    /// Sort rank, highest priority first.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Position of a task in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    Main,
    Subtask,
    NextStep,
}

impl Default for TaskKind {
    fn default() -> Self {
        Self::Main
    }
}

/// A task, possibly carrying nested subtasks and next steps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Estimated time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    /// Actual time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<u32>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub subtasks: Vec<Task>,
    #[serde(default)]
    pub next_steps: Vec<Task>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: TaskKind,
}

impl Task {
    /// Create a new top-level task with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            estimated_time: None,
            actual_time: None,
            completed: false,
            priority: TaskPriority::default(),
            subtasks: Vec::new(),
            next_steps: Vec::new(),
            created_at: now,
            updated_at: now,
            parent_id: None,
            kind: TaskKind::Main,
        }
    }

    /// Create a child task attached to the given parent
    pub fn child(title: impl Into<String>, kind: TaskKind, parent_id: impl Into<String>) -> Self {
        let mut task = Self::new(title);
        task.kind = kind;
        task.parent_id = Some(parent_id.into());
        task
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the estimated time in minutes
    pub fn with_estimated_time(mut self, minutes: u32) -> Self {
        self.estimated_time = Some(minutes);
        self
    }

    /// Mark the task completed
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Sort a task tree in place: active tasks before completed ones, then by
/// priority (highest first), then by creation time (newest first). Recurses
/// into subtasks and next steps.
pub fn sort_by_priority(tasks: &mut [Task]) {
    for task in tasks.iter_mut() {
        sort_by_priority(&mut task.subtasks);
        sort_by_priority(&mut task.next_steps);
    }
    tasks.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_create_task() {
        let task = Task::new("Test task");
        assert_eq!(task.title, "Test task");
        assert!(!task.completed);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.kind, TaskKind::Main);
        assert!(task.subtasks.is_empty());
        assert!(task.next_steps.is_empty());
    }

    #[test]
    fn test_child_task_links_parent() {
        let parent = Task::new("Parent");
        let child = Task::child("Child", TaskKind::Subtask, &parent.id);
        assert_eq!(child.parent_id.as_deref(), Some(parent.id.as_str()));
        assert_eq!(child.kind, TaskKind::Subtask);
    }

    #[test]
    fn test_serde_field_names() {
        let task = Task::new("Wire format")
            .with_description("desc")
            .with_estimated_time(90);
        let value = serde_json::to_value(&task).unwrap();
        assert!(value.get("estimatedTime").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("nextSteps").is_some());
        assert_eq!(value.get("type").unwrap(), "main");
        // Absent optionals are omitted, matching the original JSON
        assert!(value.get("actualTime").is_none());
        assert!(value.get("parentId").is_none());
    }

    #[test]
    fn test_priority_wire_values() {
        assert_eq!(
            serde_json::to_value(TaskPriority::Urgent).unwrap(),
            "urgent"
        );
        assert_eq!(serde_json::to_value(TaskKind::NextStep).unwrap(), "nextStep");
    }

    #[test]
    fn test_deserialize_minimal_record() {
        // Records written by older clients may omit defaulted fields
        let task: Task = serde_json::from_str(
            r#"{
                "id": "1",
                "title": "Buy milk",
                "createdAt": "2025-01-01T00:00:00.000Z",
                "updatedAt": "2025-01-01T00:00:00.000Z"
            }"#,
        )
        .unwrap();
        assert_eq!(task.id, "1");
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.subtasks.is_empty());
    }

    #[test]
    fn test_nested_round_trip() {
        let mut root = Task::new("Root");
        let mut sub = Task::child("Sub", TaskKind::Subtask, &root.id);
        sub.subtasks
            .push(Task::child("Sub-sub", TaskKind::Subtask, &sub.id));
        root.subtasks.push(sub);
        root.next_steps
            .push(Task::child("Next", TaskKind::NextStep, &root.id));

        let json = serde_json::to_string(&root).unwrap();
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, root);
        assert_eq!(back.subtasks[0].subtasks[0].title, "Sub-sub");
    }

    #[test]
    fn test_sort_by_priority() {
        let at = |h| Utc.with_ymd_and_hms(2025, 1, 1, h, 0, 0).unwrap();
        let mut tasks = vec![
            {
                let mut t = Task::new("done urgent").with_priority(TaskPriority::Urgent);
                t.completed = true;
                t.created_at = at(1);
                t
            },
            {
                let mut t = Task::new("low");
                t.priority = TaskPriority::Low;
                t.created_at = at(2);
                t
            },
            {
                let mut t = Task::new("urgent old").with_priority(TaskPriority::Urgent);
                t.created_at = at(3);
                t
            },
            {
                let mut t = Task::new("urgent new").with_priority(TaskPriority::Urgent);
                t.created_at = at(4);
                t
            },
        ];
        sort_by_priority(&mut tasks);
        let titles: Vec<_> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["urgent new", "urgent old", "low", "done urgent"]);
    }
}
