//! Arena-backed task forest
//!
//! The persistence format nests subtasks and next steps inside their parent.
//! Mutating that shape means rebuilding whole subtrees, so in memory the
//! forest is kept as an arena keyed by task id: each node stores its scalar
//! fields plus ordered child-id lists, and mutations are id lookups instead
//! of tree walks. [`TaskForest::to_tasks`] rebuilds the nested shape at the
//! storage boundary.

use std::collections::HashMap;

use chrono::Utc;

use super::model::{Task, TaskKind};
use super::stats::TaskStats;

/// Which child list of a parent a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildKind {
    Subtask,
    NextStep,
}

impl ChildKind {
    fn task_kind(self) -> TaskKind {
        match self {
            Self::Subtask => TaskKind::Subtask,
            Self::NextStep => TaskKind::NextStep,
        }
    }
}

#[derive(Debug, Clone)]
struct TaskNode {
    /// Scalar fields only; `subtasks` and `next_steps` are always empty here
    task: Task,
    parent: Option<String>,
    subtasks: Vec<String>,
    next_steps: Vec<String>,
}

/// Task forest indexed by id
#[derive(Debug, Clone, Default)]
pub struct TaskForest {
    nodes: HashMap<String, TaskNode>,
    roots: Vec<String>,
}

impl TaskForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a forest from the nested persistence shape.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut forest = Self::new();
        for task in tasks {
            let id = task.id.clone();
            forest.insert_node(task, None);
            forest.roots.push(id);
        }
        forest
    }

    fn insert_node(&mut self, mut task: Task, parent: Option<String>) {
        let id = task.id.clone();
        let subtasks = std::mem::take(&mut task.subtasks);
        let next_steps = std::mem::take(&mut task.next_steps);

        let node = TaskNode {
            subtasks: subtasks.iter().map(|t| t.id.clone()).collect(),
            next_steps: next_steps.iter().map(|t| t.id.clone()).collect(),
            parent,
            task,
        };
        self.nodes.insert(id.clone(), node);

        for child in subtasks.into_iter().chain(next_steps) {
            self.insert_node(child, Some(id.clone()));
        }
    }

    /// Rebuild the nested shape for persistence.
    pub fn to_tasks(&self) -> Vec<Task> {
        self.roots
            .iter()
            .filter_map(|id| self.build_subtree(id))
            .collect()
    }

    fn build_subtree(&self, id: &str) -> Option<Task> {
        let node = self.nodes.get(id)?;
        let mut task = node.task.clone();
        task.subtasks = node
            .subtasks
            .iter()
            .filter_map(|c| self.build_subtree(c))
            .collect();
        task.next_steps = node
            .next_steps
            .iter()
            .filter_map(|c| self.build_subtree(c))
            .collect();
        Some(task)
    }

    /// Number of tasks in the forest, nested tasks included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a task's scalar fields by id. Child lists on the returned
    /// task are empty; use [`to_tasks`](Self::to_tasks) for the full tree.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.nodes.get(id).map(|n| &n.task)
    }

    /// Add a top-level task.
    pub fn insert_root(&mut self, task: Task) {
        let id = task.id.clone();
        self.insert_node(task, None);
        self.roots.push(id);
    }

    /// Attach a task under `parent_id` in the given child list. Returns
    /// false if the parent does not exist. Touches the parent's updated
    /// timestamp.
    pub fn add_child(&mut self, parent_id: &str, kind: ChildKind, mut task: Task) -> bool {
        let Some(parent) = self.nodes.get_mut(parent_id) else {
            return false;
        };
        task.parent_id = Some(parent_id.to_string());
        task.kind = kind.task_kind();
        match kind {
            ChildKind::Subtask => parent.subtasks.push(task.id.clone()),
            ChildKind::NextStep => parent.next_steps.push(task.id.clone()),
        }
        parent.task.updated_at = Utc::now();
        self.insert_node(task, Some(parent_id.to_string()));
        true
    }

    /// Apply an edit to a task's scalar fields and bump its updated
    /// timestamp. Returns false if the id is unknown.
    pub fn update<F>(&mut self, id: &str, edit: F) -> bool
    where
        F: FnOnce(&mut Task),
    {
        match self.nodes.get_mut(id) {
            Some(node) => {
                edit(&mut node.task);
                node.task.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Remove a task and its entire subtree. Returns false if the id is
    /// unknown.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(node) = self.nodes.get(id) else {
            return false;
        };
        match node.parent.clone() {
            Some(parent_id) => {
                if let Some(parent) = self.nodes.get_mut(&parent_id) {
                    parent.subtasks.retain(|c| c != id);
                    parent.next_steps.retain(|c| c != id);
                }
            }
            None => self.roots.retain(|r| r != id),
        }
        self.remove_subtree(id);
        true
    }

    fn remove_subtree(&mut self, id: &str) {
        if let Some(node) = self.nodes.remove(id) {
            for child in node.subtasks.iter().chain(node.next_steps.iter()) {
                self.remove_subtree(child);
            }
        }
    }

    /// Aggregate statistics over the whole forest.
    pub fn stats(&self) -> TaskStats {
        let mut stats = TaskStats::default();
        for node in self.nodes.values() {
            stats.total += 1;
            if node.task.completed {
                stats.completed += 1;
            }
            stats.estimated_minutes += node.task.estimated_time.unwrap_or(0) as u64;
            stats.actual_minutes += node.task.actual_time.unwrap_or(0) as u64;
        }
        stats
    }
}
