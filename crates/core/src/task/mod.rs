//! Task management
//!
//! Tasks form a recursively nested tree: every task owns ordered lists of
//! subtasks and next steps. The nested shape is the persistence format; for
//! in-memory mutation see [`forest::TaskForest`].

pub mod forest;
pub mod model;
pub mod stats;

pub use forest::{ChildKind, TaskForest};
pub use model::{sort_by_priority, Task, TaskKind, TaskPriority};
pub use stats::{format_minutes, TaskStats};
