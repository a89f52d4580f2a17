//! Task statistics and time formatting

use serde::Serialize;

use super::model::Task;

/// Aggregate counters over a task tree, nested tasks included
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: u64,
    pub completed: u64,
    pub estimated_minutes: u64,
    pub actual_minutes: u64,
}

impl TaskStats {
    /// Collect statistics over a nested task list.
    pub fn collect(tasks: &[Task]) -> Self {
        let mut stats = Self::default();
        stats.visit(tasks);
        stats
    }

    fn visit(&mut self, tasks: &[Task]) {
        for task in tasks {
            self.total += 1;
            if task.completed {
                self.completed += 1;
            }
            self.estimated_minutes += task.estimated_time.unwrap_or(0) as u64;
            self.actual_minutes += task.actual_time.unwrap_or(0) as u64;
            self.visit(&task.subtasks);
            self.visit(&task.next_steps);
        }
    }
}

/// Render a minute count as "45m", "2h" or "1h 30m".
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    match (hours, mins) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::TaskKind;

    #[test]
    fn test_collect_over_nested_tree() {
        let mut root = Task::new("Root").with_estimated_time(30);
        let mut sub = Task::child("Sub", TaskKind::Subtask, &root.id).with_estimated_time(15);
        sub.completed = true;
        sub.actual_time = Some(20);
        root.subtasks.push(sub);
        root.next_steps
            .push(Task::child("Next", TaskKind::NextStep, &root.id));

        let stats = TaskStats::collect(&[root]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.estimated_minutes, 45);
        assert_eq!(stats.actual_minutes, 20);
    }

    #[test]
    fn test_collect_empty() {
        assert_eq!(TaskStats::collect(&[]), TaskStats::default());
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(90), "1h 30m");
    }
}
