//! Three-column status board.

use crate::sort::sort_tasks;
use deskmate_protocol::{TaskRecord, TaskStatus};

/// Tasks grouped by status, each column in schedule order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusBoard {
    pub todo: Vec<TaskRecord>,
    pub in_progress: Vec<TaskRecord>,
    pub done: Vec<TaskRecord>,
}

impl StatusBoard {
    pub fn from_tasks(tasks: &[TaskRecord]) -> Self {
        let mut board = Self::default();
        for task in sort_tasks(tasks) {
            match task.status {
                TaskStatus::Todo => board.todo.push(task),
                TaskStatus::InProgress => board.in_progress.push(task),
                TaskStatus::Done => board.done.push(task),
            }
        }
        board
    }

    pub fn column(&self, status: TaskStatus) -> &[TaskRecord] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::StatusBoard;
    use crate::parser::parse_task;
    use deskmate_protocol::TaskStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn groups_by_status_in_schedule_order() {
        let mut tasks = vec![
            parse_task("later 5pm"),
            parse_task("sooner 8am"),
            parse_task("whenever"),
            parse_task("noon call 12pm"),
        ];
        tasks[3].status = TaskStatus::Done;
        tasks[2].status = TaskStatus::InProgress;

        let board = StatusBoard::from_tasks(&tasks);
        let todo: Vec<_> = board.todo.iter().map(|task| task.title.as_str()).collect();
        assert_eq!(todo, vec!["sooner", "later"]);
        assert_eq!(board.column(TaskStatus::InProgress)[0].title, "whenever");
        assert_eq!(board.column(TaskStatus::Done)[0].title, "noon call");
        assert_eq!(board.len(), 4);
    }

    #[test]
    fn empty_board() {
        assert!(StatusBoard::from_tasks(&[]).is_empty());
    }
}
