//! Ordered task list and the selection of the next request

use super::types::{Task, TaskState, group_key};
use crate::core::commands::Command;
use serde::Serialize;

/// All tasks of one run, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskQueue {
    tasks: Vec<Task>,
}

impl TaskQueue {
    /// One task per non-blank line; grouped when `command` groups tasks
    pub fn from_lines(command: Command, input: &str) -> Self {
        let tasks = input
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(index, line)| {
                let group = command.groups_tasks().then(|| group_key(line));
                Task::new(index + 1, line, group)
            })
            .collect();
        Self { tasks }
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

    pub fn task_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    /// Indices for the next request: the first pending task and its pending group mates
    pub fn next_batch(&self) -> Option<Vec<usize>> {
        let first = self
            .tasks
            .iter()
            .position(|task| task.state == TaskState::Pending)?;

        match &self.tasks[first].group {
            None => Some(vec![first]),
            Some(group) => Some(
                self.tasks
                    .iter()
                    .enumerate()
                    .skip(first)
                    .filter(|(_, task)| {
                        task.state == TaskState::Pending && task.group.as_ref() == Some(group)
                    })
                    .map(|(index, _)| index)
                    .collect(),
            ),
        }
    }

    pub fn mark_running(&mut self, indices: &[usize]) {
        for &index in indices {
            if let Some(task) = self.tasks.get_mut(index) {
                task.state = TaskState::Running;
            }
        }
    }

    /// Tasks that have left `Pending`
    pub fn started(&self) -> usize {
        self.tasks.iter().filter(|task| task.state.is_started()).count()
    }

    pub fn count(&self, state: TaskState) -> usize {
        self.tasks.iter().filter(|task| task.state == state).count()
    }

    pub fn is_done(&self) -> bool {
        self.tasks.iter().all(|task| task.state.is_finished())
    }
}
