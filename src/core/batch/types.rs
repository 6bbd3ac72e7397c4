//! Task model of the client-side batch runner

use crate::core::expr::{Delimiter, column};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").unwrap());

/// Prefix the gateway uses for failed task results
pub const ERROR_PREFIX: &str = "Error";

/// Shown instead of an empty result
pub const BLANK_RESULT: &str = "(blank)";

/// Lifecycle of a task; no transition leaves `Completed` or `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskState {
    pub fn is_started(&self) -> bool {
        !matches!(self, TaskState::Pending)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskState::Pending => "pending",
            TaskState::Running => "running",
            TaskState::Completed => "completed",
            TaskState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// One line of operator input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    /// 1-based position in the submitted list
    pub number: usize,
    pub text: String,
    /// Tasks sharing a group are sent in one request
    pub group: Option<String>,
    pub state: TaskState,
    /// Result or error text once finished
    pub message: String,
}

impl Task {
    pub fn new(number: usize, text: impl Into<String>, group: Option<String>) -> Self {
        Self {
            number,
            text: text.into(),
            group,
            state: TaskState::Pending,
            message: String::new(),
        }
    }

    /// Record a result returned by the gateway
    pub fn finish(&mut self, result: impl Into<String>) {
        let result = result.into();
        if result.is_empty() {
            self.state = TaskState::Completed;
            self.message = BLANK_RESULT.to_string();
        } else {
            self.state = if result.starts_with(ERROR_PREFIX) {
                TaskState::Failed
            } else {
                TaskState::Completed
            };
            self.message = result;
        }
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = TaskState::Failed;
        self.message = message.into();
    }

    /// Text for the status column
    pub fn status(&self) -> &str {
        match self.state {
            TaskState::Pending => "",
            TaskState::Running => "Running",
            TaskState::Completed | TaskState::Failed => &self.message,
        }
    }

    /// Name of the request this task went out in, for placeholder messages
    pub fn group_label(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.text)
    }
}

/// `type|id` with non-word characters removed and lowercased
pub fn group_key(task: &str) -> String {
    let columns = Delimiter::Bar.split(task);
    (0..2)
        .map(|index| {
            NON_WORD
                .replace_all(column(&columns, index), "")
                .to_lowercase()
        })
        .collect::<Vec<_>>()
        .join("|")
}
