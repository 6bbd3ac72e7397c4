//! Client-side batch execution
//!
//! Operator task lists become a [`TaskQueue`]; a [`BatchRunner`] sends one
//! group at a time through a [`CommandTransport`] and records the results.

mod queue;
mod report;
mod runner;
mod types;


pub use queue::TaskQueue;
pub use report::{page, progress_line, render_table, to_csv};
pub use runner::{BatchRunner, CommandTransport, RunSummary, TransportReply};
pub use types::{BLANK_RESULT, ERROR_PREFIX, Task, TaskState, group_key};
