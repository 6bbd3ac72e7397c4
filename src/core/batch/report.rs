//! Progress line, paged status table and CSV export

use super::queue::TaskQueue;
use super::types::Task;
use crate::utils::error::{RecordOpsError, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// `Progress: <started> of <total>`
pub fn progress_line(queue: &TaskQueue) -> String {
    format!("Progress: {} of {}", queue.started(), queue.len())
}

/// Tasks from 1-based `start`, at most `count` of them
pub fn page(queue: &TaskQueue, start: usize, count: usize) -> &[Task] {
    let tasks = queue.tasks();
    let from = start.saturating_sub(1).min(tasks.len());
    let to = from.saturating_add(count).min(tasks.len());
    &tasks[from..to]
}

/// Plain-text status table
pub fn render_table(tasks: &[Task]) -> String {
    let mut out = format!("{:>6}  {:<9}  {}\n", "Number", "State", "Task | Result");
    for task in tasks {
        out.push_str(&format!(
            "{:>6}  {:<9}  {} | {}\n",
            task.number,
            task.state.to_string(),
            task.text,
            task.status()
        ));
    }
    out
}

/// `Number,Task,Result` header, then one CRLF-terminated row per task
///
/// Text columns are always quoted with `"` doubled; the number is bare.
pub fn to_csv(queue: &TaskQueue) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::NonNumeric)
        .terminator(Terminator::CRLF)
        .from_writer(b"Number,Task,Result\r\n".to_vec());

    for task in queue.tasks() {
        writer.write_record([task.number.to_string().as_str(), task.text.as_str(), task.status()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| RecordOpsError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
