//! Strictly sequential execution of a task queue against the gateway

use super::queue::TaskQueue;
use super::types::TaskState;
use crate::core::commands::{Command, CommandParams};
use crate::utils::error::Result;
use crate::utils::truncate_string;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Raw HTTP outcome of one command request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

impl TransportReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Network seam of the runner
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandTransport: Send + Sync {
    /// POST `tasks` to the command endpoint
    async fn send(
        &self,
        command: Command,
        params: &CommandParams,
        tasks: Vec<String>,
    ) -> Result<TransportReply>;
}

/// Totals after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub requests: usize,
}

/// Sends one group at a time and records each task's result
pub struct BatchRunner<T: CommandTransport> {
    transport: T,
    command: Command,
    params: CommandParams,
}

impl<T: CommandTransport> BatchRunner<T> {
    pub fn new(transport: T, command: Command) -> Self {
        Self {
            transport,
            command,
            params: CommandParams::default(),
        }
    }

    pub fn with_params(mut self, params: CommandParams) -> Self {
        self.params = params;
        self
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// Send the next group; `false` once nothing is pending
    pub async fn run_next(&self, queue: &mut TaskQueue) -> bool {
        let Some(batch) = queue.next_batch() else {
            return false;
        };
        queue.mark_running(&batch);

        let tasks: Vec<String> = batch
            .iter()
            .filter_map(|&index| queue.tasks().get(index).map(|task| task.text.clone()))
            .collect();
        debug!(command = %self.command, batch_size = tasks.len(), "Sending batch");

        let reply = self.transport.send(self.command, &self.params, tasks).await;
        apply_reply(queue, &batch, reply);
        true
    }

    /// Run until every task has finished, calling `observer` after each request
    pub async fn run<F>(&self, queue: &mut TaskQueue, mut observer: F) -> RunSummary
    where
        F: FnMut(&TaskQueue),
    {
        info!(command = %self.command, tasks = queue.len(), "Starting batch run");

        let mut requests = 0;
        while self.run_next(queue).await {
            requests += 1;
            observer(queue);
        }

        let summary = RunSummary {
            total: queue.len(),
            completed: queue.count(TaskState::Completed),
            failed: queue.count(TaskState::Failed),
            requests,
        };
        info!(
            completed = summary.completed,
            failed = summary.failed,
            requests = summary.requests,
            "Batch run finished"
        );
        summary
    }
}

/// Turn a response body into per-task results; anything but a JSON array is unparsable
fn parse_results(body: &str) -> Option<Vec<String>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(body).ok()?;
    Some(
        values
            .into_iter()
            .map(|value| match value {
                serde_json::Value::String(text) => text,
                serde_json::Value::Null => String::new(),
                other => other.to_string(),
            })
            .collect(),
    )
}

/// Settle every task of `batch`; the first task carries the failure detail
fn settle_failed(queue: &mut TaskQueue, batch: &[usize], first: String, rest_prefix: &str) {
    let label = batch
        .first()
        .and_then(|&index| queue.tasks().get(index))
        .map(|task| task.group_label().to_string())
        .unwrap_or_default();

    for (position, &index) in batch.iter().enumerate() {
        if let Some(task) = queue.task_mut(index) {
            if position == 0 {
                task.fail(first.clone());
            } else {
                task.fail(format!("{}: {}", rest_prefix, label));
            }
        }
    }
}

fn apply_reply(queue: &mut TaskQueue, batch: &[usize], reply: Result<TransportReply>) {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "Command request failed");
            return settle_failed(queue, batch, e.to_task_result(), "Error for");
        }
    };

    if reply.status != 200 {
        warn!(
            status = reply.status,
            body = %truncate_string(&reply.body, 200),
            "Command endpoint returned an error status"
        );
        return settle_failed(
            queue,
            batch,
            format!("Error {}: {}", reply.status, reply.body),
            "Error for",
        );
    }

    let Some(results) = parse_results(&reply.body) else {
        warn!(
            body = %truncate_string(&reply.body, 200),
            "Command endpoint returned an unparsable body"
        );
        return settle_failed(queue, batch, reply.body, "Error as part of");
    };

    let mut results = results.into_iter();
    for &index in batch {
        let result = results.next();
        if let Some(task) = queue.task_mut(index) {
            match result {
                Some(result) => task.finish(result),
                None => task.fail("Error: no result returned"),
            }
        }
    }
}
