//! Command transport that runs the gateway commands in-process

use actix_web::ResponseError;
use async_trait::async_trait;
use parking_lot::Mutex;
use recordops::Result;
use recordops::core::batch::{CommandTransport, TransportReply};
use recordops::core::commands::{Command, CommandContext, CommandParams};

/// Calls [`CommandContext::execute`] directly and records every request's size
pub struct LocalTransport {
    context: CommandContext,
    requests: Mutex<Vec<usize>>,
}

impl LocalTransport {
    pub fn new(context: CommandContext) -> Self {
        Self {
            context,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Task count of each request, in order
    pub fn requests(&self) -> Vec<usize> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl CommandTransport for LocalTransport {
    async fn send(
        &self,
        command: Command,
        params: &CommandParams,
        tasks: Vec<String>,
    ) -> Result<TransportReply> {
        self.requests.lock().push(tasks.len());

        Ok(match self.context.execute(command, &tasks, params) {
            Ok(results) => TransportReply::ok(serde_json::to_string(&results)?),
            Err(e) => TransportReply {
                status: e.status_code().as_u16(),
                body: e.to_task_result(),
            },
        })
    }
}

#[async_trait]
impl CommandTransport for &LocalTransport {
    async fn send(
        &self,
        command: Command,
        params: &CommandParams,
        tasks: Vec<String>,
    ) -> Result<TransportReply> {
        (**self).send(command, params, tasks).await
    }
}
