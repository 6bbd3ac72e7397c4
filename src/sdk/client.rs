//! reqwest client for `POST <endpoint>/commands/<command>`

use crate::config::RunnerConfig;
use crate::core::batch::{CommandTransport, TransportReply};
use crate::core::commands::{Command, CommandParams, RecordDetails};
use crate::utils::error::{RecordOpsError, Result};
use crate::utils::generate_request_id;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Client for one command gateway
#[derive(Debug, Clone)]
pub struct CommandClient {
    endpoint: Url,
    http_client: reqwest::Client,
}

impl CommandClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            RecordOpsError::config(format!("Invalid endpoint '{}': {}", endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(RecordOpsError::config(format!(
                "Endpoint cannot carry a path: {}",
                endpoint
            )));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecordOpsError::config(format!("Failed to create HTTP client: {}", e)))?;

        info!(endpoint = %endpoint, "CommandClient created");
        Ok(Self {
            endpoint,
            http_client,
        })
    }

    pub fn from_config(config: &RunnerConfig) -> Result<Self> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `endpoint` with `segments` appended to its path
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| {
                RecordOpsError::config(format!("Endpoint cannot carry a path: {}", self.endpoint))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of a command endpoint
    pub fn command_url(&self, command: Command) -> Result<Url> {
        self.url(&["commands", command.as_str()])
    }

    /// Fetch the full field and sublist dump of a record
    pub async fn record_details(&self, record_type: &str, id: &str) -> Result<RecordDetails> {
        let url = self.url(&["records", record_type, id])?;
        let response = self.http_client.get(url).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RecordOpsError::RemoteTransport(format!(
                "{}: {}",
                status.as_u16(),
                body
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CommandTransport for CommandClient {
    async fn send(
        &self,
        command: Command,
        params: &CommandParams,
        tasks: Vec<String>,
    ) -> Result<TransportReply> {
        let url = self.command_url(command)?;
        let request_id = generate_request_id();
        debug!(url = %url, request_id = %request_id, batch_size = tasks.len(), "Posting command");

        let mut request = self
            .http_client
            .post(url)
            .header("x-request-id", &request_id)
            .json(&tasks);
        if let Some(record) = &params.record {
            request = request.query(&[("record", record)]);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportReply { status, body })
    }
}
