//! Gateway commands
//!
//! Every command takes the raw task strings of one request and returns one
//! result string per task, in order. Failures of a single task are folded
//! into its result; only request-level problems surface as errors.

mod create;
mod details;
mod detect;
mod edit;
mod lookup;
mod maintenance;

pub use details::{
    ColumnDetails, FieldDetails, LineCell, RecordDetails, SublistDetails, record_details,
};

use crate::core::expr::{Assignment, Delimiter, column, normalize_key};
use crate::core::field::{FieldAddress, write_field};
use crate::core::record::{Record, RecordStore, RecordTypeTable};
use crate::core::validation::Check;
use crate::utils::error::{RecordOpsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};

/// Commands understood by `POST /commands/{command}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    LookupFields,
    Edit,
    Create,
    MassSave,
    MassDelete,
    RecordType,
}

impl Command {
    pub const ALL: [Command; 6] = [
        Command::LookupFields,
        Command::Edit,
        Command::Create,
        Command::MassSave,
        Command::MassDelete,
        Command::RecordType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::LookupFields => "lookup-fields",
            Command::Edit => "edit",
            Command::Create => "create",
            Command::MassSave => "mass-save",
            Command::MassDelete => "mass-delete",
            Command::RecordType => "record-type",
        }
    }

    /// Only edits of the same record are sent together
    pub fn groups_tasks(&self) -> bool {
        matches!(self, Command::Edit)
    }

    /// Column layout shown to operators
    pub fn task_format(&self) -> &'static str {
        match self {
            Command::LookupFields => "Record Type|Internal ID|Location|Field IDs",
            Command::Edit => "Record Type|Internal ID|Location|Field Values|Action",
            Command::Create => "Record Type|Default Values|Field Values",
            Command::MassSave | Command::MassDelete => "Record Type|Internal ID",
            Command::RecordType => "Record Type",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = RecordOpsError;

    fn from_str(s: &str) -> Result<Self> {
        Command::ALL
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| RecordOpsError::InvalidArgument(format!("Unknown command: {}", s)))
    }
}

/// Extra request parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandParams {
    /// Internal id probed by `record-type`
    #[serde(default)]
    pub record: Option<String>,
}

/// Shared collaborators of every command
#[derive(Clone)]
pub struct CommandContext {
    pub store: Arc<dyn RecordStore>,
    pub record_types: Arc<RecordTypeTable>,
}

impl fmt::Debug for CommandContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("record_types", &self.record_types.len())
            .finish_non_exhaustive()
    }
}

impl CommandContext {
    pub fn new(store: Arc<dyn RecordStore>, record_types: RecordTypeTable) -> Self {
        Self {
            store,
            record_types: Arc::new(record_types),
        }
    }

    /// Run `command` over `tasks`
    ///
    /// Blocking: record store calls are synchronous.
    pub fn execute(
        &self,
        command: Command,
        tasks: &[String],
        params: &CommandParams,
    ) -> Result<Vec<String>> {
        info!(command = %command, batch_size = tasks.len(), "Executing command");

        let results = match command {
            Command::LookupFields => self.per_task(tasks, |task| lookup::lookup_task(self, task)),
            Command::Edit => edit::edit_group(self, tasks),
            Command::Create => self.per_task(tasks, |task| create::create_task(self, task)),
            Command::MassSave => self.per_task(tasks, |task| maintenance::mass_save_task(self, task)),
            Command::MassDelete => {
                self.per_task(tasks, |task| maintenance::mass_delete_task(self, task))
            }
            Command::RecordType => {
                let record_id = params
                    .record
                    .as_deref()
                    .map(normalize_key)
                    .filter(|id| !id.is_empty())
                    .ok_or_else(|| {
                        RecordOpsError::InvalidArgument("Record ID not specified".to_string())
                    })?;
                self.per_task(tasks, |task| detect::detect_task(self, task, &record_id))
            }
        };

        debug!(command = %command, results = results.len(), "Command finished");
        Ok(results)
    }

    fn per_task<F>(&self, tasks: &[String], mut run: F) -> Vec<String>
    where
        F: FnMut(&str) -> Result<String>,
    {
        tasks
            .iter()
            .map(|task| run(task).unwrap_or_else(|e| e.to_task_result()))
            .collect()
    }
}

/// `(store type, internal id)` named by the first two columns of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordRef {
    pub record_type: String,
    pub id: String,
}

impl RecordRef {
    pub(crate) fn from_columns(context: &CommandContext, columns: &[String]) -> Self {
        Self {
            record_type: context.record_types.resolve(column(columns, 0)),
            id: normalize_key(column(columns, 1)),
        }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.record_type, self.id)
    }
}

pub(crate) fn columns(task: &str) -> Vec<String> {
    Delimiter::Bar.split(task)
}

/// Write each assignment at `address`; a failing assignment becomes a failed check
pub(crate) fn apply_assignments(
    record: &mut dyn Record,
    address: &FieldAddress,
    assignments: &[Assignment],
) -> Vec<Check> {
    assignments
        .iter()
        .map(
            |assignment| match write_field(record, address.clone(), assignment) {
                Ok(receipt) => Check::Field(receipt),
                Err(e) => Check::Failed(e.to_task_result()),
            },
        )
        .collect()
}
