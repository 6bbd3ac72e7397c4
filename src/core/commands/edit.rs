//! `edit`: `Type|Id|Location|FieldValues|Action`
//!
//! All tasks of a request address one record. It is loaded once, every task
//! is applied to the same instance, the record is saved once and reloaded
//! once to validate every task.

use super::{CommandContext, RecordRef, apply_assignments, columns};
use crate::core::expr::{Assignment, Path, column, parse_assignment_list};
use crate::core::field::FieldAddress;
use crate::core::lines::resolve_single_line;
use crate::core::record::Record;
use crate::core::validation::{Check, LineSnapshot, validate_checks};
use crate::utils::error::{RecordOpsError, Result};
use std::str::FromStr;
use tracing::{info, warn};

const IGNORE_RECALC: &str = "ignorerecalc";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Set,
    Insert,
    Remove,
}

impl FromStr for Action {
    type Err = RecordOpsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "set" => Ok(Action::Set),
            "insert" => Ok(Action::Insert),
            "remove" => Ok(Action::Remove),
            _ => Err(RecordOpsError::UnsupportedAction(s.to_string())),
        }
    }
}

/// What a task left to report after it was applied
enum Applied {
    Message(String),
    Checks(Vec<Check>),
}

pub(super) fn edit_group(context: &CommandContext, tasks: &[String]) -> Vec<String> {
    let Some(first) = tasks.first() else {
        return Vec::new();
    };
    let key = RecordRef::from_columns(context, &columns(first));

    let mut record = match context.store.load(&key.record_type, &key.id) {
        Ok(record) => record,
        Err(e) => return vec![e.to_task_result(); tasks.len()],
    };

    let applied: Vec<Applied> = tasks
        .iter()
        .map(
            |task| match apply_task(context, &key, record.as_mut(), task) {
                Ok(applied) => applied,
                Err(e) => Applied::Message(e.to_task_result()),
            },
        )
        .collect();

    if let Err(e) = record.save() {
        warn!(record = %key, error = %e, "Save failed");
        return report(applied, |_| vec![e.to_task_result()]);
    }

    let reload = match context.store.load(&key.record_type, &key.id) {
        Ok(reload) => reload,
        Err(e) => return report(applied, |_| vec![format!("Unable to validate: {}", e)]),
    };

    info!(record = %key, tasks = tasks.len(), "Edited record");
    report(applied, |checks| validate_checks(checks, reload.as_ref()))
}

fn report<F>(applied: Vec<Applied>, mut validate: F) -> Vec<String>
where
    F: FnMut(&[Check]) -> Vec<String>,
{
    applied
        .into_iter()
        .map(|applied| match applied {
            Applied::Message(message) => message,
            Applied::Checks(checks) => validate(&checks).join(" | "),
        })
        .collect()
}

fn apply_task(
    context: &CommandContext,
    key: &RecordRef,
    record: &mut dyn Record,
    task: &str,
) -> Result<Applied> {
    let columns = columns(task);
    let task_ref = RecordRef::from_columns(context, &columns);
    if task_ref != *key {
        return Err(RecordOpsError::InvalidArgument(format!(
            "Task addresses {} but the group loaded {}",
            task_ref, key
        )));
    }

    let location = column(&columns, 2);
    let action = column(&columns, 4);
    if action.is_empty() {
        return Ok(Applied::Message("Please specify Action".to_string()));
    }

    let assignments = parse_assignment_list(column(&columns, 3))?;
    let action: Action = action.parse()?;

    let checks = match Path::parse(location)? {
        Path::Body if action == Action::Set => {
            apply_assignments(record, &FieldAddress::Body, &assignments)
        }
        Path::Body => {
            return Err(RecordOpsError::UnsupportedAction(format!(
                "{} on record body",
                column(&columns, 4)
            )));
        }
        Path::Sublist(_) => {
            return Err(RecordOpsError::UnsupportedPath(format!(
                "{} needs a line query",
                location
            )));
        }
        Path::Line { sublist_id, query } => {
            if !record.has_sublist(&sublist_id) {
                return Err(RecordOpsError::SublistNotFound(sublist_id));
            }
            let line = resolve_single_line(record, &sublist_id, &query)?;
            match action {
                Action::Set => {
                    apply_assignments(record, &FieldAddress::line(&sublist_id, line), &assignments)
                }
                Action::Insert => insert_line(record, &sublist_id, line, assignments)?,
                Action::Remove => remove_line(record, &sublist_id, line, assignments)?,
            }
        }
    };

    Ok(Applied::Checks(checks))
}

/// Split off the `ignoreRecalc=true|false` pseudo assignment
fn take_ignore_recalc(assignments: Vec<Assignment>) -> Result<(bool, Vec<Assignment>)> {
    let (flags, rest): (Vec<_>, Vec<_>) = assignments
        .into_iter()
        .partition(|assignment| assignment.field_id == IGNORE_RECALC);

    let ignore_recalc = match flags.first() {
        None => false,
        Some(flag) => {
            let text = flag.text.to_string().to_lowercase();
            match text.as_str() {
                "true" => true,
                "false" => false,
                _ => {
                    return Err(RecordOpsError::InvalidArgument(format!(
                        "Only true/false allowed for ignoreRecalc: {}",
                        text
                    )));
                }
            }
        }
    };
    Ok((ignore_recalc, rest))
}

fn insert_line(
    record: &mut dyn Record,
    sublist_id: &str,
    line: usize,
    assignments: Vec<Assignment>,
) -> Result<Vec<Check>> {
    let (ignore_recalc, assignments) = take_ignore_recalc(assignments)?;
    record.insert_line(sublist_id, line, ignore_recalc)?;

    // Field outcomes are covered by the line check; only failures are kept
    let mut checks: Vec<Check> =
        apply_assignments(record, &FieldAddress::line(sublist_id, line), &assignments)
            .into_iter()
            .filter(|check| matches!(check, Check::Failed(_)))
            .collect();
    checks.push(Check::Inserted(LineSnapshot::capture(record, sublist_id, line)?));
    Ok(checks)
}

fn remove_line(
    record: &mut dyn Record,
    sublist_id: &str,
    line: usize,
    assignments: Vec<Assignment>,
) -> Result<Vec<Check>> {
    let (ignore_recalc, _) = take_ignore_recalc(assignments)?;
    let snapshot = LineSnapshot::capture(record, sublist_id, line)?;
    record.remove_line(sublist_id, line, ignore_recalc)?;
    Ok(vec![Check::Removed(snapshot)])
}
