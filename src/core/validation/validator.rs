//! Post-save validation against a freshly loaded record

use super::outcome::Observation;
use crate::core::field::WriteReceipt;
use crate::core::record::Record;
use crate::utils::error::Result;
use tracing::debug;

/// Sublist fields with this prefix are store-maintained and never compared
const SYSTEM_FIELD_PREFIX: &str = "sys_";

/// Texts of a sublist line, taken before a line is removed or after one is filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSnapshot {
    pub sublist_id: String,
    pub line: usize,
    pub field_ids: Vec<String>,
    pub texts: Vec<String>,
}

impl LineSnapshot {
    pub fn capture(record: &dyn Record, sublist_id: &str, line: usize) -> Result<Self> {
        let field_ids: Vec<String> = record
            .sublist_field_ids(sublist_id)?
            .into_iter()
            .filter(|field_id| !field_id.starts_with(SYSTEM_FIELD_PREFIX))
            .collect();
        let texts = field_ids
            .iter()
            .map(|field_id| {
                record
                    .sublist_text(sublist_id, field_id, line)
                    .map(|text| text.to_string())
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sublist_id: sublist_id.to_string(),
            line,
            field_ids,
            texts,
        })
    }

    /// Lines of `reload` carrying the snapshot's texts
    ///
    /// With `blank_matches_any`, fields that were blank in the snapshot match
    /// anything; store-computed values fill those in after save.
    pub fn find_in(&self, reload: &dyn Record, blank_matches_any: bool) -> Result<Vec<usize>> {
        let mut found = Vec::new();
        for line in 0..reload.line_count(&self.sublist_id)? {
            let mut matches = true;
            for (field_id, expected) in self.field_ids.iter().zip(&self.texts) {
                if blank_matches_any && expected.is_empty() {
                    continue;
                }
                let actual = reload.sublist_text(&self.sublist_id, field_id, line)?;
                if actual.to_string() != *expected {
                    matches = false;
                    break;
                }
            }
            if matches {
                found.push(line);
            }
        }
        Ok(found)
    }
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One deferred validation step of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// A field write to compare before/attempted/after
    Field(WriteReceipt),
    /// A line inserted (and filled in) at the snapshot's position
    Inserted(LineSnapshot),
    /// A line removed from the snapshot's position
    Removed(LineSnapshot),
    /// A step that already failed; reported as is
    Failed(String),
}

impl Check {
    pub fn validate(&self, reload: &dyn Record) -> Result<String> {
        match self {
            Check::Field(receipt) => {
                let after = receipt.read_back(reload)?;
                let observation = Observation::new(
                    receipt.field_id.as_str(),
                    receipt.before.as_str(),
                    receipt.attempted.as_str(),
                    after,
                );
                debug!(field_id = %receipt.field_id, outcome = ?observation.outcome, "Validated write");
                Ok(observation.to_string())
            }
            Check::Inserted(snapshot) => {
                let found = snapshot.find_in(reload, true)?;
                Ok(format!(
                    "Inserted at {} (found at {})",
                    snapshot.line,
                    join_lines(&found)
                ))
            }
            Check::Removed(snapshot) => {
                let found = snapshot.find_in(reload, false)?;
                let fields = snapshot.field_ids.join(", ");
                if found.is_empty() {
                    Ok(format!("Removed line {}: {}", snapshot.line, fields))
                } else {
                    Ok(format!(
                        "Removed line {} - but still found at {}: {}",
                        snapshot.line,
                        join_lines(&found),
                        fields
                    ))
                }
            }
            Check::Failed(message) => Ok(message.clone()),
        }
    }
}

/// Validate every check; a check that cannot be evaluated says so instead of failing the rest
pub fn validate_checks(checks: &[Check], reload: &dyn Record) -> Vec<String> {
    checks
        .iter()
        .map(|check| {
            check
                .validate(reload)
                .unwrap_or_else(|e| format!("Unable to validate: {}", e))
        })
        .collect()
}
