//! Classification of a write after reload

use serde::Serialize;
use std::fmt;

/// What a reload says about one requested write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Nothing requested, nothing changed
    NoOp,
    /// Nothing requested, yet the value differs after reload
    UnexpectedDrift,
    /// Change requested, old value still there
    WriteFailed,
    /// Change requested and observed
    WriteConfirmed,
    /// Change requested, a third value came back
    WriteAnomaly,
}

/// Classify by exact string equality
pub fn classify(before: &str, attempted: &str, after: &str) -> Outcome {
    if before == attempted {
        if before == after {
            Outcome::NoOp
        } else {
            Outcome::UnexpectedDrift
        }
    } else if before == after {
        Outcome::WriteFailed
    } else if attempted == after {
        Outcome::WriteConfirmed
    } else {
        Outcome::WriteAnomaly
    }
}

/// A classified write together with the values it was decided on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Observation {
    pub field_id: String,
    pub before: String,
    pub attempted: String,
    pub after: String,
    pub outcome: Outcome,
}

impl Observation {
    pub fn new(
        field_id: impl Into<String>,
        before: impl Into<String>,
        attempted: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        let (before, attempted, after) = (before.into(), attempted.into(), after.into());
        Self {
            outcome: classify(&before, &attempted, &after),
            field_id: field_id.into(),
            before,
            attempted,
            after,
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Observation {
            field_id,
            before,
            attempted,
            after,
            outcome,
        } = self;
        match outcome {
            Outcome::NoOp => write!(f, "Did not change {}, already set to '{}'", field_id, before),
            Outcome::UnexpectedDrift => write!(
                f,
                "Unexpected change {}, was already '{}' but now '{}'",
                field_id, before, after
            ),
            Outcome::WriteFailed => write!(f, "Unable to change {}, still '{}'", field_id, before),
            Outcome::WriteConfirmed => {
                write!(f, "Changed {} from '{}' to '{}'", field_id, before, after)
            }
            Outcome::WriteAnomaly => write!(
                f,
                "Unexpected {} change, tried '{}' but got '{}'",
                field_id, attempted, after
            ),
        }
    }
}
