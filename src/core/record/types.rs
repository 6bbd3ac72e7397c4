//! Field values and metadata shared by every record store

use serde::{Deserialize, Serialize};
use std::fmt;

/// A field's text or raw value
///
/// Multi-valued fields hold a list; everything else is a scalar or empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Empty,
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    /// Build from assignment texts, as a list for multi-valued targets
    pub fn from_list(values: Vec<String>, multi: bool) -> Self {
        if multi {
            FieldValue::List(values)
        } else {
            values
                .into_iter()
                .next()
                .map(FieldValue::Scalar)
                .unwrap_or_default()
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Scalar(value) => value.is_empty(),
            FieldValue::List(values) => values.is_empty(),
        }
    }

    /// Element view used for equality checks; empty scalars have no elements
    pub fn as_list(&self) -> Vec<String> {
        match self {
            FieldValue::Empty => Vec::new(),
            FieldValue::Scalar(value) if value.is_empty() => Vec::new(),
            FieldValue::Scalar(value) => vec![value.clone()],
            FieldValue::List(values) => values.clone(),
        }
    }

    /// Convert a loosely typed document value (fixtures, JSON payloads)
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => FieldValue::Empty,
            Value::String(text) => FieldValue::Scalar(text.clone()),
            Value::Array(items) => {
                FieldValue::List(items.iter().map(|item| Self::from_json(item).to_string()).collect())
            }
            other => FieldValue::Scalar(other.to_string()),
        }
    }
}

/// Renders the way the record store's text form is compared: lists comma-joined
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Scalar(value) => f.write_str(value),
            FieldValue::List(values) => f.write_str(&values.join(",")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Scalar(value.to_string())
    }
}

/// How a field is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text, numbers, dates; text and value coincide
    #[default]
    #[serde(alias = "text")]
    Plain,
    /// One option out of a list
    Select,
    /// Any number of options
    MultiSelect,
}

impl FieldKind {
    pub fn is_selector(self) -> bool {
        matches!(self, FieldKind::Select | FieldKind::MultiSelect)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Plain => "plain",
            FieldKind::Select => "select",
            FieldKind::MultiSelect => "multiselect",
        };
        f.write_str(name)
    }
}

/// Option of a select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub text: String,
}

/// Field metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FieldInfo {
    pub fn plain(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: FieldKind::Plain,
            options: Vec::new(),
        }
    }

    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        multi: bool,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: if multi {
                FieldKind::MultiSelect
            } else {
                FieldKind::Select
            },
            options,
        }
    }

    pub fn option_text(&self, id: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.id == id)
            .map(|option| option.text.as_str())
    }

    pub fn option_id(&self, text: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|option| option.text == text)
            .map(|option| option.id.as_str())
    }
}
