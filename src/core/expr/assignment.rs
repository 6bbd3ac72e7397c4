//! `fieldId=text` assignments and their multi-value grouping

use super::codec::Delimiter;
use crate::utils::error::{RecordOpsError, Result};
use std::fmt;

/// Lowercase and strip everything outside `[A-Za-z0-9_-]`
pub fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Text side of an assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignedText {
    /// One value
    Single(String),
    /// Repeated field id; order is the order of appearance
    Multi(Vec<String>),
}

impl AssignedText {
    /// View as a list, wrapping a single value
    pub fn as_list(&self) -> Vec<String> {
        match self {
            AssignedText::Single(text) => vec![text.clone()],
            AssignedText::Multi(texts) => texts.clone(),
        }
    }

    pub fn is_multi(&self) -> bool {
        matches!(self, AssignedText::Multi(_))
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            AssignedText::Single(text) => Some(text),
            AssignedText::Multi(_) => None,
        }
    }
}

impl fmt::Display for AssignedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssignedText::Single(text) => f.write_str(text),
            AssignedText::Multi(texts) => f.write_str(&texts.join(",")),
        }
    }
}

/// One `fieldId=text` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub field_id: String,
    pub text: AssignedText,
}

impl Assignment {
    pub fn single(field_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            text: AssignedText::Single(text.into()),
        }
    }
}

/// Parse one token; the id is normalized, the text after the first `=` is kept verbatim
pub fn parse_assignment(token: &str) -> Result<Assignment> {
    let (field_id, text) = split_token(token)?;
    Ok(Assignment::single(field_id, text))
}

fn split_token(token: &str) -> Result<(String, String)> {
    let (field_id, text) = token
        .split_once('=')
        .ok_or_else(|| RecordOpsError::MalformedAssignment(token.to_string()))?;
    Ok((normalize_key(field_id), text.to_string()))
}

/// Parse an `&`-joined list, folding repeated field ids into one multi-value assignment
pub fn parse_assignment_list(text: &str) -> Result<Vec<Assignment>> {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();

    for token in Delimiter::Ampersand.split(text) {
        let (field_id, value) = split_token(&token)?;
        match grouped.iter_mut().find(|(id, _)| *id == field_id) {
            Some((_, values)) => values.push(value),
            None => grouped.push((field_id, vec![value])),
        }
    }

    Ok(grouped
        .into_iter()
        .map(|(field_id, mut values)| {
            let text = if values.len() == 1 {
                AssignedText::Single(values.remove(0))
            } else {
                AssignedText::Multi(values)
            };
            Assignment { field_id, text }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(" First Name!"), "firstname");
        assert_eq!(normalize_key("custbody_X-1"), "custbody_x-1");
    }

    #[test]
    fn test_parse_assignment_splits_at_first_equals() {
        let assignment = parse_assignment("Memo=a=b").unwrap();
        assert_eq!(assignment.field_id, "memo");
        assert_eq!(assignment.text, AssignedText::Single("a=b".to_string()));
    }

    #[test]
    fn test_parse_assignment_keeps_text_verbatim() {
        let assignment = parse_assignment("companyname=  ACME, Inc. ").unwrap();
        assert_eq!(assignment.text.as_single(), Some("  ACME, Inc. "));
    }

    #[test]
    fn test_missing_equals_is_malformed() {
        assert!(matches!(
            parse_assignment("firstname"),
            Err(RecordOpsError::MalformedAssignment(_))
        ));
    }

    #[test]
    fn test_repeated_ids_group_in_order() {
        let list = parse_assignment_list("a=1&a=2&b=3").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].field_id, "a");
        assert_eq!(
            list[0].text,
            AssignedText::Multi(vec!["1".to_string(), "2".to_string()])
        );
        assert_eq!(list[1], Assignment::single("b", "3"));
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_assignment_list("").unwrap().is_empty());
    }

    #[test]
    fn test_list_error_propagates() {
        assert!(parse_assignment_list("a=1&oops").is_err());
    }

    #[test]
    fn test_escaped_ampersand_stays_in_text() {
        let list = parse_assignment_list(r"department=R\&D").unwrap();
        assert_eq!(list, vec![Assignment::single("department", "R&D")]);
    }

    #[test]
    fn test_display_joins_multi() {
        let text = AssignedText::Multi(vec!["Red".to_string(), "Blue".to_string()]);
        assert_eq!(text.to_string(), "Red,Blue");
        assert_eq!(text.as_list().len(), 2);
    }
}
