//! Location paths: `""`, `sublistId` or `sublistId/lineQuery`

use super::assignment::normalize_key;
use super::codec::Delimiter;
use crate::utils::error::{RecordOpsError, Result};

/// Field ids that ask for a sublist's line count instead of a field
pub const LINE_COUNT_FIELDS: [&str; 2] = ["count", "linecount"];

/// Whether `field_id` is a line-count pseudo field
pub fn is_line_count_field(field_id: &str) -> bool {
    LINE_COUNT_FIELDS.contains(&field_id)
}

/// A parsed location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Path {
    /// Body field of the record
    Body,
    /// A whole sublist; only meaningful for line-count lookups
    Sublist(String),
    /// One line of a sublist, selected by a line query
    Line { sublist_id: String, query: String },
}

impl Path {
    /// Parse a location column
    ///
    /// The sublist id is normalized like a field id; the line query is kept
    /// verbatim for the resolver.
    pub fn parse(location: &str) -> Result<Self> {
        let segments = Delimiter::Slash.split(location);
        match segments.as_slice() {
            [] => Ok(Path::Body),
            [sublist_id] => Ok(Path::Sublist(normalize_key(sublist_id))),
            [sublist_id, query] => Ok(Path::Line {
                sublist_id: normalize_key(sublist_id),
                query: query.clone(),
            }),
            _ => Err(RecordOpsError::UnsupportedPath(format!("{:?}", segments))),
        }
    }

    pub fn sublist_id(&self) -> Option<&str> {
        match self {
            Path::Body => None,
            Path::Sublist(sublist_id) | Path::Line { sublist_id, .. } => Some(sublist_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_location_is_body() {
        assert_eq!(Path::parse("").unwrap(), Path::Body);
    }

    #[test]
    fn test_one_and_two_segments() {
        assert_eq!(
            Path::parse("Item").unwrap(),
            Path::Sublist("item".to_string())
        );
        assert_eq!(
            Path::parse("item/amount=100&-1").unwrap(),
            Path::Line {
                sublist_id: "item".to_string(),
                query: "amount=100&-1".to_string(),
            }
        );
    }

    #[test]
    fn test_escaped_slash_stays_in_query() {
        let path = Path::parse(r"item/description=a\/b").unwrap();
        assert_eq!(
            path,
            Path::Line {
                sublist_id: "item".to_string(),
                query: "description=a/b".to_string(),
            }
        );
    }

    #[test]
    fn test_three_segments_unsupported() {
        assert!(matches!(
            Path::parse("item/0/inventorydetail"),
            Err(RecordOpsError::UnsupportedPath(_))
        ));
    }

    #[test]
    fn test_line_count_fields() {
        assert!(is_line_count_field("count"));
        assert!(is_line_count_field("linecount"));
        assert!(!is_line_count_field("amount"));
    }
}
