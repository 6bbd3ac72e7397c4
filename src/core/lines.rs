//! Sublist line resolution
//!
//! A line query is a chain of `&`-joined filters applied left to right to the
//! candidate lines `0..line_count`:
//!
//! * `n` picks candidate `n` and stops (an empty filter counts as `0`),
//! * `-k` picks the k-th candidate from the end and stops,
//! * `-0` picks the position after the last candidate (an insertion point),
//! * `fieldId=text` keeps the candidates whose field text equals `text`.

use crate::core::expr::{Delimiter, parse_assignment};
use crate::core::record::Record;
use crate::utils::error::{RecordOpsError, Result};

/// Integer filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineIndex {
    Absolute(usize),
    FromEnd(usize),
    Append,
}

impl LineIndex {
    /// `None` when the filter is not an integer; `Some(Err(_))` when it is one
    /// that no line could ever have
    fn parse(filter: &str) -> Option<Result<Self>> {
        let trimmed = filter.trim();
        if trimmed.is_empty() {
            return Some(Ok(LineIndex::Absolute(0)));
        }
        let magnitude = trimmed.strip_prefix(['-', '+']).unwrap_or(trimmed);
        if magnitude.is_empty() || !magnitude.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let Ok(value) = magnitude.parse::<usize>() else {
            return Some(Err(RecordOpsError::LineOutOfRange {
                index: trimmed.to_string(),
                count: 0,
            }));
        };

        Some(Ok(match (trimmed.starts_with('-'), value) {
            (true, 0) => LineIndex::Append,
            (true, k) => LineIndex::FromEnd(k),
            (false, n) => LineIndex::Absolute(n),
        }))
    }

    fn select(self, filter: &str, candidates: &[usize], line_count: usize) -> Result<usize> {
        let out_of_range = || RecordOpsError::LineOutOfRange {
            index: filter.trim().to_string(),
            count: candidates.len(),
        };

        match self {
            LineIndex::Absolute(n) => candidates.get(n).copied().ok_or_else(out_of_range),
            LineIndex::FromEnd(k) if k <= candidates.len() => Ok(candidates[candidates.len() - k]),
            LineIndex::FromEnd(_) => Err(out_of_range()),
            LineIndex::Append => Ok(candidates.last().map_or(line_count, |last| last + 1)),
        }
    }
}

/// All lines of `sublist_id` matching `query`
///
/// An empty query addresses line 0. Once a field filter empties the
/// candidate set the result is empty, whatever follows.
pub fn resolve_lines(record: &dyn Record, sublist_id: &str, query: &str) -> Result<Vec<usize>> {
    let line_count = record.line_count(sublist_id)?;
    let mut candidates: Vec<usize> = (0..line_count).collect();
    let mut filtered = false;

    let mut filters = Delimiter::Ampersand.split(query);
    if filters.is_empty() {
        filters.push(String::new());
    }

    for filter in filters {
        if let Some(index) = LineIndex::parse(&filter) {
            let index = index?;
            if candidates.is_empty() && (filtered || index != LineIndex::Append) {
                return Ok(Vec::new());
            }
            return index
                .select(&filter, &candidates, line_count)
                .map(|line| vec![line]);
        }

        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let expected = parse_assignment(&filter)?;
        let expected_text = expected.text.to_string();
        let mut remaining = Vec::with_capacity(candidates.len());
        for line in candidates {
            let text = record.sublist_text(sublist_id, &expected.field_id, line)?;
            if text.to_string() == expected_text {
                remaining.push(line);
            }
        }
        candidates = remaining;
        filtered = true;
    }

    Ok(candidates)
}

/// The one line matching `query`
pub fn resolve_single_line(record: &dyn Record, sublist_id: &str, query: &str) -> Result<usize> {
    let lines = resolve_lines(record, sublist_id, query)?;
    match lines.as_slice() {
        [line] => Ok(*line),
        [] => Err(RecordOpsError::LineNotFound(query.to_string())),
        _ => Err(RecordOpsError::AmbiguousLine {
            query: query.to_string(),
            lines: lines
                .iter()
                .map(usize::to_string)
                .collect::<Vec<_>>()
                .join(","),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{
        FieldInfo, MemoryRecordStore, RecordSchema, RecordSeed, RecordStore, SublistSchema,
    };
    use serde_json::json;
    use std::collections::BTreeMap;

    fn record_with_lines(lines: &[(&str, &str)]) -> Box<dyn Record> {
        let store = MemoryRecordStore::new();
        store.define_type(
            "salesorder",
            RecordSchema {
                fields: vec![],
                sublists: vec![SublistSchema {
                    id: "item".to_string(),
                    fields: vec![
                        FieldInfo::plain("status", "Status"),
                        FieldInfo::plain("amount", "Amount"),
                    ],
                }],
            },
        );
        let rows: Vec<BTreeMap<String, serde_json::Value>> = lines
            .iter()
            .map(|(status, amount)| {
                [
                    ("status".to_string(), json!(status)),
                    ("amount".to_string(), json!(amount)),
                ]
                .into_iter()
                .collect()
            })
            .collect();
        store
            .seed(RecordSeed {
                record_type: "salesorder".to_string(),
                id: "1".to_string(),
                sublists: [("item".to_string(), rows)].into_iter().collect(),
                ..Default::default()
            })
            .unwrap();
        store.load("salesorder", "1").unwrap()
    }

    fn five_lines() -> Box<dyn Record> {
        record_with_lines(&[
            ("Open", "100"),
            ("Closed", "100"),
            ("Open", "50"),
            ("Open", "100"),
            ("Closed", "75"),
        ])
    }

    #[test]
    fn test_negative_zero_is_append_point() {
        let record = five_lines();
        assert_eq!(resolve_lines(record.as_ref(), "item", "-0").unwrap(), vec![5]);
    }

    #[test]
    fn test_negative_index_counts_from_end() {
        let record = five_lines();
        assert_eq!(resolve_lines(record.as_ref(), "item", "-1").unwrap(), vec![4]);
        assert_eq!(resolve_lines(record.as_ref(), "item", "-5").unwrap(), vec![0]);
        assert!(matches!(
            resolve_lines(record.as_ref(), "item", "-6"),
            Err(RecordOpsError::LineOutOfRange { .. })
        ));
    }

    #[test]
    fn test_index_past_end_is_out_of_range() {
        let record = five_lines();
        assert_eq!(resolve_lines(record.as_ref(), "item", "4").unwrap(), vec![4]);
        assert!(matches!(
            resolve_lines(record.as_ref(), "item", "5"),
            Err(RecordOpsError::LineOutOfRange { .. })
        ));
    }

    #[test]
    fn test_field_filters_intersect() {
        let record = five_lines();
        assert_eq!(
            resolve_lines(record.as_ref(), "item", "status=Open&amount=100").unwrap(),
            vec![0, 3]
        );
        assert!(
            resolve_lines(record.as_ref(), "item", "status=Pending&amount=100")
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_index_applies_to_filtered_candidates() {
        let record = five_lines();
        assert_eq!(
            resolve_lines(record.as_ref(), "item", "status=Open&-1").unwrap(),
            vec![3]
        );
        assert_eq!(
            resolve_lines(record.as_ref(), "item", "status=Open&1").unwrap(),
            vec![2]
        );
        assert_eq!(
            resolve_lines(record.as_ref(), "item", "status=Closed&-0").unwrap(),
            vec![5]
        );
    }

    #[test]
    fn test_index_short_circuits_remaining_filters() {
        let record = five_lines();
        assert_eq!(
            resolve_lines(record.as_ref(), "item", "2&status=Closed").unwrap(),
            vec![2]
        );
    }

    #[test]
    fn test_empty_query_is_first_line() {
        let record = five_lines();
        assert_eq!(resolve_lines(record.as_ref(), "item", "").unwrap(), vec![0]);
        assert_eq!(resolve_single_line(record.as_ref(), "item", "").unwrap(), 0);
        assert_eq!(
            resolve_lines(record.as_ref(), "item", "status=Closed&").unwrap(),
            vec![1]
        );

        let empty = record_with_lines(&[]);
        assert!(matches!(
            resolve_single_line(empty.as_ref(), "item", ""),
            Err(RecordOpsError::LineNotFound(_))
        ));
    }

    #[test]
    fn test_oversized_index_is_out_of_range() {
        let record = five_lines();
        for query in ["99999999999999999999999", "-99999999999999999999999"] {
            assert!(matches!(
                resolve_lines(record.as_ref(), "item", query),
                Err(RecordOpsError::LineOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_append_into_empty_sublist() {
        let record = record_with_lines(&[]);
        assert_eq!(resolve_lines(record.as_ref(), "item", "-0").unwrap(), vec![0]);
        assert!(resolve_lines(record.as_ref(), "item", "0").unwrap().is_empty());
    }

    #[test]
    fn test_single_line_errors() {
        let record = five_lines();
        assert_eq!(
            resolve_single_line(record.as_ref(), "item", "amount=50").unwrap(),
            2
        );
        assert!(matches!(
            resolve_single_line(record.as_ref(), "item", "amount=1"),
            Err(RecordOpsError::LineNotFound(_))
        ));
        let err = resolve_single_line(record.as_ref(), "item", "status=Closed").unwrap_err();
        assert!(matches!(err, RecordOpsError::AmbiguousLine { ref lines, .. } if lines == "1,4"));
    }

    #[test]
    fn test_malformed_filter() {
        let record = five_lines();
        assert!(matches!(
            resolve_lines(record.as_ref(), "item", "status"),
            Err(RecordOpsError::MalformedAssignment(_))
        ));
    }

    #[test]
    fn test_unknown_sublist() {
        let record = five_lines();
        assert!(matches!(
            resolve_lines(record.as_ref(), "expense", "0"),
            Err(RecordOpsError::SublistNotFound(_))
        ));
    }
}
