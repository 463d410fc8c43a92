#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::ModelError;

/// One row of the match-result table.
///
/// `verified` defaults to `true` on load and is only ever flipped by the
/// result materializer, addressed by `id` rather than by position.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRecord {
    pub id: usize,
    pub fields: BTreeMap<String, String>,
    pub verified: bool,
}

impl MatchRecord {
    /// Field value by column name; a column absent from this record reads
    /// as the empty string.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map_or("", String::as_str)
    }
}

/// The full match-result table, preserving input column and row order.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct MatchTable {
    pub headers: Vec<String>,
    pub records: Vec<MatchRecord>,
}

impl MatchTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record lookup by id.
    pub fn record(&self, id: usize) -> Option<&MatchRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Mutable record lookup by id.
    pub fn record_mut(&mut self, id: usize) -> Option<&mut MatchRecord> {
        self.records.iter_mut().find(|record| record.id == id)
    }
}

/// A configured pair of column names compared for disagreement.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ComparisonPair {
    pub left: String,
    pub right: String,
}

impl ComparisonPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl FromStr for ComparisonPair {
    type Err = ModelError;

    /// Parses the `LEFT=RIGHT` CLI form.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let Some((left, right)) = raw.split_once('=') else {
            return Err(ModelError::Message(format!(
                "invalid comparison pair '{raw}': expected LEFT=RIGHT"
            )));
        };
        let left = left.trim();
        let right = right.trim();
        if left.is_empty() || right.is_empty() {
            return Err(ModelError::Message(format!(
                "invalid comparison pair '{raw}': both column names are required"
            )));
        }
        Ok(Self::new(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_reads_as_empty() {
        let record = MatchRecord {
            id: 7,
            fields: BTreeMap::from([("a".to_string(), "x".to_string())]),
            verified: true,
        };
        assert_eq!(record.field("a"), "x");
        assert_eq!(record.field("b"), "");
    }

    #[test]
    fn record_mut_finds_by_id_not_position() {
        let mut table = MatchTable {
            headers: vec!["a".to_string()],
            records: vec![
                MatchRecord {
                    id: 10,
                    fields: BTreeMap::new(),
                    verified: true,
                },
                MatchRecord {
                    id: 3,
                    fields: BTreeMap::new(),
                    verified: true,
                },
            ],
        };
        table.record_mut(3).unwrap().verified = false;
        assert!(table.records[0].verified);
        assert!(!table.records[1].verified);
    }

    #[test]
    fn comparison_pair_parses_cli_form() {
        let pair: ComparisonPair = "author_name=csv_author_name".parse().unwrap();
        assert_eq!(pair.left, "author_name");
        assert_eq!(pair.right, "csv_author_name");

        assert!("author_name".parse::<ComparisonPair>().is_err());
        assert!("=csv_author_name".parse::<ComparisonPair>().is_err());
    }
}
