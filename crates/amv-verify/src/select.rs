//! Mismatch selection over the match table.

use amv_model::{ComparisonPair, MatchTable};
use tracing::debug;

/// One selected record, carrying every configured pair that disagreed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub record_id: usize,
    pub pairs: Vec<ComparisonPair>,
}

/// Scan the table in row order and select each record whose configured
/// pairs disagree byte-for-byte on at least one pair.
///
/// A record appears at most once, with all of its disagreeing pairs; table
/// order is kept so adjudication cost and logs stay reproducible.
pub fn select_mismatches(table: &MatchTable, pairs: &[ComparisonPair]) -> Vec<Mismatch> {
    let mut selected = Vec::new();
    for record in &table.records {
        let disagreeing: Vec<ComparisonPair> = pairs
            .iter()
            .filter(|pair| record.field(&pair.left) != record.field(&pair.right))
            .cloned()
            .collect();
        if disagreeing.is_empty() {
            continue;
        }
        debug!(
            record_id = record.id,
            pair_count = disagreeing.len(),
            "record selected for adjudication"
        );
        selected.push(Mismatch {
            record_id: record.id,
            pairs: disagreeing,
        });
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use amv_model::MatchRecord;

    fn record(id: usize, fields: &[(&str, &str)]) -> MatchRecord {
        MatchRecord {
            id,
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<BTreeMap<_, _>>(),
            verified: true,
        }
    }

    fn test_table(records: Vec<MatchRecord>) -> MatchTable {
        MatchTable {
            headers: vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()],
            records,
        }
    }

    #[test]
    fn agreeing_records_are_never_selected() {
        let table = test_table(vec![record(0, &[("a", "x"), ("b", "x")])]);
        let pairs = [ComparisonPair::new("a", "b")];
        assert!(select_mismatches(&table, &pairs).is_empty());
    }

    #[test]
    fn record_selected_once_with_all_disagreeing_pairs() {
        let table = test_table(vec![record(
            0,
            &[("a", "x"), ("b", "y"), ("c", "p"), ("d", "q")],
        )]);
        let pairs = [ComparisonPair::new("a", "b"), ComparisonPair::new("c", "d")];

        let selected = select_mismatches(&table, &pairs);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].record_id, 0);
        assert_eq!(selected[0].pairs, pairs.to_vec());
    }

    #[test]
    fn selection_follows_table_order() {
        let table = test_table(vec![
            record(5, &[("a", "x"), ("b", "y")]),
            record(2, &[("a", "x"), ("b", "x")]),
            record(9, &[("a", "p"), ("b", "q")]),
        ]);
        let pairs = [ComparisonPair::new("a", "b")];

        let ids: Vec<usize> = select_mismatches(&table, &pairs)
            .iter()
            .map(|m| m.record_id)
            .collect();
        assert_eq!(ids, vec![5, 9]);
    }

    #[test]
    fn missing_field_compares_as_empty() {
        // "a" present and non-empty vs "b" absent: a disagreement.
        let table = test_table(vec![record(0, &[("a", "x")])]);
        let pairs = [ComparisonPair::new("a", "b")];
        assert_eq!(select_mismatches(&table, &pairs).len(), 1);

        // Both absent: equal, not selected.
        let table = test_table(vec![record(0, &[])]);
        assert!(select_mismatches(&table, &pairs).is_empty());
    }
}
