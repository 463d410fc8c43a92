//! Tests for amv-model types.

use std::collections::BTreeMap;

use amv_model::{AdjudicationVerdict, ComparisonPair, MatchRecord, MatchTable};

#[test]
fn match_table_round_trips_through_json() {
    let table = MatchTable {
        headers: vec!["author_name".to_string(), "csv_author_name".to_string()],
        records: vec![MatchRecord {
            id: 0,
            fields: BTreeMap::from([
                ("author_name".to_string(), "John A. Smith".to_string()),
                ("csv_author_name".to_string(), "John Smith".to_string()),
            ]),
            verified: true,
        }],
    };
    let json = serde_json::to_string(&table).expect("serialize table");
    let round: MatchTable = serde_json::from_str(&json).expect("deserialize table");
    assert_eq!(round.headers, table.headers);
    assert_eq!(round.records, table.records);
}

#[test]
fn verdict_tags_distinguish_outcomes() {
    let matched = serde_json::to_string(&AdjudicationVerdict::Matched {
        record_id: 1,
        matched: false,
    })
    .expect("serialize verdict");
    assert!(matched.contains("\"kind\":\"matched\""));

    let failure = serde_json::to_string(&AdjudicationVerdict::DecodeFailure { record_id: 1 })
        .expect("serialize verdict");
    assert!(failure.contains("\"kind\":\"decode_failure\""));
}

#[test]
fn comparison_pair_rejects_malformed_cli_values() {
    assert!("left=right".parse::<ComparisonPair>().is_ok());
    assert!("left=".parse::<ComparisonPair>().is_err());
    assert!("  =  ".parse::<ComparisonPair>().is_err());
}
