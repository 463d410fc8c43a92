//! Applying verdicts back onto the table and persisting the result.

use std::path::Path;

use amv_ingest::write_match_table;
use amv_model::{AdjudicationVerdict, MatchTable};
use tracing::debug;

/// Apply every verdict onto its record's `verified` field, by id.
///
/// Only a `matched == 0` verdict changes anything; `matched == 1` leaves
/// the field as it stands and decode failures are no-ops. Records never
/// selected are untouched.
pub fn apply_verdicts(table: &mut MatchTable, verdicts: &[AdjudicationVerdict]) {
    let mut applied = 0usize;
    for verdict in verdicts {
        let AdjudicationVerdict::Matched {
            record_id,
            matched: false,
        } = verdict
        else {
            continue;
        };
        if let Some(record) = table.record_mut(*record_id) {
            record.verified = false;
            applied += 1;
        }
    }
    debug!(
        verdict_count = verdicts.len(),
        applied, "verdicts applied to match table"
    );
}

/// Apply verdicts and write the full table, all records, input order.
pub fn materialize_results(
    output: &Path,
    table: &mut MatchTable,
    verdicts: &[AdjudicationVerdict],
) -> amv_ingest::Result<()> {
    apply_verdicts(table, verdicts);
    write_match_table(output, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn table() -> MatchTable {
        MatchTable {
            headers: vec!["a".to_string()],
            records: (0..3)
                .map(|id| amv_model::MatchRecord {
                    id,
                    fields: BTreeMap::new(),
                    verified: true,
                })
                .collect(),
        }
    }

    #[test]
    fn rejection_flips_verified_and_confirmation_does_not() {
        let mut table = table();
        apply_verdicts(
            &mut table,
            &[
                AdjudicationVerdict::Matched {
                    record_id: 0,
                    matched: true,
                },
                AdjudicationVerdict::Matched {
                    record_id: 2,
                    matched: false,
                },
            ],
        );
        assert!(table.records[0].verified);
        assert!(table.records[1].verified);
        assert!(!table.records[2].verified);
    }

    #[test]
    fn decode_failure_is_a_no_op() {
        let mut table = table();
        apply_verdicts(
            &mut table,
            &[AdjudicationVerdict::DecodeFailure { record_id: 1 }],
        );
        assert!(table.records.iter().all(|record| record.verified));
    }

    #[test]
    fn confirmation_never_resurrects_a_rejection() {
        let mut table = table();
        apply_verdicts(
            &mut table,
            &[
                AdjudicationVerdict::Matched {
                    record_id: 1,
                    matched: false,
                },
                AdjudicationVerdict::Matched {
                    record_id: 1,
                    matched: true,
                },
            ],
        );
        assert!(!table.records[1].verified);
    }
}
