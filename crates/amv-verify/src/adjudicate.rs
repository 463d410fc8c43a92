//! One-at-a-time oracle adjudication of selected records.

use amv_model::{AdjudicationRequest, AdjudicationVerdict, MatchRecord, MatchTable};
use amv_oracle::{Oracle, ReplyDecode, adjudication_prompt};
use tracing::{debug, warn};

use crate::select::Mismatch;

/// Adjudicate every disagreeing pair of one selected record, one blocking
/// query per pair.
///
/// A reply that fails the schema decode becomes a `DecodeFailure` verdict
/// and is logged with its prompt and payload; it never aborts the batch.
/// Transport failures do abort: there is no retry policy here.
pub fn adjudicate_record(
    record: &MatchRecord,
    mismatch: &Mismatch,
    oracle: &dyn Oracle,
) -> amv_oracle::Result<Vec<AdjudicationVerdict>> {
    let mut verdicts = Vec::with_capacity(mismatch.pairs.len());
    for pair in &mismatch.pairs {
        let request = AdjudicationRequest {
            record_id: record.id,
            left: record.field(&pair.left).to_string(),
            right: record.field(&pair.right).to_string(),
        };
        match oracle.adjudicate(&request)? {
            ReplyDecode::Verdict { matched } => {
                debug!(record_id = record.id, matched, "verdict decoded");
                verdicts.push(AdjudicationVerdict::Matched {
                    record_id: record.id,
                    matched,
                });
            }
            ReplyDecode::Malformed { detail, reply } => {
                warn!(
                    record_id = record.id,
                    prompt = %adjudication_prompt(&request),
                    reply = %reply,
                    error = %detail,
                    "oracle reply failed schema decode; verification state left unchanged"
                );
                verdicts.push(AdjudicationVerdict::DecodeFailure {
                    record_id: record.id,
                });
            }
        }
    }
    Ok(verdicts)
}

/// Adjudicate a whole mismatch list in order, strictly sequentially.
pub fn adjudicate_mismatches(
    table: &MatchTable,
    mismatches: &[Mismatch],
    oracle: &dyn Oracle,
) -> amv_oracle::Result<Vec<AdjudicationVerdict>> {
    let mut verdicts = Vec::new();
    for mismatch in mismatches {
        let Some(record) = table.record(mismatch.record_id) else {
            continue;
        };
        verdicts.extend(adjudicate_record(record, mismatch, oracle)?);
    }
    Ok(verdicts)
}

/// Verdict tallies for the run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictStats {
    /// `matched == 1` verdicts.
    pub confirmed: usize,
    /// `matched == 0` verdicts.
    pub rejected: usize,
    /// Replies that failed the schema decode.
    pub decode_failures: usize,
}

impl VerdictStats {
    pub fn from_verdicts(verdicts: &[AdjudicationVerdict]) -> Self {
        let mut stats = Self::default();
        for verdict in verdicts {
            match verdict {
                AdjudicationVerdict::Matched { matched: true, .. } => stats.confirmed += 1,
                AdjudicationVerdict::Matched { matched: false, .. } => stats.rejected += 1,
                AdjudicationVerdict::DecodeFailure { .. } => stats.decode_failures += 1,
            }
        }
        stats
    }
}
