#![deny(unsafe_code)]

/// One oracle query, built per disagreeing pair of a selected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjudicationRequest {
    pub record_id: usize,
    pub left: String,
    pub right: String,
}

/// The decoded outcome of one oracle query.
///
/// A reply that fails the constrained schema becomes `DecodeFailure`, never
/// an implicit "not matched": the affected record keeps whatever
/// verification state it already had.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjudicationVerdict {
    Matched { record_id: usize, matched: bool },
    DecodeFailure { record_id: usize },
}

impl AdjudicationVerdict {
    pub fn record_id(&self) -> usize {
        match self {
            Self::Matched { record_id, .. } | Self::DecodeFailure { record_id } => *record_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_serializes_tagged() {
        let verdict = AdjudicationVerdict::Matched {
            record_id: 4,
            matched: false,
        };
        let json = serde_json::to_string(&verdict).expect("serialize verdict");
        let round: AdjudicationVerdict = serde_json::from_str(&json).expect("deserialize verdict");
        assert_eq!(round, verdict);
        assert_eq!(round.record_id(), 4);
    }
}
