//! The mismatch adjudication stage: select disagreeing records, consult
//! the oracle one query at a time, and materialize verdicts back into the
//! table.

pub mod adjudicate;
pub mod materialize;
pub mod select;

pub use adjudicate::{VerdictStats, adjudicate_mismatches, adjudicate_record};
pub use materialize::{apply_verdicts, materialize_results};
pub use select::{Mismatch, select_mismatches};
