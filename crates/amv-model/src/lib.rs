pub mod error;
pub mod matching;
pub mod surname;
pub mod verdict;

pub use error::{ModelError, Result};
pub use matching::{ComparisonPair, MatchRecord, MatchTable};
pub use surname::{ExtractedSurnames, SurnameEntry};
pub use verdict::{AdjudicationRequest, AdjudicationVerdict};
