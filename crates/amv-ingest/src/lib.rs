//! Source ingestion: the reference-page snapshot for the canonicalization
//! stage and the delimited match table for the adjudication stage.

pub mod error;
pub mod match_table;
pub mod snapshot;

pub use error::{IngestError, Result};
pub use match_table::{
    VERIFIED_COLUMN, read_match_table, verified_output_path, write_match_table,
};
pub use snapshot::{
    COMMON_SURNAMES_CAPTION, ROMANIZATIONS_CAPTION, extract_surnames, extract_surnames_from_str,
};
