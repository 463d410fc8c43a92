use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed table markup: {0}")]
    Markup(#[from] quick_xml::Error),

    /// The glyph cell of a romanization row carries a column span the
    /// layout does not define. The affected source is abandoned rather
    /// than guessed at.
    #[error("table '{table}' row {row}: unsupported glyph colspan '{span}'")]
    GlyphSpan {
        table: String,
        row: usize,
        span: String,
    },

    /// A romanization row is too short to hold its token at the
    /// offset-corrected position.
    #[error("table '{table}' row {row}: no romanization cell at column {column}")]
    MissingColumn {
        table: String,
        row: usize,
        column: usize,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
