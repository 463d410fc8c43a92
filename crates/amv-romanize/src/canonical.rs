//! Canonical romanization set construction and persistence.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use amv_model::ExtractedSurnames;

use crate::normalize::normalize;
use crate::translit::Transliterator;

/// Union of the extracted romanization tokens with the normalized
/// transliteration of every glyph seen in any recognized source.
///
/// Glyphs the engine cannot read contribute nothing; that is not an error.
pub fn build_canonical_set(
    extracted: &ExtractedSurnames,
    engine: &dyn Transliterator,
) -> BTreeSet<String> {
    let mut canonical = extracted.tokens.clone();
    for glyph in extracted.all_glyphs() {
        let Some(romanized) = engine.romanize(&glyph) else {
            debug!(glyph = %glyph, "no transliteration, skipped");
            continue;
        };
        canonical.insert(normalize(&romanized));
    }
    canonical
}

/// Write the set as a JSON array of strings. Element order carries no
/// meaning for consumers.
pub fn write_canonical_set(path: &Path, canonical: &BTreeSet<String>) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("create canonical set file {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer(writer, canonical)
        .with_context(|| format!("write canonical set {}", path.display()))?;
    Ok(())
}
