#![deny(unsafe_code)]

use std::collections::BTreeSet;

/// One glyph/romanization pair lifted from a parsed snapshot row.
///
/// Entries are transient: the extractor folds them into [`ExtractedSurnames`]
/// as soon as a row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurnameEntry {
    /// One or more ideographic characters forming the surname.
    pub glyph: String,
    /// The raw, source-specific romanization token (tone digits intact).
    pub romanization: String,
}

/// Glyph and token sets collected from the recognized snapshot tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSurnames {
    /// Glyphs from the romanization table.
    pub romanization_glyphs: BTreeSet<String>,
    /// Glyphs from the frequency table.
    pub common_glyphs: BTreeSet<String>,
    /// Normalized romanization tokens from the romanization table.
    pub tokens: BTreeSet<String>,
}

impl ExtractedSurnames {
    /// Union of both glyph sets, the input to the transliteration pass.
    pub fn all_glyphs(&self) -> BTreeSet<String> {
        self.romanization_glyphs
            .union(&self.common_glyphs)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_glyphs_unions_both_sets() {
        let mut extracted = ExtractedSurnames::default();
        extracted.romanization_glyphs.insert("李".to_string());
        extracted.romanization_glyphs.insert("王".to_string());
        extracted.common_glyphs.insert("王".to_string());
        extracted.common_glyphs.insert("张".to_string());

        let all = extracted.all_glyphs();
        assert_eq!(all.len(), 3);
        assert!(all.contains("李"));
        assert!(all.contains("王"));
        assert!(all.contains("张"));
    }
}
