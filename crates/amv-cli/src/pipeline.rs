//! Run pipelines with explicit stages.
//!
//! Stage (a), surnames: extract glyphs and tokens from the snapshot,
//! reconcile with the transliteration engine, persist the canonical set.
//! Stage (b), verify: load the match table, select disagreeing records,
//! adjudicate them one oracle query at a time, materialize the verdicts.
//!
//! Each stage takes the output of the previous stage and returns typed
//! results for the summary printer.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{debug, info, info_span};

use amv_ingest::{extract_surnames, read_match_table, verified_output_path};
use amv_model::ComparisonPair;
use amv_oracle::Oracle;
use amv_romanize::{PinyinTransliterator, build_canonical_set, write_canonical_set};
use amv_verify::{
    VerdictStats, adjudicate_record, materialize_results, select_mismatches,
};

/// Result of the surname canonicalization stage.
#[derive(Debug)]
pub struct SurnameRunResult {
    pub snapshot: PathBuf,
    pub output: PathBuf,
    /// Glyphs contributed by the romanization table.
    pub romanization_glyphs: usize,
    /// Glyphs contributed by the frequency table.
    pub common_glyphs: usize,
    /// Normalized romanization tokens read directly from the snapshot.
    pub tokens: usize,
    /// Size of the persisted canonical set.
    pub canonical: usize,
}

/// Extract, reconcile, and persist the canonical romanization set.
pub fn run_surname_stage(snapshot: &Path, output: &Path) -> Result<SurnameRunResult> {
    let span = info_span!("surnames", snapshot = %snapshot.display());
    let _guard = span.enter();
    let start = Instant::now();

    let extracted = extract_surnames(snapshot)
        .with_context(|| format!("extract surname tables from {}", snapshot.display()))?;

    let canonical = build_canonical_set(&extracted, &PinyinTransliterator);
    write_canonical_set(output, &canonical)?;

    info!(
        canonical = canonical.len(),
        output = %output.display(),
        duration_ms = start.elapsed().as_millis(),
        "canonical set written"
    );
    Ok(SurnameRunResult {
        snapshot: snapshot.to_path_buf(),
        output: output.to_path_buf(),
        romanization_glyphs: extracted.romanization_glyphs.len(),
        common_glyphs: extracted.common_glyphs.len(),
        tokens: extracted.tokens.len(),
        canonical: canonical.len(),
    })
}

/// Result of the adjudication stage.
#[derive(Debug)]
pub struct VerifyRunResult {
    pub input: PathBuf,
    /// Written output; absent on a dry run.
    pub output: Option<PathBuf>,
    pub record_count: usize,
    pub mismatch_count: usize,
    pub stats: VerdictStats,
}

/// Load, select, adjudicate, and materialize one match table.
///
/// With no oracle handle this is a dry run: selection is reported but
/// nothing is queried and nothing is written.
pub fn run_verify_stage(
    input: &Path,
    pairs: &[ComparisonPair],
    oracle: Option<&dyn Oracle>,
) -> Result<VerifyRunResult> {
    let span = info_span!("verify", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let mut table =
        read_match_table(input).with_context(|| format!("read {}", input.display()))?;
    for record in table.records.iter().take(5) {
        debug!(record_id = record.id, fields = ?record.fields, "input row");
    }

    let mismatches = select_mismatches(&table, pairs);
    info!(
        record_count = table.len(),
        mismatch_count = mismatches.len(),
        pair_count = pairs.len(),
        "mismatch selection complete"
    );

    let Some(oracle) = oracle else {
        return Ok(VerifyRunResult {
            input: input.to_path_buf(),
            output: None,
            record_count: table.len(),
            mismatch_count: mismatches.len(),
            stats: VerdictStats::default(),
        });
    };

    // Strictly sequential: one outstanding oracle request at a time.
    let bar = ProgressBar::new(mismatches.len() as u64);
    let mut verdicts = Vec::new();
    for mismatch in &mismatches {
        let Some(record) = table.record(mismatch.record_id) else {
            continue;
        };
        verdicts.extend(adjudicate_record(record, mismatch, oracle)?);
        bar.inc(1);
    }
    bar.finish_and_clear();

    let stats = VerdictStats::from_verdicts(&verdicts);
    let output = verified_output_path(input);
    materialize_results(&output, &mut table, &verdicts)
        .with_context(|| format!("write {}", output.display()))?;

    info!(
        record_count = table.len(),
        mismatch_count = mismatches.len(),
        confirmed = stats.confirmed,
        rejected = stats.rejected,
        decode_failures = stats.decode_failures,
        output = %output.display(),
        duration_ms = start.elapsed().as_millis(),
        "verify complete"
    );
    Ok(VerifyRunResult {
        input: input.to_path_buf(),
        output: Some(output),
        record_count: table.len(),
        mismatch_count: mismatches.len(),
        stats,
    })
}
