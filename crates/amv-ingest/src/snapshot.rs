//! Extraction of surname tables from a saved reference-page snapshot.
//!
//! The snapshot is the page's raw tabular markup. Tables are identified by
//! caption text; two captions are recognized. The romanization table has an
//! irregular layout: the glyph column may be merged with the
//! historical-script column (`colspan="2"`), shifting every later column
//! one position left. The frequency table instead tolerates sparse rows by
//! skipping anything that is not exactly six cells wide.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::{debug, info};

use amv_model::{ExtractedSurnames, SurnameEntry};
use amv_romanize::normalize;

use crate::error::{IngestError, Result};

/// Caption of the romanization-systems table.
pub const ROMANIZATIONS_CAPTION: &str = "Romanizations";
/// Caption of the surname frequency table.
pub const COMMON_SURNAMES_CAPTION: &str = "400 most common surnames in China";

/// Unshifted column of the first romanization system in a row whose glyph
/// and historical-script cells are separate.
const ROMANIZATION_BASE_OFFSET: usize = 3;
/// Cell count of a well-formed frequency-table row.
const COMMON_ROW_WIDTH: usize = 6;

/// Read the snapshot file and extract glyph and token sets from the
/// recognized tables.
pub fn extract_surnames(path: &Path) -> Result<ExtractedSurnames> {
    let markup = fs::read_to_string(path)?;
    extract_surnames_from_str(&markup)
}

/// Extract glyph and token sets from snapshot markup held in memory.
pub fn extract_surnames_from_str(markup: &str) -> Result<ExtractedSurnames> {
    let tables = collect_tables(markup)?;
    let mut extracted = ExtractedSurnames::default();
    let mut recognized = 0usize;

    for table in &tables {
        match table.caption.as_str() {
            ROMANIZATIONS_CAPTION => {
                recognized += 1;
                collect_romanizations(table, &mut extracted)?;
            }
            COMMON_SURNAMES_CAPTION => {
                recognized += 1;
                collect_common_surnames(table, &mut extracted);
            }
            other => {
                debug!(caption = %other, "table ignored");
            }
        }
    }

    info!(
        table_count = tables.len(),
        recognized,
        romanization_glyphs = extracted.romanization_glyphs.len(),
        common_glyphs = extracted.common_glyphs.len(),
        tokens = extracted.tokens.len(),
        "snapshot extraction complete"
    );
    Ok(extracted)
}

/// One `<td>` cell: accumulated text plus the raw `colspan` attribute.
#[derive(Debug, Clone, Default)]
struct RawCell {
    text: String,
    colspan: Option<String>,
}

/// A captioned table reduced to its `<td>` grid. Header cells never count.
#[derive(Debug, Clone, Default)]
struct RawTable {
    caption: String,
    rows: Vec<Vec<RawCell>>,
}

/// Walk the markup and collect every `wikitable`-classed table.
///
/// Real-world snapshots are not clean XML: void tags go unclosed, stray
/// ampersands and unknown entities appear in prose. The reader is
/// configured leniently and unresolvable text is degraded, never fatal;
/// only structurally broken markup errors out.
fn collect_tables(markup: &str) -> Result<Vec<RawTable>> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(true);
    config.check_end_names = false;
    config.allow_dangling_amp = true;

    let mut tables: Vec<RawTable> = Vec::new();
    let mut current: Option<RawTable> = None;
    // Depth of tables nested inside a captured one; their content is skipped.
    let mut nested = 0usize;
    let mut in_caption = false;
    let mut in_row = false;
    let mut in_cell = false;
    let mut row: Vec<RawCell> = Vec::new();
    let mut cell = RawCell::default();

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) => match e.local_name().as_ref() {
                b"table" => {
                    if current.is_some() {
                        nested += 1;
                    } else if class_attr(&e).split_whitespace().any(|c| c == "wikitable") {
                        current = Some(RawTable::default());
                    }
                }
                b"caption" if current.is_some() && nested == 0 => in_caption = true,
                b"tr" if current.is_some() && nested == 0 => {
                    if in_row && !row.is_empty() {
                        push_row(&mut current, &mut row);
                    }
                    in_row = true;
                    row.clear();
                }
                b"td" if in_row && nested == 0 => {
                    in_cell = true;
                    cell = RawCell {
                        text: String::new(),
                        colspan: attr_value(&e, "colspan"),
                    };
                }
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"td" && in_row && nested == 0 {
                    row.push(RawCell {
                        text: String::new(),
                        colspan: attr_value(&e, "colspan"),
                    });
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"table" => {
                    if nested > 0 {
                        nested -= 1;
                    } else if let Some(mut table) = current.take() {
                        if in_row && !row.is_empty() {
                            table.rows.push(std::mem::take(&mut row));
                        }
                        in_row = false;
                        tables.push(table);
                    }
                }
                b"caption" => in_caption = false,
                b"tr" if in_row && nested == 0 => {
                    in_row = false;
                    push_row(&mut current, &mut row);
                }
                b"td" if in_cell && nested == 0 => {
                    in_cell = false;
                    cell.text = cell.text.trim().to_string();
                    row.push(std::mem::take(&mut cell));
                }
                _ => {}
            },
            Event::Text(t) if nested == 0 => {
                let text = match t.decode() {
                    Ok(cow) => cow.into_owned(),
                    Err(_) => String::from_utf8_lossy(&t).into_owned(),
                };
                if in_cell {
                    cell.text.push_str(&text);
                } else if in_caption {
                    if let Some(table) = current.as_mut() {
                        table.caption.push_str(text.trim());
                    }
                }
            }
            Event::GeneralRef(e) if nested == 0 => {
                if let Some(ch) = resolve_reference(&e) {
                    if in_cell {
                        cell.text.push(ch);
                    } else if in_caption {
                        if let Some(table) = current.as_mut() {
                            table.caption.push(ch);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Ok(tables)
}

fn push_row(current: &mut Option<RawTable>, row: &mut Vec<RawCell>) {
    if let Some(table) = current.as_mut() {
        table.rows.push(std::mem::take(row));
    } else {
        row.clear();
    }
}

fn class_attr(e: &quick_xml::events::BytesStart<'_>) -> String {
    attr_value(e, "class").unwrap_or_default()
}

fn attr_value(e: &quick_xml::events::BytesStart<'_>, name: &str) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Resolve an entity reference to a character. Unknown named entities are
/// dropped rather than failing the parse.
fn resolve_reference(name: &[u8]) -> Option<char> {
    match name {
        b"amp" => Some('&'),
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        b"nbsp" => Some('\u{a0}'),
        [b'#', b'x' | b'X', hex @ ..] => {
            let code = u32::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()?;
            char::from_u32(code)
        }
        [b'#', digits @ ..] => {
            let code: u32 = std::str::from_utf8(digits).ok()?.parse().ok()?;
            char::from_u32(code)
        }
        _ => None,
    }
}

/// Romanization table: rows of at least four cells carry rank, glyph(s),
/// then one romanization system per column from the baseline offset on.
///
/// The glyph cell's span decides the correction: a span of 2 means the
/// glyph and historical-script cells are merged and every later column
/// sits one position early; a span of 1 means the historical-script glyph
/// occupies its own cell and the baseline holds. Anything else is a
/// structural violation that abandons the whole source.
fn collect_romanizations(table: &RawTable, extracted: &mut ExtractedSurnames) -> Result<()> {
    for (row_index, cells) in table.rows.iter().enumerate() {
        if cells.len() < 4 {
            continue;
        }
        let glyph_cell = &cells[1];
        let span = glyph_span(glyph_cell, row_index)?;
        let (glyph, offset) = if span == 2 {
            (glyph_cell.text.clone(), ROMANIZATION_BASE_OFFSET - 1)
        } else {
            (cells[2].text.clone(), ROMANIZATION_BASE_OFFSET)
        };
        // The baseline column itself holds the modern system; the token
        // recorded here is the historical one right after it.
        let token_column = offset + 1;
        let Some(token_cell) = cells.get(token_column) else {
            return Err(IngestError::MissingColumn {
                table: ROMANIZATIONS_CAPTION.to_string(),
                row: row_index,
                column: token_column,
            });
        };
        let entry = SurnameEntry {
            glyph,
            romanization: token_cell.text.clone(),
        };
        extracted.tokens.insert(normalize(&entry.romanization));
        extracted.romanization_glyphs.insert(entry.glyph);
    }
    Ok(())
}

fn glyph_span(cell: &RawCell, row_index: usize) -> Result<usize> {
    let span = match cell.colspan.as_deref() {
        None => 1,
        Some(raw) => raw.trim().parse::<usize>().unwrap_or(0),
    };
    if span == 1 || span == 2 {
        Ok(span)
    } else {
        Err(IngestError::GlyphSpan {
            table: ROMANIZATIONS_CAPTION.to_string(),
            row: row_index,
            span: cell.colspan.clone().unwrap_or_default(),
        })
    }
}

/// Frequency table: only rows of exactly six cells count; anything else is
/// skipped silently. The glyph sits in the second cell.
fn collect_common_surnames(table: &RawTable, extracted: &mut ExtractedSurnames) {
    let mut skipped = 0usize;
    for cells in &table.rows {
        if cells.len() != COMMON_ROW_WIDTH {
            skipped += 1;
            continue;
        }
        extracted.common_glyphs.insert(cells[1].text.clone());
    }
    if skipped > 0 {
        debug!(skipped, "irregular frequency-table rows skipped");
    }
}
