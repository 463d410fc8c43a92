#![deny(unsafe_code)]

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Writer};
use tracing::debug;

use amv_model::{MatchRecord, MatchTable};

use crate::error::Result;

/// Name of the column appended by the result materializer.
pub const VERIFIED_COLUMN: &str = "verified";

fn normalize_header(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read the match-result table. Every record starts out `verified`;
/// adjudication is the only thing that revokes that.
///
/// Cell values are kept byte-for-byte; disagreement detection must see
/// exactly what the upstream matcher wrote.
pub fn read_match_table(path: &Path) -> Result<MatchTable> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(normalize_header).collect();

    let mut records = Vec::new();
    for (id, record) in reader.records().enumerate() {
        let record = record?;
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            fields.insert(header.clone(), value.to_string());
        }
        records.push(MatchRecord {
            id,
            fields,
            verified: true,
        });
    }

    debug!(
        path = %path.display(),
        record_count = records.len(),
        column_count = headers.len(),
        "match table loaded"
    );
    Ok(MatchTable { headers, records })
}

/// Write the table back with the verification column appended last.
/// Row order, column order and passthrough values are untouched.
pub fn write_match_table(path: &Path, table: &MatchTable) -> Result<()> {
    let mut writer = Writer::from_path(path)?;

    let mut header_row: Vec<&str> = table.headers.iter().map(String::as_str).collect();
    header_row.push(VERIFIED_COLUMN);
    writer.write_record(&header_row)?;

    for record in &table.records {
        let mut row: Vec<&str> = table
            .headers
            .iter()
            .map(|header| record.field(header))
            .collect();
        row.push(if record.verified { "true" } else { "false" });
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Output path derived from the input path, `<input>.verified.csv`.
pub fn verified_output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".verified.csv");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_preserves_order_and_defaults_verified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matched.csv");
        std::fs::write(
            &path,
            "id,author_name,csv_author_name,grant\n\
             1,John A. Smith,John Smith,G-1\n\
             2,Wei Chen,Wei Chen,G-2\n",
        )
        .unwrap();

        let table = read_match_table(&path).unwrap();

        assert_eq!(
            table.headers,
            vec!["id", "author_name", "csv_author_name", "grant"]
        );
        assert_eq!(table.len(), 2);
        assert!(table.records.iter().all(|record| record.verified));
        assert_eq!(table.records[0].field("author_name"), "John A. Smith");
        assert_eq!(table.records[1].field("grant"), "G-2");
    }

    #[test]
    fn write_appends_verified_column_and_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("matched.csv");
        std::fs::write(&input, "a,b\nx,y\np,q\n").unwrap();

        let mut table = read_match_table(&input).unwrap();
        table.records[1].verified = false;

        let output = verified_output_path(&input);
        write_match_table(&output, &table).unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "a,b,verified\nx,y,true\np,q,false\n");
    }

    #[test]
    fn output_path_is_derived_from_input() {
        let path = verified_output_path(Path::new("data/matched_authors.csv"));
        assert_eq!(
            path,
            PathBuf::from("data/matched_authors.csv.verified.csv")
        );
    }

    #[test]
    fn bom_on_first_header_is_stripped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matched.csv");
        std::fs::write(&path, "\u{feff}a,b\nx,y\n").unwrap();

        let table = read_match_table(&path).unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
    }
}
