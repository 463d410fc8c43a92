//! Integration tests for the pipeline module.

use std::cell::RefCell;

use amv_cli::pipeline::{run_surname_stage, run_verify_stage};
use amv_model::{AdjudicationRequest, ComparisonPair};
use amv_oracle::{Oracle, ReplyDecode};

const SNAPSHOT: &str = "<html><body>\
    <table class=\"wikitable sortable\">\
    <caption>Romanizations</caption>\
    <tr><th>Rank</th><th>Simplified</th><th>Traditional</th>\
    <th>Pinyin</th><th>Wade-Giles</th></tr>\
    <tr><td>1</td><td colspan=\"2\">李</td><td>Lǐ</td><td>Li3</td></tr>\
    </table>\
    <table class=\"wikitable sortable\">\
    <caption>400 most common surnames in China</caption>\
    <tr><td>1</td><td>王</td><td>Wáng</td><td>a</td><td>b</td><td>c</td></tr>\
    </table>\
    </body></html>";

struct ScriptedOracle {
    replies: RefCell<Vec<ReplyDecode>>,
}

impl Oracle for ScriptedOracle {
    fn adjudicate(&self, _request: &AdjudicationRequest) -> amv_oracle::Result<ReplyDecode> {
        Ok(self.replies.borrow_mut().remove(0))
    }
}

#[test]
fn surname_stage_writes_the_canonical_set() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = dir.path().join("List_of_common_Chinese_surnames");
    std::fs::write(&snapshot, SNAPSHOT).unwrap();
    let output = dir.path().join("surnames.json");

    let result = run_surname_stage(&snapshot, &output).unwrap();

    assert_eq!(result.romanization_glyphs, 1);
    assert_eq!(result.common_glyphs, 1);
    assert_eq!(result.tokens, 1);
    // Token "li" and the reading of 李 coincide; 王 adds "wang".
    assert_eq!(result.canonical, 2);

    let json = std::fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(json, @r#"["li","wang"]"#);
}

#[test]
fn dry_run_reports_selection_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("matched_authors.csv");
    std::fs::write(
        &input,
        "author_name,csv_author_name\n\
         John A. Smith,John Smith\n\
         Wei Chen,Wei Chen\n",
    )
    .unwrap();
    let pairs = vec![ComparisonPair::new("author_name", "csv_author_name")];

    let result = run_verify_stage(&input, &pairs, None).unwrap();

    assert_eq!(result.record_count, 2);
    assert_eq!(result.mismatch_count, 1);
    assert!(result.output.is_none());
    assert!(!amv_ingest::verified_output_path(&input).exists());
}

#[test]
fn verify_stage_writes_the_adjudicated_table() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("matched_authors.csv");
    std::fs::write(
        &input,
        "author_name,csv_author_name\n\
         John A. Smith,John Smith\n\
         Wei Chen,Wei Chen\n",
    )
    .unwrap();
    let pairs = vec![ComparisonPair::new("author_name", "csv_author_name")];
    let oracle = ScriptedOracle {
        replies: RefCell::new(vec![ReplyDecode::Verdict { matched: false }]),
    };

    let result = run_verify_stage(&input, &pairs, Some(&oracle)).unwrap();

    assert_eq!(result.mismatch_count, 1);
    assert_eq!(result.stats.rejected, 1);
    let output = result.output.unwrap();
    let written = std::fs::read_to_string(output).unwrap();
    assert_eq!(
        written,
        "author_name,csv_author_name,verified\n\
         John A. Smith,John Smith,false\n\
         Wei Chen,Wei Chen,true\n"
    );
}
