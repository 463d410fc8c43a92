use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use amv_cli::pipeline::{SurnameRunResult, VerifyRunResult};

pub fn print_surname_summary(result: &SurnameRunResult) {
    println!("Snapshot: {}", result.snapshot.display());
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Source"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Romanization-table glyphs"),
        Cell::new(result.romanization_glyphs),
    ]);
    table.add_row(vec![
        Cell::new("Frequency-table glyphs"),
        Cell::new(result.common_glyphs),
    ]);
    table.add_row(vec![
        Cell::new("Romanization tokens"),
        Cell::new(result.tokens),
    ]);
    table.add_row(vec![
        Cell::new("Canonical set")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.canonical).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_verify_summary(result: &VerifyRunResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: none (dry run)"),
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Records"),
        header_cell("Mismatches"),
        header_cell("Confirmed"),
        header_cell("Rejected"),
        header_cell("Decode failures"),
    ]);
    apply_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.record_count),
        Cell::new(result.mismatch_count),
        Cell::new(result.stats.confirmed),
        count_cell(result.stats.rejected, Color::Red),
        count_cell(result.stats.decode_failures, Color::Yellow),
    ]);
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value > 0 {
        Cell::new(value).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(value).fg(Color::DarkGrey)
    }
}
