//! Table and JSON rendering of detection results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use xsv_ingest::DEFAULT_DELIMITERS;
use xsv_model::{ColumnType, XsvMetadata};

use crate::format::delimiter_label;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per header column: position, name and inferred type.
pub fn metadata_table(metadata: &XsvMetadata) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Column"),
        header_cell("Type"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (idx, (name, column_type)) in metadata.columns().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(name),
            type_cell(column_type),
        ]);
    }
    table
}

/// Candidate delimiters in the order ties are broken.
pub fn delimiters_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Priority"), header_cell("Delimiter")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);

    for (idx, delimiter) in DEFAULT_DELIMITERS.iter().enumerate() {
        table.add_row(vec![Cell::new(idx + 1), Cell::new(delimiter_label(*delimiter))]);
    }
    table
}

/// Pretty-printed JSON for `--format json`.
pub fn metadata_json(metadata: &XsvMetadata) -> serde_json::Result<String> {
    serde_json::to_string_pretty(metadata)
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

fn type_cell(column_type: ColumnType) -> Cell {
    let cell = Cell::new(column_type);
    if column_type.is_numeric() {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::DarkGrey)
    }
}
