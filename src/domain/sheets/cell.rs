use chrono::NaiveDate;
use serde_json::Value;

/// A single spreadsheet cell as exchanged with the Sheets API.
pub type Cell = Value;

/// The cells of one spreadsheet row, left to right.
pub type RowValues = Vec<Cell>;

pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// The API drops trailing empty cells, so a missing cell reads as an empty string.
pub fn cell_at(row: &[Cell], index: usize) -> Cell {
    row.get(index)
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()))
}

pub fn is_formula(cell: &Cell) -> bool {
    matches!(cell, Value::String(text) if text.starts_with('='))
}

pub fn date_cell(date: NaiveDate) -> Cell {
    Value::String(date.format(DATE_FORMAT).to_string())
}

pub fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}
