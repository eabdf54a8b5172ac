use google_sheets4::api::ValueRange;

use crate::domain::sheets::{a1_notation::A1Notation, cell::RowValues};

pub trait ValueRangeFactory {
    fn from_rows(range: &A1Notation, rows: Vec<RowValues>) -> Self;
    fn into_rows(self) -> Vec<RowValues>;
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(range: &A1Notation, rows: Vec<RowValues>) -> Self {
        Self {
            major_dimension: Some("ROWS".to_string()),
            range: Some(range.to_string()),
            values: Some(rows),
        }
    }

    /// A range with no values at all comes back without the `values` field.
    fn into_rows(self) -> Vec<RowValues> {
        self.values.unwrap_or_default()
    }
}
