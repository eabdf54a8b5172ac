use serde_json::Value;

use super::{carried, FormatError, RowFormatter};
use crate::domain::{
    reading::ReadingRecord,
    service::ServiceName,
    sheets::{
        a1_notation::ColumnSpan,
        cell::{cell_at, date_cell, Cell, RowValues},
        column::Column,
    },
};

const COLUMNS: ColumnSpan = ColumnSpan::new(Column::from_letter(b'B'), Column::from_letter(b'H'));

/// Services billed on two tariffs:
/// `[date, counter, preferential tariff, tariff, amount, 0, note]`.
pub struct ElectricFormatter {
    service: ServiceName,
}

impl ElectricFormatter {
    pub fn new(service: ServiceName) -> Self {
        Self { service }
    }
}

impl RowFormatter for ElectricFormatter {
    fn service(&self) -> ServiceName {
        self.service
    }

    fn range_template(&self) -> ColumnSpan {
        COLUMNS
    }

    fn format_row(
        &self,
        previous_row: &[Cell],
        record: &ReadingRecord,
    ) -> error_stack::Result<RowValues, FormatError> {
        Ok(vec![
            date_cell(record.date),
            carried(record.counter_value, previous_row, 1),
            carried(record.tariff_preferential, previous_row, 2),
            carried(record.tariff, previous_row, 3),
            cell_at(previous_row, 4),
            Value::from(0),
            cell_at(previous_row, 6),
        ])
    }
}
