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

const COLUMNS: ColumnSpan = ColumnSpan::new(Column::from_letter(b'C'), Column::from_letter(b'H'));

/// Gas and water: `[date, counter, tariff, consumption, 0, note]`.
pub struct DefaultFormatter {
    service: ServiceName,
}

impl DefaultFormatter {
    pub fn new(service: ServiceName) -> Self {
        Self { service }
    }
}

impl RowFormatter for DefaultFormatter {
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
            carried(record.tariff, previous_row, 2),
            cell_at(previous_row, 3),
            Value::from(0),
            cell_at(previous_row, 5),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn previous_row() -> RowValues {
        vec![
            json!("01.05.2024"),
            json!(100),
            json!(1.5),
            json!("x"),
            json!(0),
            json!("note"),
        ]
    }

    #[test]
    fn test_carries_unspecified_values_forward() {
        let formatter = DefaultFormatter::new(ServiceName::Gas);
        let record = ReadingRecord::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let row = formatter.format_row(&previous_row(), &record).unwrap();

        assert_eq!(
            row,
            vec![
                json!("01.06.2024"),
                json!(100),
                json!(1.5),
                json!("x"),
                json!(0),
                json!("note"),
            ]
        );
    }

    #[test]
    fn test_uses_supplied_values() {
        let formatter = DefaultFormatter::new(ServiceName::Water);
        let record = ReadingRecord::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
            .with_counter_value(Some(112))
            .with_tariff(Some(2.25))
            .with_tariff_preferential(Some(0.5));

        let row = formatter.format_row(&previous_row(), &record).unwrap();

        assert_eq!(row[1], json!(112));
        assert_eq!(row[2], json!(2.25));
        assert_eq!(row.len(), COLUMNS.width());
    }

    #[test]
    fn test_short_previous_row() {
        let formatter = DefaultFormatter::new(ServiceName::Gas);
        let record = ReadingRecord::new(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());

        let row = formatter
            .format_row(&[json!("01.05.2024"), json!(100), json!(1.5)], &record)
            .unwrap();

        assert_eq!(row[3], json!(""));
        assert_eq!(row[5], json!(""));
        assert_eq!(row.len(), 6);
    }
}
