pub mod default;
pub mod electric;
pub mod rent;

use chrono::NaiveDate;
use error_stack::{report, ResultExt};
use thiserror::Error;

use super::{
    reading::ReadingRecord,
    service::ServiceName,
    sheets::{
        a1_notation::{A1Notation, ColumnSpan, ToA1Notation},
        cell::{cell_at, is_formula, parse_date, Cell, RowValues},
        formula_shift::shift_row_refs,
        row::Row,
    },
};

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("No previous row to carry values from")]
    EmptySheet,
    #[error("Row date is not in DD.MM.YYYY format")]
    InvalidRowDate,
    #[error("Previous exchange rate cell does not end with a decimal in parentheses")]
    ExchangeRateNotFound,
    #[error("Billing period does not fit in the calendar")]
    InvalidBillingPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The last row already holds a reading for the requested date.
    Overwrite,
    Append,
}

/// Where the new row goes and what it holds.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedRange {
    pub range: A1Notation,
    pub target: Row,
    pub mode: WriteMode,
    /// Always exactly one row.
    pub rows: Vec<RowValues>,
}

/// Lays out the row of one kind of service.
pub trait RowFormatter: Send + Sync {
    fn service(&self) -> ServiceName;

    fn range_template(&self) -> ColumnSpan;

    fn row_date(&self, row: &[Cell]) -> error_stack::Result<NaiveDate, FormatError> {
        date_in_column(row, 0)
    }

    fn format_row(
        &self,
        previous_row: &[Cell],
        record: &ReadingRecord,
    ) -> error_stack::Result<RowValues, FormatError>;

    /// The whole history of the service, e.g. `gas!C:H`.
    fn column_range(&self) -> A1Notation {
        self.range_template()
            .to_a1_notation(Some(self.service().sheet_title()))
    }

    fn format_range(
        &self,
        existing_rows: &[RowValues],
        record: &ReadingRecord,
    ) -> error_stack::Result<FormattedRange, FormatError> {
        let last_row = existing_rows
            .last()
            .ok_or_else(|| report!(FormatError::EmptySheet))
            .attach_printable_lazy(|| format!("Sheet '{}' has no rows", self.service()))?;
        let last = Row::last_of(existing_rows.len());

        let (target, mode, previous_row) = if self.row_date(last_row)? == record.date {
            (last, WriteMode::Overwrite, last_row.clone())
        } else {
            // The new row lands below the last one, so its formulas follow it.
            let shifted = last_row
                .iter()
                .map(|cell| {
                    if is_formula(cell) {
                        shift_row_refs(cell)
                    } else {
                        cell.clone()
                    }
                })
                .collect::<RowValues>();
            (last.next(), WriteMode::Append, shifted)
        };

        let row = self.format_row(&previous_row, record)?;
        debug_assert_eq!(row.len(), self.range_template().width());

        tracing::debug!(
            "{:?} {} at row {}: {:?}",
            mode,
            self.service(),
            target,
            row
        );

        Ok(FormattedRange {
            range: self
                .range_template()
                .at_row(target)
                .to_a1_notation(Some(self.service().sheet_title())),
            target,
            mode,
            rows: vec![row],
        })
    }
}

pub(crate) fn date_in_column(
    row: &[Cell],
    column: usize,
) -> error_stack::Result<NaiveDate, FormatError> {
    let cell = cell_at(row, column);
    cell.as_str()
        .and_then(parse_date)
        .ok_or_else(|| report!(FormatError::InvalidRowDate))
        .attach_printable_lazy(|| format!("Cell {} of the last row holds {}", column, cell))
}

/// The user supplied value, or the cell of the previous row when absent.
pub(crate) fn carried<T: Into<Cell>>(value: Option<T>, previous_row: &[Cell], index: usize) -> Cell {
    match value {
        Some(value) => value.into(),
        None => cell_at(previous_row, index),
    }
}
