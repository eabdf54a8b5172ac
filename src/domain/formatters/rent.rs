use std::sync::LazyLock;

use chrono::{Datelike, Months, NaiveDate};
use error_stack::{report, ResultExt};
use regex::Regex;
use serde_json::Value;

use super::{date_in_column, FormatError, RowFormatter};
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

const PERIOD_START_DAY: u32 = 18;
const PERIOD_END_DAY: u32 = 17;
const PAYMENT_DATE_COLUMN: usize = 2;
const RATE_LINK_DATE_FORMAT: &str = "%d-%m-%Y";
const RATE_LINK_URL: &str = "https://minfin.com.ua/ua/currency/auction/archive/usd/ivano-frankovsk/";

// The rate is the last argument of the HYPERLINK call: `..., 41.25)`.
static TRAILING_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^.*\D(\d+\.\d+)\)$").expect("trailing rate pattern is valid")
});

/// Rent paid in a foreign currency:
/// `[period start, period end, payment date, rate link, amount, 0, note]`.
pub struct RentFormatter {
    service: ServiceName,
}

impl RentFormatter {
    pub fn new(service: ServiceName) -> Self {
        Self { service }
    }
}

/// The period a payment covers: the 18th of the payment month to the 17th of
/// the next one.
pub fn billing_period(
    payment_date: NaiveDate,
) -> error_stack::Result<(NaiveDate, NaiveDate), FormatError> {
    let start = payment_date
        .with_day(PERIOD_START_DAY)
        .ok_or_else(|| report!(FormatError::InvalidBillingPeriod))?;
    let end = start
        .checked_add_months(Months::new(1))
        .and_then(|next_month| next_month.with_day(PERIOD_END_DAY))
        .ok_or_else(|| report!(FormatError::InvalidBillingPeriod))
        .attach_printable_lazy(|| format!("No period end after {}", start))?;
    Ok((start, end))
}

pub fn exchange_rate_link(payment_date: NaiveDate, rate: &str) -> String {
    let date_arg = payment_date.format(RATE_LINK_DATE_FORMAT);
    format!(
        "=HYPERLINK(\"{}#fromDate={}&toDate={}\", {})",
        RATE_LINK_URL, date_arg, date_arg, rate
    )
}

/// Renders a rate the way [`previous_exchange_rate`] reads it back: always
/// with a decimal point, so `40.0` stays `40.0` rather than `40`.
pub fn rate_text(rate: f64) -> String {
    if rate.is_finite() && rate.fract() == 0.0 {
        format!("{:.1}", rate)
    } else {
        rate.to_string()
    }
}

/// Pulls the rate back out of a link built by [`exchange_rate_link`].
pub fn previous_exchange_rate(cell: &Cell) -> error_stack::Result<String, FormatError> {
    cell.as_str()
        .and_then(|text| TRAILING_RATE.captures(text))
        .and_then(|captures| captures.get(1))
        .map(|rate| rate.as_str().to_owned())
        .ok_or_else(|| report!(FormatError::ExchangeRateNotFound))
        .attach_printable_lazy(|| format!("Previous rate cell holds {}", cell))
}

impl RowFormatter for RentFormatter {
    fn service(&self) -> ServiceName {
        self.service
    }

    fn range_template(&self) -> ColumnSpan {
        COLUMNS
    }

    fn row_date(&self, row: &[Cell]) -> error_stack::Result<NaiveDate, FormatError> {
        date_in_column(row, PAYMENT_DATE_COLUMN)
    }

    fn format_row(
        &self,
        previous_row: &[Cell],
        record: &ReadingRecord,
    ) -> error_stack::Result<RowValues, FormatError> {
        let (period_start, period_end) = billing_period(record.date)?;
        let rate = match record.tariff {
            Some(tariff) => rate_text(tariff),
            None => previous_exchange_rate(&cell_at(previous_row, 3))?,
        };

        Ok(vec![
            date_cell(period_start),
            date_cell(period_end),
            date_cell(record.date),
            Value::String(exchange_rate_link(record.date, &rate)),
            cell_at(previous_row, 4),
            Value::from(0),
            cell_at(previous_row, 6),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::formatters::WriteMode;
    use serde_json::json;

    fn date(day: u32, month: u32, year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn previous_row() -> RowValues {
        vec![
            json!("18.02.2024"),
            json!("17.03.2024"),
            json!("16.02.2024"),
            json!(exchange_rate_link(date(16, 2, 2024), "38.15")),
            json!("=500*E12"),
            json!(0),
            json!("flat 4"),
        ]
    }

    #[test]
    fn test_billing_period() {
        assert_eq!(
            billing_period(date(18, 3, 2024)).unwrap(),
            (date(18, 3, 2024), date(17, 4, 2024))
        );
        assert_eq!(
            billing_period(date(3, 1, 2024)).unwrap(),
            (date(18, 1, 2024), date(17, 2, 2024))
        );
    }

    #[test]
    fn test_billing_period_rolls_over_year() {
        assert_eq!(
            billing_period(date(18, 12, 2024)).unwrap(),
            (date(18, 12, 2024), date(17, 1, 2025))
        );
    }

    #[test]
    fn test_exchange_rate_link() {
        assert_eq!(
            exchange_rate_link(date(16, 3, 2024), "38.9"),
            "=HYPERLINK(\"https://minfin.com.ua/ua/currency/auction/archive/usd/ivano-frankovsk/#fromDate=16-03-2024&toDate=16-03-2024\", 38.9)"
        );
    }

    #[test]
    fn test_previous_exchange_rate() {
        let link = json!(exchange_rate_link(date(16, 2, 2024), "38.15"));
        assert_eq!(previous_exchange_rate(&link).unwrap(), "38.15");
    }

    #[test]
    fn test_previous_exchange_rate_from_link_with_parenthesis_in_url() {
        let link = json!("=HYPERLINK(\"https://minfin.com.ua/ua/currency/auction/archive/usd/ivano-frankovsk/#fromDate=16-02-2024&toDate=16-02-2024)\", 38.15)");
        assert_eq!(previous_exchange_rate(&link).unwrap(), "38.15");
    }

    #[test]
    fn test_rate_text() {
        assert_eq!(rate_text(40.0), "40.0");
        assert_eq!(rate_text(39.5), "39.5");
        assert_eq!(rate_text(41.125), "41.125");
    }

    #[test]
    fn test_whole_rate_is_read_back_next_month() {
        let formatter = RentFormatter::new(ServiceName::Rent);
        let march = formatter
            .format_row(
                &previous_row(),
                &ReadingRecord::new(date(15, 3, 2024)).with_tariff(Some(40.0)),
            )
            .unwrap();
        assert_eq!(march[3], json!(exchange_rate_link(date(15, 3, 2024), "40.0")));

        let april = formatter
            .format_row(&march, &ReadingRecord::new(date(15, 4, 2024)))
            .unwrap();

        assert_eq!(april[3], json!(exchange_rate_link(date(15, 4, 2024), "40.0")));
    }

    #[test]
    fn test_previous_exchange_rate_requires_decimal_in_parentheses() {
        for cell in [json!("=HYPERLINK(\"x\", 38)"), json!("38.15"), json!(38.15), json!("")] {
            let report = previous_exchange_rate(&cell).unwrap_err();
            assert!(matches!(
                report.current_context(),
                FormatError::ExchangeRateNotFound
            ));
        }
    }

    #[test]
    fn test_format_row_reuses_previous_rate() {
        let formatter = RentFormatter::new(ServiceName::Rent);
        let record = ReadingRecord::new(date(15, 3, 2024));

        let row = formatter.format_row(&previous_row(), &record).unwrap();

        assert_eq!(
            row,
            vec![
                json!("18.03.2024"),
                json!("17.04.2024"),
                json!("15.03.2024"),
                json!(exchange_rate_link(date(15, 3, 2024), "38.15")),
                json!("=500*E12"),
                json!(0),
                json!("flat 4"),
            ]
        );
    }

    #[test]
    fn test_format_row_prefers_supplied_rate() {
        let formatter = RentFormatter::new(ServiceName::Rent);
        let mut previous = previous_row();
        previous[3] = json!("unknown");
        let record = ReadingRecord::new(date(15, 3, 2024)).with_tariff(Some(39.5));

        let row = formatter.format_row(&previous, &record).unwrap();

        assert_eq!(row[3], json!(exchange_rate_link(date(15, 3, 2024), "39.5")));
        assert_eq!(row.len(), COLUMNS.width());
    }

    #[test]
    fn test_format_row_fails_without_any_rate() {
        let formatter = RentFormatter::new(ServiceName::Rent);
        let mut previous = previous_row();
        previous[3] = json!("unknown");

        let report = formatter
            .format_row(&previous, &ReadingRecord::new(date(15, 3, 2024)))
            .unwrap_err();

        assert!(matches!(
            report.current_context(),
            FormatError::ExchangeRateNotFound
        ));
    }

    #[test]
    fn test_overwrite_is_decided_by_payment_date() {
        let formatter = RentFormatter::new(ServiceName::Rent);
        let rows = vec![vec![json!("Start")], previous_row()];

        let same_payment = formatter
            .format_range(&rows, &ReadingRecord::new(date(16, 2, 2024)))
            .unwrap();
        assert_eq!(same_payment.mode, WriteMode::Overwrite);
        assert_eq!(same_payment.range.as_ref(), "rent!B2:H2");

        let next_payment = formatter
            .format_range(&rows, &ReadingRecord::new(date(18, 2, 2024)))
            .unwrap();
        assert_eq!(next_payment.mode, WriteMode::Append);
        assert_eq!(next_payment.range.as_ref(), "rent!B3:H3");
        assert_eq!(next_payment.rows[0][4], json!("=500*E13"));
    }
}
