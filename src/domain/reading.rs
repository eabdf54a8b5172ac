use chrono::NaiveDate;

/// One meter reading as entered by the user. Fields left as `None` are
/// carried forward from the previous row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingRecord {
    pub date: NaiveDate,
    pub counter_value: Option<i64>,
    pub tariff: Option<f64>,
    /// Only meaningful for electricity.
    pub tariff_preferential: Option<f64>,
}

impl ReadingRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            counter_value: None,
            tariff: None,
            tariff_preferential: None,
        }
    }

    pub fn with_counter_value(mut self, counter_value: Option<i64>) -> Self {
        self.counter_value = counter_value;
        self
    }

    pub fn with_tariff(mut self, tariff: Option<f64>) -> Self {
        self.tariff = tariff;
        self
    }

    pub fn with_tariff_preferential(mut self, tariff_preferential: Option<f64>) -> Self {
        self.tariff_preferential = tariff_preferential;
        self
    }
}
