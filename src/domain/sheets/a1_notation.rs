use std::fmt::Formatter;

use super::{column::Column, row::Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct A1Notation(pub String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

fn qualify(sheet_name: Option<&str>, local: String) -> A1Notation {
    match sheet_name {
        Some(sheet_name) => A1Notation(format!("{}!{}", sheet_name, local)),
        None => A1Notation(local),
    }
}

/// Whole columns from `start` to `end`, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpan {
    pub start: Column,
    pub end: Column,
}

impl ColumnSpan {
    pub const fn new(start: Column, end: Column) -> Self {
        ColumnSpan { start, end }
    }

    /// Number of cells a row of this span holds.
    pub fn width(&self) -> usize {
        (self.end.value() + 1).saturating_sub(self.start.value()) as usize
    }

    pub fn at_row(self, row: Row) -> RowSpan {
        RowSpan {
            columns: self,
            row,
        }
    }
}

impl ToA1Notation for ColumnSpan {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        qualify(sheet_name, format!("{}:{}", self.start, self.end))
    }
}

/// A one row tall slice of a [`ColumnSpan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSpan {
    pub columns: ColumnSpan,
    pub row: Row,
}

impl ToA1Notation for RowSpan {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        qualify(
            sheet_name,
            format!(
                "{}{}:{}{}",
                self.columns.start, self.row, self.columns.end, self.row
            ),
        )
    }
}
