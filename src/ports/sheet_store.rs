use serde::Serialize;
use thiserror::Error;

use crate::domain::sheets::{a1_notation::A1Notation, cell::RowValues};

#[derive(Error, Debug)]
pub enum SheetStoreError {
    #[error("Failed to read range from the sheet store")]
    ReadFailed,
    #[error("Failed to write range to the sheet store")]
    WriteFailed,
}

/// What the store reports back after a write.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedRange {
    pub spreadsheet_id: Option<String>,
    pub updated_range: Option<String>,
    pub updated_rows: Option<i32>,
    pub updated_columns: Option<i32>,
    pub updated_cells: Option<i32>,
    /// The values as applied, when the store echoes them.
    pub updated_data: Option<Vec<RowValues>>,
}

#[async_trait::async_trait]
pub trait SheetStore: Send + Sync {
    /// Reads a range with formulas left as text rather than evaluated.
    async fn read_formulas(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<RowValues>, SheetStoreError>;

    /// Writes rows as if typed by a user, so formulas get evaluated.
    async fn write_rows(
        &self,
        range: &A1Notation,
        rows: Vec<RowValues>,
    ) -> error_stack::Result<UpdatedRange, SheetStoreError>;
}
