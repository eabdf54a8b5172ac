use std::fmt::Debug;

use error_stack::ResultExt;
use google_sheets4::{
    api::{Scope, UpdateValuesResponse, ValueRange},
    Sheets,
};
use thiserror::Error;
use tracing::{debug, instrument};

use super::{
    auth,
    http_client::{self, HttpsConnector},
    value_range_factory::ValueRangeFactory,
};
use crate::{
    config::sheets_config::SpreadsheetConfig,
    domain::sheets::{a1_notation::A1Notation, cell::RowValues},
    ports::sheet_store::{SheetStore, SheetStoreError, UpdatedRange},
};

pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<HttpsConnector>,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpreadsheetManager {{ config: {:?} }}", self.config)
    }
}

#[derive(Error, Debug)]
pub enum SpreadsheetManagerError {
    #[error("Failed to authenticate against Google Sheets")]
    FailedToAuthenticate,
    #[error("Failed to fetch range")]
    FailedToFetchRange,
    #[error("Failed to write range")]
    FailedToWriteRange,
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(
        config: SpreadsheetConfig,
    ) -> error_stack::Result<Self, SpreadsheetManagerError> {
        let client = http_client::http_client();
        let auth = auth::auth(&config, client.clone())
            .await
            .change_context(SpreadsheetManagerError::FailedToAuthenticate)?;
        let hub = Sheets::new(client, auth);

        Ok(SpreadsheetManager { config, hub })
    }

    /// Reads a range with formulas as typed and dates as displayed.
    #[instrument]
    pub async fn read_range(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<ValueRange, SpreadsheetManagerError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .value_render_option("FORMULA")
            .date_time_render_option("FORMATTED_STRING")
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .change_context(SpreadsheetManagerError::FailedToFetchRange)
            .attach_printable_lazy(|| format!("Failed to fetch range {}", range))?;

        Ok(response.1)
    }

    #[instrument(skip(value_range))]
    pub async fn write_range(
        &self,
        range: &A1Notation,
        value_range: ValueRange,
    ) -> error_stack::Result<UpdateValuesResponse, SpreadsheetManagerError> {
        self.hub
            .spreadsheets()
            .values_update(value_range, &self.config.spreadsheet_id, range.as_ref())
            .value_input_option("USER_ENTERED")
            .include_values_in_response(true)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|(_, response)| response)
            .change_context(SpreadsheetManagerError::FailedToWriteRange)
            .attach_printable_lazy(|| format!("Failed to write to range {}", range))
    }
}

impl From<UpdateValuesResponse> for UpdatedRange {
    fn from(response: UpdateValuesResponse) -> Self {
        UpdatedRange {
            spreadsheet_id: response.spreadsheet_id,
            updated_range: response.updated_range,
            updated_rows: response.updated_rows,
            updated_columns: response.updated_columns,
            updated_cells: response.updated_cells,
            updated_data: response.updated_data.map(ValueRange::into_rows),
        }
    }
}

#[async_trait::async_trait]
impl SheetStore for SpreadsheetManager {
    async fn read_formulas(
        &self,
        range: &A1Notation,
    ) -> error_stack::Result<Vec<RowValues>, SheetStoreError> {
        let rows = self
            .read_range(range)
            .await
            .change_context(SheetStoreError::ReadFailed)?
            .into_rows();
        debug!("Read {} rows from {}", rows.len(), range);
        Ok(rows)
    }

    async fn write_rows(
        &self,
        range: &A1Notation,
        rows: Vec<RowValues>,
    ) -> error_stack::Result<UpdatedRange, SheetStoreError> {
        self.write_range(range, ValueRange::from_rows(range, rows))
            .await
            .map(UpdatedRange::from)
            .change_context(SheetStoreError::WriteFailed)
    }
}
