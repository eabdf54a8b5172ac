use std::{str::FromStr, sync::Arc};

use error_stack::{report, ResultExt};
use strum::VariantNames;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    domain::{ReadingRecord, ServiceName},
    ports::sheet_store::{SheetStore, UpdatedRange},
};

#[derive(Error, Debug)]
pub enum ImporterError {
    #[error("Invalid service: {0}")]
    InvalidService(String),
    #[error("Failed to read the service history")]
    ReadFailed,
    #[error("Failed to format the new row")]
    FormatFailed,
    #[error("Failed to write the new row")]
    WriteFailed,
}

/// Puts one reading into the tab of its service: a single read of the tab
/// followed by a single write of one row.
pub struct UtilitiesCounterImporter {
    store: Arc<dyn SheetStore>,
}

impl std::fmt::Debug for UtilitiesCounterImporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UtilitiesCounterImporter")
            .field("store", &"<SheetStore>")
            .finish()
    }
}

impl UtilitiesCounterImporter {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn add_record(
        &self,
        service_name: &str,
        record: ReadingRecord,
    ) -> error_stack::Result<UpdatedRange, ImporterError> {
        let service = ServiceName::from_str(service_name)
            .map_err(|_| report!(ImporterError::InvalidService(service_name.to_owned())))
            .attach_printable_lazy(|| {
                format!("Expected one of: {}", ServiceName::VARIANTS.join(", "))
            })?;
        let formatter = service.formatter();

        let existing_rows = self
            .store
            .read_formulas(&formatter.column_range())
            .await
            .change_context(ImporterError::ReadFailed)
            .attach_printable_lazy(|| format!("Service: {}", service))?;

        let formatted = formatter
            .format_range(&existing_rows, &record)
            .change_context(ImporterError::FormatFailed)
            .attach_printable_lazy(|| format!("Service: {}", service))?;

        info!(
            "{:?} of {} reading for {} at {}",
            formatted.mode, service, record.date, formatted.range
        );

        self.store
            .write_rows(&formatted.range, formatted.rows)
            .await
            .change_context(ImporterError::WriteFailed)
    }
}
