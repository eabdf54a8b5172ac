use std::sync::Arc;

use chrono::NaiveDate;
use clap::{builder::PossibleValuesParser, ArgAction, Parser};
use error_stack::ResultExt;
use strum::VariantNames;
use thiserror::Error;
use tracing::instrument;

use crate::{
    adapters::sheets::spreadsheet_manager::SpreadsheetManager,
    application::importer::UtilitiesCounterImporter,
    config::app_config::AppConfig,
    domain::{sheets::cell::parse_date, ReadingRecord, ServiceName},
};

#[derive(Parser, Debug)]
#[command(
    name = "utilities_counter_importer",
    about = "Tool that imports utilities counters to a Google Sheets document."
)]
pub struct Args {
    /// ID of a Google Sheets document where utilities counters are to be imported to.
    pub spreadsheet_id: String,

    /// Name of the utility service.
    #[arg(value_parser = PossibleValuesParser::new(ServiceName::VARIANTS.iter().copied()))]
    pub service_name: String,

    /// Counter value as of report date. Use previous value by default.
    #[arg(long = "counter_value")]
    pub counter_value: Option<i64>,

    /// Path to a JSON file containing Google Cloud app credentials. Default is ./credentials.json
    #[arg(long, value_name = "FILE_PATH")]
    pub credentials: Option<String>,

    /// Where OAuth tokens are kept between runs. Default is ./token.json
    #[arg(long = "token_cache", value_name = "FILE_PATH")]
    pub token_cache: Option<String>,

    /// Report date in the format DD.MM.YYYY, today by default
    #[arg(long, value_name = "DD.MM.YYYY", value_parser = parse_report_date)]
    pub date: Option<NaiveDate>,

    /// Main tariff
    #[arg(long, value_name = "TARIFF")]
    pub tariff: Option<f64>,

    /// Service-specific preferential tariff
    #[arg(long = "tariff_preferential", value_name = "TARIFF")]
    pub tariff_preferential: Option<f64>,

    /// More logging, repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

fn parse_report_date(value: &str) -> Result<NaiveDate, String> {
    parse_date(value).ok_or_else(|| format!("'{}' is not a date in the DD.MM.YYYY format", value))
}

impl Args {
    pub fn reading_record(&self, today: NaiveDate) -> ReadingRecord {
        ReadingRecord::new(self.date.unwrap_or(today))
            .with_counter_value(self.counter_value)
            .with_tariff(self.tariff)
            .with_tariff_preferential(self.tariff_preferential)
    }
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Could not connect to Google Sheets")]
    Connect,
    #[error("Import failed")]
    Import,
    #[error("Could not print the update response")]
    Output,
}

/// Connects, imports the reading and renders the store's response as JSON.
#[instrument(skip(app_config))]
pub async fn run(
    args: Args,
    app_config: AppConfig,
    today: NaiveDate,
) -> error_stack::Result<String, CliError> {
    let sheets_config = app_config.spreadsheet_config(
        &args.spreadsheet_id,
        args.credentials.as_deref(),
        args.token_cache.as_deref(),
    );
    let spreadsheet_manager = SpreadsheetManager::new(sheets_config)
        .await
        .change_context(CliError::Connect)?;
    let importer = UtilitiesCounterImporter::new(Arc::new(spreadsheet_manager));

    let updated = importer
        .add_record(&args.service_name, args.reading_record(today))
        .await
        .change_context(CliError::Import)?;

    serde_json::to_string_pretty(&updated).change_context(CliError::Output)
}
