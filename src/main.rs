use std::process::ExitCode;

use chrono::Local;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Registry};
use utilities_counter_importer::{
    cli::{self, Args},
    config::app_config::AppConfig,
    prettyprint::prettyprint::PrettyFormatter,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let app_config = match AppConfig::load() {
        Ok(app_config) => app_config,
        Err(report) => {
            eprintln!("{:?}", report);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = setup_tracing(args.verbose, app_config.log_file.as_deref()) {
        eprintln!("Failed to set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    match cli::run(args, app_config, Local::now().date_naive()).await {
        Ok(response) => {
            println!("{}", response);
            info!("Reading imported");
            ExitCode::SUCCESS
        }
        Err(report) => {
            error!("{:?}", report);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing(verbose: u8, log_file: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(std::io::stderr);

    let log_file_layer = match log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .event_format(PrettyFormatter::new(false))
                .with_writer(std::fs::File::create(path)?)
                .with_ansi(false),
        ),
        None => None,
    };

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("utilities_counter_importer", level),
        )
        .with(log_file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}
