//! dynamodb-export - DynamoDB table snapshot tool
//!
//! Entry point for the CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use dynamodb_export::config::{CliArgs, ExportConfig};
use dynamodb_export::output;
use dynamodb_export::progress::{
    print_empty_result, print_header, print_summary, ProgressReporter,
};
use dynamodb_export::scan::dynamo::DynamoTableSource;
use dynamodb_export::scan::Fetcher;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    // Parse CLI arguments
    let args = CliArgs::parse();

    // Validate and create config
    let config = ExportConfig::from_args(args).context("Invalid configuration")?;

    // Setup logging
    setup_logging(config.verbose)?;

    // Print header
    if config.show_progress {
        print_header(
            &config.table,
            &config.profile,
            &config.output_path.display().to_string(),
        );
    }

    let start_time = Instant::now();

    // Connect through the named profile; credential problems surface on
    // the first request
    info!(profile = %config.profile, table = %config.table, "Connecting to AWS DynamoDB");
    let source = DynamoTableSource::connect(&config.profile, &config.table).await;

    // Fetch everything before any writing begins
    let progress = config.show_progress.then(ProgressReporter::new);
    if let Some(ref p) = progress {
        p.set_status("Downloading...");
    }

    let fetcher = Fetcher::new(&source, config.filter.clone());
    let result = fetcher
        .fetch_all(|page| {
            if let Some(ref p) = progress {
                p.update(page);
            }
        })
        .await
        .context("Export failed")?;

    if let Some(ref p) = progress {
        match &result {
            Some(export) => p.finish(&format!(
                "Downloaded {} records",
                export.records.len()
            )),
            None => p.finish_and_clear(),
        }
    }

    // Write the output file (absent result writes nothing)
    let written = output::write_export(result.as_ref(), config.format, &config.output_path)
        .context("Failed to write output file")?;

    let duration = start_time.elapsed();

    match (&result, written) {
        (Some(export), true) => {
            info!(
                records = export.records.len(),
                path = %config.output_path.display(),
                "Export complete"
            );
            if config.show_progress {
                let file_size = std::fs::metadata(&config.output_path)
                    .ok()
                    .map(|m| m.len());
                print_summary(
                    export.records.len() as u64,
                    export.field_order.len() as u64,
                    duration,
                    &config.output_path.display().to_string(),
                    file_size,
                );
            }
        }
        _ => {
            info!("Scan produced no result; nothing written");
            if config.show_progress {
                print_empty_result();
            }
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("dynamodb_export=debug,warn")
    } else {
        EnvFilter::new("dynamodb_export=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}
