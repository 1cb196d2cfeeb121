//! Formcheck command-line entry point
//!
//! Loads configuration, runs the form submission check once and reports the
//! outcome through the log, stdout and the exit code.

mod exit;

use anyhow::Context;
use formcheck_core::AppConfig;
use formcheck_flow::{FlowError, FormSubmissionCheck, RunReport};
use std::process::ExitCode;
use tracing::{error, info};

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,formcheck=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run() -> anyhow::Result<RunReport> {
    let config = AppConfig::load_with_env()
        .map_err(FlowError::from)
        .context("failed to load configuration")?;

    let check = FormSubmissionCheck::new(config).context("invalid configuration")?;
    let report = check.run().await.context("form submission check failed")?;
    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    info!("Starting formcheck v{}", env!("CARGO_PKG_VERSION"));

    match run().await {
        Ok(report) => {
            info!(
                "Submitted values displayed correctly ({} ms)",
                report.duration_ms().unwrap_or_default()
            );
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("Failed to serialize run report: {e}"),
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(code = exit::tag_for(&err), "{err:#}");
            exit::exit_code(&err)
        }
    }
}
