//! rax-dest - Entry Point
//!
//! Copies a source tree into a destination directory using the options in a
//! TOML configuration file.

use log::{error, info};
use std::process::ExitCode;

use rax_dest::config::SinkConfig;
use rax_dest::error::handlers::log_error;
use rax_dest::sink::{Sink, copy_tree};
use rax_dest::utils::logging::setup_logging;

const DEFAULT_CONFIG: &str = "dest";

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let config_name = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let config = match SinkConfig::load(&config_name) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration {}: {}", config_name, e);
            return ExitCode::FAILURE;
        }
    };

    let options = match config.dest_options() {
        Ok(options) => options,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sink = match Sink::new(config.dest.as_str(), options) {
        Ok(sink) => sink,
        Err(e) => {
            error!("Cannot determine working directory: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Copying {} -> {}", config.source, config.dest);

    match copy_tree(&config.source_path(), config.buffer, sink).await {
        Ok(summary) => {
            info!("Done: {} entries written", summary.files);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_error(&e);
            ExitCode::FAILURE
        }
    }
}
