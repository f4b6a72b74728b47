//! Datadis to InfluxDB2 Exporter
//!
//! This application downloads electricity readings for one metering point (CUPS)
//! from the Datadis platform and writes them to InfluxDB2 as line protocol.
//!
//! # Architecture
//!
//! Each invocation performs a single run and exits; schedule it externally
//! (cron, systemd timer, Kubernetes CronJob). A run:
//! - Logs in and fetches the supply and contract concurrently
//! - Fetches hourly consumption for the last month and maximum power for the
//!   current year concurrently
//! - Uploads every reading as one gzip-compressed batch
//!
//! Transient HTTP failures are retried with exponential backoff. Any other
//! failure aborts the run with a non-zero exit code.

mod config;
mod datadis;
mod error;
mod exporter;
mod influxdb;
mod model;
mod transport;


use crate::exporter::Exporter;
use crate::transport::RetryingClient;
use chrono::Local;
use std::process::ExitCode;

/// Application entry point.
///
/// Initializes logging, runs one export, and maps the outcome to the exit code.
#[tokio::main]
async fn main() -> ExitCode {
    let app_config = config::load_app_config();
    tracing_subscriber::fmt()
        .with_max_level(config::startup_log_level(&app_config))
        .init();
    if let Err(e) = &app_config {
        tracing::warn!("{:#}; logging at INFO", e);
    }

    match run().await {
        Ok(lines) => {
            tracing::info!("Export finished: {} lines written", lines);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Export failed: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Loads configuration, wires the clients together and performs one export.
///
/// # Returns
///
/// The number of lines written to InfluxDB.
async fn run() -> anyhow::Result<usize> {
    let http_config = config::load_http_config()?;
    let datadis_config = config::load_datadis_config()?;
    let influx_config = config::load_influx_config()?;
    tracing::debug!("{:?}", datadis_config);
    tracing::debug!("{:?}", influx_config);

    let transport = RetryingClient::new(&http_config)?;
    let datadis_client = datadis::Client::new(datadis_config, transport.clone());
    let influx_client = influxdb::Client::new(influx_config, transport);

    let exporter = Exporter::new(datadis_client, Box::new(influx_client));
    Ok(exporter.run(Local::now().date_naive()).await?)
}
