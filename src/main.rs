use anyhow::Result;
use spot_arbitrage_scanner::{
    config::Config,
    exchange::ExchangeError,
    scanner::{ArbitrageScanner, Reporter},
};
use std::io::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting spot arbitrage scanner");

    let config = Config::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    let scanner = ArbitrageScanner::new(&config).map_err(|e| {
        error!("Failed to initialize scanner: {:#}", e);
        e
    })?;

    let report = scanner.run().await.map_err(|e| {
        match e.downcast_ref::<ExchangeError>() {
            Some(failure) => error!(exchange = failure.exchange(), "Scan aborted: {:#}", e),
            None => error!("Scan aborted: {:#}", e),
        }
        e
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    Reporter::new(config.report.format).write(&report, &mut out)?;
    out.flush()?;

    info!("Scan complete");
    Ok(())
}
