//! Breakfast Signal - A command-driven breakfast timer
//!
//! This is the main entry point for the breakfast-signal application.

use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{error, info};

use breakfast_signal::{
    config::Config,
    indicator::IndicatorDriver,
    scheduler::CookScheduler,
    transport::run_transport,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("breakfast_signal={}", config.log_level()))
        .init();

    info!("Starting breakfast-signal v1.0.0");
    let pins = config.pin_map();
    let source = config.command_source();
    info!(
        "Configuration: pins pending={} cooking={} ready={}, commands from {}",
        pins.pending, pins.cooking, pins.ready, source
    );

    let driver = Arc::new(if config.simulate {
        IndicatorDriver::simulated(pins)
    } else {
        IndicatorDriver::initialize(pins)
    });
    if driver.is_hardware_ready() {
        info!("Indicator LEDs driven through GPIO");
    } else {
        info!("Indicator LEDs simulated, changes are only logged");
    }

    let scheduler = CookScheduler::new(Arc::clone(&driver), Handle::current());

    // Deliver commands in the background; the process lives until a signal arrives
    let transport_scheduler = scheduler.clone();
    tokio::spawn(async move {
        if let Err(e) = run_transport(source, transport_scheduler).await {
            error!("Command transport stopped: {}", e);
        }
    });

    info!("Commands: START <minutes>, STOP. Press Ctrl+C to exit");
    let result = shutdown_signal().await;
    match &result {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signals: {}", e),
    }

    scheduler.shutdown();
    driver.teardown();

    info!("Shutdown complete");
    result.map_err(Into::into)
}
