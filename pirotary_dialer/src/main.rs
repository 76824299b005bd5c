//! # PiRotary Binary
//!
//! Rotary telephone front end for the announcement and music appliance.
//!
//! # Usage
//!
//! ```bash
//! # Simulation driver with the stdin console
//! pirotary --config pirotary.toml
//!
//! # Log the external commands instead of running them
//! pirotary --config pirotary.toml --dry-run -v
//!
//! # JSON logs for the journal
//! pirotary --json
//! ```

#![deny(warnings)]

use clap::Parser;
use pirotary_common::consts::DEFAULT_CONFIG_PATH;
use pirotary_common::gpio::consts::SIMULATION_DRIVER;
use pirotary_dialer::action::executor::{ActionExecutor, DryRunExecutor, SystemExecutor};
use pirotary_dialer::config::DialerConfig;
use pirotary_dialer::{Dialer, DialerContext, DialerError};
use pirotary_hal::DriverRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// PiRotary - rotary dial command decoder
#[derive(Parser, Debug)]
#[command(name = "pirotary")]
#[command(version)]
#[command(about = "Decodes rotary dial pulses into appliance commands")]
#[command(long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// GPIO driver to load
    #[arg(short, long, default_value = SIMULATION_DRIVER)]
    driver: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    /// Log external commands instead of running them
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("PiRotary startup failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // The log level comes from the config, so a config error is printed
    // before tracing exists.
    let config = match DialerConfig::load_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pirotary: {}: {}", args.config.display(), e);
            std::process::exit(1);
        }
    };

    setup_tracing(&args, &config);
    info!(
        "PiRotary v{} starting ({})",
        env!("CARGO_PKG_VERSION"),
        config.shared.service_name
    );

    let catalog = config.load_catalog().map_err(DialerError::from)?;

    let registry = DriverRegistry::with_builtin_drivers();
    let mut driver = registry.create_driver(&args.driver).map_err(|e| {
        warn!("Available drivers: {:?}", registry.list_drivers());
        DialerError::from(e)
    })?;

    let (events_tx, events_rx) = mpsc::channel();
    driver.init(&config.pins, events_tx)?;
    driver.start()?;

    let executor: Box<dyn ActionExecutor> = if args.dry_run {
        info!("Dry run: external commands are logged only");
        Box::new(DryRunExecutor::new())
    } else {
        Box::new(SystemExecutor::new())
    };

    let ctx = DialerContext::new(&config, catalog, driver, executor);
    let mut dialer = Dialer::new(ctx, events_rx);

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        flag.store(false, Ordering::SeqCst);
    })?;

    dialer.start();
    if let Err(e) = dialer.run(&running) {
        error!("Dialer loop error: {}", e);
    }
    dialer.shutdown()?;

    info!("PiRotary shutdown complete");
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and the config's level.
fn setup_tracing(args: &Args, config: &DialerConfig) {
    let default_level = if args.verbose {
        "debug"
    } else {
        config.shared.log_level.as_directive()
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
