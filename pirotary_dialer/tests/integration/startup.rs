//! Integration test: config and catalog files to a running dialer.

use super::common::{test_catalog, test_config};
use pirotary_common::gpio::consts::SIMULATION_DRIVER;
use pirotary_common::gpio::driver::GpioDriver;
use pirotary_common::gpio::types::EdgeEvent;
use pirotary_dialer::action::executor::DryRunExecutor;
use pirotary_dialer::config::DialerConfig;
use pirotary_dialer::state::LineState;
use pirotary_dialer::{Dialer, DialerContext, DialerError};
use pirotary_hal::{DriverRegistry, SimulationDriver};
use std::fs;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc;

const PLAYLIST_JSON: &str = r#"{
    "files": ["01_intro", "02_theme"],
    "songs": ["Intro", "Main theme"],
    "tracks": 2,
    "folder": "/srv/music"
}"#;

const MESSAGES_JSON: &str = r#"{
    "phrases": 8,
    "helpsentences": 1,
    "list": ["ready", "bye", "the playlist", "now all of", "playing", "", "we have", "songs"],
    "help": ["dial 111 for help"],
    "airport": "Linate",
    "ICAO": "LIML"
}"#;

fn write_files(dir: &std::path::Path) -> std::path::PathBuf {
    let playlist = dir.join("playlist.json");
    let messages = dir.join("comments.json");
    fs::write(&playlist, PLAYLIST_JSON).unwrap();
    fs::write(&messages, MESSAGES_JSON).unwrap();

    let config = dir.join("pirotary.toml");
    fs::write(
        &config,
        format!(
            r#"
[shared]
log_level = "debug"

[catalog]
playlist = "{}"
messages = "{}"

[amplifier]
power_hold_ms = 0
power_settle_ms = 0
mode_hold_ms = 0
"#,
            playlist.display(),
            messages.display()
        ),
    )
    .unwrap();
    config
}

#[test]
fn files_to_dialer() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_files(dir.path());

    let config = DialerConfig::load_file(&config_path).unwrap();
    let catalog = config.load_catalog().unwrap();
    assert_eq!(catalog.playlist.len(), 2);

    let registry = DriverRegistry::with_builtin_drivers();
    let mut driver = registry.create_driver(SIMULATION_DRIVER).unwrap();
    let (tx, rx) = mpsc::channel();
    driver.init(&config.pins, tx).unwrap();

    let executor = DryRunExecutor::new();
    let journal = executor.journal();
    let ctx = DialerContext::new(&config, catalog, driver, Box::new(executor));
    assert!(ctx.table().lookup(402).is_some());
    assert_eq!(ctx.table().lookup(403), None);

    let mut dialer = Dialer::new(ctx, rx);
    dialer.start();
    assert_eq!(dialer.context().line_state(), LineState::OnHook);
    assert!(journal.lock().is_empty());

    dialer.shutdown().unwrap();
}

#[test]
fn missing_catalog_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_files(dir.path());
    fs::remove_file(dir.path().join("comments.json")).unwrap();

    let config = DialerConfig::load_file(&config_path).unwrap();
    let err: DialerError = config.load_catalog().unwrap_err().into();
    assert!(matches!(err, DialerError::Catalog(_)));
}

#[test]
fn stopped_flag_returns_immediately() {
    let (mut dialer, _tx) = idle_dialer();
    let running = AtomicBool::new(false);
    assert!(dialer.run(&running).is_ok());
}

#[test]
fn dropped_event_source_ends_the_loop() {
    let (mut dialer, tx) = idle_dialer();
    drop(tx);
    let running = AtomicBool::new(true);
    assert!(matches!(
        dialer.run(&running),
        Err(DialerError::EventSourceClosed)
    ));
}

fn idle_dialer() -> (Dialer, mpsc::Sender<EdgeEvent>) {
    let config = test_config();
    let mut driver = SimulationDriver::new();
    let (driver_tx, _driver_rx) = mpsc::channel();
    driver.init(&config.pins, driver_tx).unwrap();

    // The dialer listens on a channel the driver does not feed.
    let (tx, rx) = mpsc::channel();
    let ctx = DialerContext::new(
        &config,
        test_catalog(2, 1),
        Box::new(driver),
        Box::new(DryRunExecutor::new()),
    );
    (Dialer::new(ctx, rx), tx)
}
