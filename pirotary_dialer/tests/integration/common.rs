//! Shared rig: simulation driver, recording executor and a small catalog.

use parking_lot::Mutex;
use pirotary_common::catalog::{Catalog, MessageCatalog, Playlist};
use pirotary_common::gpio::driver::GpioDriver;
use pirotary_dialer::action::executor::{
    ActionExecutor, ActionStatus, CapturedOutput, ExecutorError,
};
use pirotary_dialer::config::{AmplifierTiming, DialerConfig};
use pirotary_dialer::{Dialer, DialerContext};
use pirotary_hal::{SimHandle, SimulationDriver};
use std::sync::Arc;
use std::sync::mpsc;

pub type Journal = Arc<Mutex<Vec<Vec<String>>>>;
pub type Hook = Box<dyn FnMut(&[String], &SimHandle) + Send>;

pub const TITLES: [&str; 5] = ["Alpha", "Bravo", "Charlie", "Delta", "Echo"];
pub const FILES: [&str; 5] = ["a", "b", "c", "d", "e"];

/// Executor that records every command line and can poke the simulated
/// pins while a command "runs".
pub struct RecordingExecutor {
    journal: Journal,
    sim: SimHandle,
    stdout: Vec<u8>,
    hook: Option<Hook>,
}

impl RecordingExecutor {
    fn record(&mut self, argv: &[String]) -> Result<(), ExecutorError> {
        if argv.is_empty() {
            return Err(ExecutorError::EmptyCommand);
        }
        self.journal.lock().push(argv.to_vec());
        if let Some(hook) = self.hook.as_mut() {
            hook(argv, &self.sim);
        }
        Ok(())
    }
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, argv: &[String]) -> Result<ActionStatus, ExecutorError> {
        self.record(argv)?;
        Ok(ActionStatus::SUCCESS)
    }

    fn capture(&mut self, argv: &[String]) -> Result<CapturedOutput, ExecutorError> {
        self.record(argv)?;
        Ok(CapturedOutput {
            status: ActionStatus::SUCCESS,
            stdout: self.stdout.clone(),
        })
    }
}

pub fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| p.to_string()).collect()
}

pub fn test_config() -> DialerConfig {
    let mut config = DialerConfig::default();
    config.amplifier = AmplifierTiming::immediate();
    config.commands.tts = argv(&["tts"]);
    config.commands.player = argv(&["player"]);
    config.commands.reboot = argv(&["reboot"]);
    config.commands.weather = argv(&["weather"]);
    config
}

pub fn test_catalog(tracks: usize, help: usize) -> Catalog {
    let playlist = Playlist {
        files: FILES.iter().take(tracks).map(|f| f.to_string()).collect(),
        songs: TITLES.iter().take(tracks).map(|t| t.to_string()).collect(),
        tracks,
        folder: "/music".to_string(),
    };
    let messages = MessageCatalog {
        phrases: 9,
        help_sentences: help,
        messages: argv(&[
            "hello",
            "goodbye",
            "playlist",
            "playing all",
            "now playing",
            "unused",
            "there are",
            "tracks",
            "invalid number",
        ]),
        help: argv(&["dial 123 to play everything", "dial 124 for the titles"]),
        airport: "Milano Linate".to_string(),
        icao: "LIML".to_string(),
    };
    Catalog::new(playlist, messages).unwrap()
}

/// Options applied before the dialer starts.
pub struct RigOptions {
    pub tracks: usize,
    pub help: usize,
    pub config: DialerConfig,
    pub weather_report: &'static str,
    pub lifted: bool,
    pub hook: Option<Hook>,
}

impl Default for RigOptions {
    fn default() -> Self {
        Self {
            tracks: 3,
            help: 2,
            config: test_config(),
            weather_report: "",
            lifted: false,
            hook: None,
        }
    }
}

pub struct Rig {
    pub dialer: Dialer,
    pub sim: SimHandle,
    pub journal: Journal,
}

impl Rig {
    pub fn new(tracks: usize) -> Self {
        Self::with(RigOptions {
            tracks,
            ..RigOptions::default()
        })
    }

    pub fn with(options: RigOptions) -> Self {
        let mut driver = SimulationDriver::new();
        let sim = driver.handle();
        let (tx, rx) = mpsc::channel();
        driver.init(&options.config.pins, tx).unwrap();

        let journal = Journal::default();
        let executor = RecordingExecutor {
            journal: Arc::clone(&journal),
            sim: sim.clone(),
            stdout: options.weather_report.as_bytes().to_vec(),
            hook: options.hook,
        };

        if options.lifted {
            sim.lift_handset();
        }

        let catalog = test_catalog(options.tracks, options.help);
        let ctx = DialerContext::new(&options.config, catalog, Box::new(driver), Box::new(executor));
        let mut dialer = Dialer::new(ctx, rx);
        dialer.start();
        Self {
            dialer,
            sim,
            journal,
        }
    }

    pub fn ctx(&self) -> &DialerContext {
        self.dialer.context()
    }

    pub fn lift(&mut self) {
        self.sim.lift_handset();
        self.dialer.drain_pending();
    }

    pub fn hang(&mut self) {
        self.sim.replace_handset();
        self.dialer.drain_pending();
    }

    pub fn dial(&mut self, number: &str) {
        self.sim.dial(number);
        self.dialer.drain_pending();
    }

    pub fn rotate(&mut self, raw_edges: u32) {
        self.sim.rotate(raw_edges);
        self.dialer.drain_pending();
    }

    /// Sentences given to the speech program, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.last_args_of("tts")
    }

    /// Files given to the player, in order.
    pub fn played(&self) -> Vec<String> {
        self.last_args_of("player")
    }

    pub fn commands(&self) -> Vec<Vec<String>> {
        self.journal.lock().clone()
    }

    pub fn clear_journal(&self) {
        self.journal.lock().clear();
    }

    fn last_args_of(&self, program: &str) -> Vec<String> {
        self.journal
            .lock()
            .iter()
            .filter(|argv| argv[0] == program)
            .filter_map(|argv| argv.last().cloned())
            .collect()
    }
}
