//! Simulation driver implementation.
//!
//! The `SimulationDriver` implements the `GpioDriver` trait on top of a
//! [`SimHandle`], so the dialer can run on a development machine with no
//! telephone attached.

use super::console;
use super::io::SimHandle;
use pirotary_common::gpio::config::GpioPins;
use pirotary_common::gpio::driver::{GpioDriver, GpioError};
use pirotary_common::gpio::types::{EdgeEvent, InputLine, Level, OutputLine};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Simulation driver implementing the GpioDriver trait.
pub struct SimulationDriver {
    /// Shared pin state
    handle: SimHandle,
    /// Pin map received on init (logged only)
    pins: Option<GpioPins>,
    /// Read console commands from stdin once started
    interactive: bool,
    /// Console thread, when interactive
    console: Option<JoinHandle<()>>,
}

impl SimulationDriver {
    /// Create a driver driven only through its [`SimHandle`].
    pub fn new() -> Self {
        Self {
            handle: SimHandle::new(),
            pins: None,
            interactive: false,
            console: None,
        }
    }

    /// Create a driver that reads `lift` / `hang` / `dial N` from stdin.
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            ..Self::new()
        }
    }

    /// Handle for injecting input edges and inspecting outputs.
    pub fn handle(&self) -> SimHandle {
        self.handle.clone()
    }

    fn ensure_init(&self) -> Result<(), GpioError> {
        if self.pins.is_some() {
            Ok(())
        } else {
            Err(GpioError::NotInitialized)
        }
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioDriver for SimulationDriver {
    fn name(&self) -> &'static str {
        pirotary_common::gpio::consts::SIMULATION_DRIVER
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn init(&mut self, pins: &GpioPins, events: Sender<EdgeEvent>) -> Result<(), GpioError> {
        info!(
            "Simulation GPIO: line={} dial={} pulse={} amp_power={} amp_mode={}",
            pins.line_switch, pins.dial_detect, pins.pulse, pins.amp_power, pins.amp_mode
        );
        self.handle.connect(events);
        self.pins = Some(*pins);
        Ok(())
    }

    fn read(&self, input: InputLine) -> Result<Level, GpioError> {
        self.ensure_init()?;
        Ok(self.handle.input(input))
    }

    fn write(&mut self, output: OutputLine, level: Level) -> Result<(), GpioError> {
        self.ensure_init()?;
        debug!("sim write {:?} = {:?}", output, level);
        self.handle.write(output, level);
        Ok(())
    }

    fn set_edge_detect(&mut self, input: InputLine, enabled: bool) -> Result<(), GpioError> {
        self.ensure_init()?;
        self.handle.set_edge_detect(input, enabled);
        Ok(())
    }

    fn tick(&self) -> u64 {
        self.handle.tick()
    }

    fn start(&mut self) -> Result<(), GpioError> {
        self.ensure_init()?;
        if !self.interactive || self.console.is_some() {
            return Ok(());
        }

        let handle = self.handle.clone();
        let thread = std::thread::Builder::new()
            .name("sim-console".to_string())
            .spawn(move || {
                let stdin = std::io::stdin();
                console::run(stdin.lock(), &handle);
            })
            .map_err(|e| GpioError::InitFailed(format!("console thread: {e}")))?;

        info!("Simulation console ready: lift | hang | dial <digits> | rotate <edges>");
        self.console = Some(thread);
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), GpioError> {
        for output in OutputLine::ALL {
            self.handle.write(output, Level::Low);
        }
        self.handle.disconnect();
        if self.console.take().is_some() {
            // Blocked on stdin; left detached.
            warn!("Simulation console thread detached");
        }
        self.pins = None;
        Ok(())
    }
}
