//! Dialer context.
//!
//! One owned struct holds the driver, the executor, the catalog and every
//! piece of dialing state. Handlers receive it by `&mut`.

use crate::action::executor::ActionExecutor;
use crate::command::buffer::DigitBuffer;
use crate::command::table::CommandTable;
use crate::config::{DialerConfig, DialerSettings, ExternalCommands};
use crate::gate::InterruptGate;
use crate::state::amplifier::Amplifier;
use crate::state::line::LineState;
use crate::state::pulse::{DialerState, PulseDecoder};
use pirotary_common::catalog::Catalog;
use pirotary_common::gpio::driver::GpioDriver;
use pirotary_common::gpio::types::{InputLine, Level, OutputLine};
use tracing::{info, warn};

/// Everything the handlers read and mutate.
pub struct DialerContext {
    pub(crate) gpio: Box<dyn GpioDriver>,
    pub(crate) executor: Box<dyn ActionExecutor>,
    pub(crate) catalog: Catalog,
    pub(crate) commands: ExternalCommands,
    pub(crate) settings: DialerSettings,
    pub(crate) table: CommandTable,
    pub(crate) gate: InterruptGate,
    pub(crate) line: LineState,
    pub(crate) decoder: PulseDecoder,
    pub(crate) buffer: DigitBuffer,
    pub(crate) amplifier: Amplifier,
    pub(crate) track_position: usize,
}

impl DialerContext {
    /// Build the context. The driver must already be initialized.
    pub fn new(
        config: &DialerConfig,
        catalog: Catalog,
        gpio: Box<dyn GpioDriver>,
        executor: Box<dyn ActionExecutor>,
    ) -> Self {
        let table = CommandTable::standard(catalog.playlist.len());
        info!(
            "Dialer context: {} commands, {}-digit codes, driver {} v{}",
            table.entries().len(),
            config.dialer.capacity,
            gpio.name(),
            gpio.version()
        );
        Self {
            gpio,
            executor,
            catalog,
            commands: config.commands.clone(),
            settings: config.dialer,
            table,
            gate: InterruptGate::new(),
            line: LineState::OnHook,
            decoder: PulseDecoder::new(),
            buffer: DigitBuffer::new(config.dialer.capacity),
            amplifier: Amplifier::new(config.amplifier),
            track_position: 0,
        }
    }

    // ─── Accessors ──────────────────────────────────────────────────

    /// Handset position as last handled.
    pub fn line_state(&self) -> LineState {
        self.line
    }

    /// Rotation state.
    pub fn dialer_state(&self) -> DialerState {
        self.decoder.state()
    }

    /// Pending digits.
    pub fn digits(&self) -> &DigitBuffer {
        &self.buffer
    }

    /// Index of the track the next-track command plays.
    pub fn track_position(&self) -> usize {
        self.track_position
    }

    /// Amplifier prediction.
    pub fn amplifier(&self) -> &Amplifier {
        &self.amplifier
    }

    /// Callback registrations.
    pub fn gate(&self) -> &InterruptGate {
        &self.gate
    }

    /// Loaded catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Command table in match order.
    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    // ─── Helpers ────────────────────────────────────────────────────

    /// Drive an output; failures are logged.
    pub(crate) fn write(&mut self, output: OutputLine, level: Level) {
        if let Err(e) = self.gpio.write(output, level) {
            warn!("{:?} write failed: {}", output, e);
        }
    }

    /// Read the hook switch; a failed read counts as on hook.
    pub(crate) fn read_line(&self) -> LineState {
        match self.gpio.read(InputLine::LineSwitch) {
            Ok(level) => LineState::from(level),
            Err(e) => {
                warn!("hook switch read failed: {}", e);
                LineState::OnHook
            }
        }
    }

    /// Back to the initial dialing state: no digits, no rotation, first
    /// track, amplifier released.
    pub(crate) fn reset_dialing(&mut self) {
        self.buffer.reset();
        self.decoder.reset();
        self.track_position = 0;
        self.amplifier.release();
        self.write(OutputLine::PulseLed, Level::Low);
    }
}
