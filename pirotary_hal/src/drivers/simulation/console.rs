//! Line-oriented console for the interactive simulation.
//!
//! ```text
//! lift            lift the handset
//! hang            put the handset back
//! dial 124        dial digits one rotation at a time
//! rotate 7        one rotation with a raw number of pulse edges
//! ```

use super::io::SimHandle;
use std::io::BufRead;
use tracing::{info, warn};

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Lift the handset.
    Lift,
    /// Replace the handset.
    Hang,
    /// Dial a digit string.
    Dial(String),
    /// One rotation with a raw edge count.
    Rotate(u32),
}

/// Parse one console line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_ascii_lowercase();
    let arg = words.next();

    match (verb.as_str(), arg) {
        ("lift" | "pickup" | "up", None) => Ok(Some(ConsoleCommand::Lift)),
        ("hang" | "hangup" | "down", None) => Ok(Some(ConsoleCommand::Hang)),
        ("dial", Some(digits)) if digits.bytes().all(|b| b.is_ascii_digit()) => {
            Ok(Some(ConsoleCommand::Dial(digits.to_string())))
        }
        ("rotate", Some(edges)) => edges
            .parse()
            .map(|n| Some(ConsoleCommand::Rotate(n)))
            .map_err(|_| format!("invalid edge count '{edges}'")),
        _ => Err(format!("unknown command '{line}'")),
    }
}

/// Apply a command to the simulated pins.
pub fn apply(command: &ConsoleCommand, handle: &SimHandle) {
    match command {
        ConsoleCommand::Lift => {
            handle.lift_handset();
        }
        ConsoleCommand::Hang => {
            handle.replace_handset();
        }
        ConsoleCommand::Dial(digits) => handle.dial(digits),
        ConsoleCommand::Rotate(edges) => handle.rotate(*edges),
    }
}

/// Read commands until end of input.
pub fn run<R: BufRead>(reader: R, handle: &SimHandle) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("console read failed: {e}");
                break;
            }
        };
        match parse(&line) {
            Ok(Some(command)) => {
                info!("console: {:?}", command);
                apply(&command, handle);
            }
            Ok(None) => {}
            Err(e) => warn!("console: {e}"),
        }
    }
    info!("Simulation console closed");
}
