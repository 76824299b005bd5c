//! Ordered command table.
//!
//! Entries are checked in declaration order and the first match wins, so a
//! code can never reach two commands.

use pirotary_common::consts::{
    CODE_HELP, CODE_LIST_TITLES, CODE_NEXT_TRACK, CODE_PLAY_ALL, CODE_REBOOT, CODE_RESET,
    CODE_WEATHER, TRACK_SELECT_BASE,
};

/// A resolved command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Back to the initial dialing state.
    Reset,
    /// Play the track at the play position and advance it.
    NextTrack,
    /// Play every track in order.
    PlayAll,
    /// Speak every title.
    ListTitles,
    /// Play one track by zero-based index.
    SelectTrack(usize),
    /// Speak the help sentences.
    Help,
    /// Reboot the host.
    Reboot,
    /// Speak the weather report.
    Weather,
}

impl Command {
    /// Whether the callbacks are cancelled while the command runs.
    pub fn suspends_callbacks(&self) -> bool {
        !matches!(self, Command::Reboot)
    }
}

/// Kind of command an entry resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Reset,
    NextTrack,
    PlayAll,
    ListTitles,
    SelectTrack,
    Help,
    Reboot,
    Weather,
}

/// Codes an entry answers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeMatcher {
    /// A single code.
    Exact(u32),
    /// An inclusive range of codes.
    Range { first: u32, last: u32 },
}

impl CodeMatcher {
    /// Whether `value` matches.
    pub fn matches(&self, value: u32) -> bool {
        match *self {
            CodeMatcher::Exact(code) => value == code,
            CodeMatcher::Range { first, last } => (first..=last).contains(&value),
        }
    }
}

/// One table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEntry {
    /// Matching codes.
    pub matcher: CodeMatcher,
    /// What a match runs.
    pub kind: CommandKind,
}

impl CommandEntry {
    const fn exact(code: u32, kind: CommandKind) -> Self {
        Self {
            matcher: CodeMatcher::Exact(code),
            kind,
        }
    }

    /// Resolve `value` against this entry.
    pub fn resolve(&self, value: u32) -> Option<Command> {
        if !self.matcher.matches(value) {
            return None;
        }
        Some(match self.kind {
            CommandKind::Reset => Command::Reset,
            CommandKind::NextTrack => Command::NextTrack,
            CommandKind::PlayAll => Command::PlayAll,
            CommandKind::ListTitles => Command::ListTitles,
            CommandKind::SelectTrack => {
                let first = match self.matcher {
                    CodeMatcher::Range { first, .. } => first,
                    CodeMatcher::Exact(code) => code,
                };
                Command::SelectTrack((value - first) as usize)
            }
            CommandKind::Help => Command::Help,
            CommandKind::Reboot => Command::Reboot,
            CommandKind::Weather => Command::Weather,
        })
    }
}

/// Ordered list of entries.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    entries: Vec<CommandEntry>,
}

impl CommandTable {
    /// The appliance's command set for a playlist of `track_count` tracks.
    pub fn standard(track_count: usize) -> Self {
        let mut entries = vec![
            CommandEntry::exact(CODE_RESET, CommandKind::Reset),
            CommandEntry::exact(CODE_NEXT_TRACK, CommandKind::NextTrack),
            CommandEntry::exact(CODE_PLAY_ALL, CommandKind::PlayAll),
            CommandEntry::exact(CODE_LIST_TITLES, CommandKind::ListTitles),
        ];
        if track_count > 0 {
            entries.push(CommandEntry {
                matcher: CodeMatcher::Range {
                    first: TRACK_SELECT_BASE + 1,
                    last: TRACK_SELECT_BASE + track_count as u32,
                },
                kind: CommandKind::SelectTrack,
            });
        }
        entries.extend([
            CommandEntry::exact(CODE_HELP, CommandKind::Help),
            CommandEntry::exact(CODE_REBOOT, CommandKind::Reboot),
            CommandEntry::exact(CODE_WEATHER, CommandKind::Weather),
        ]);
        Self { entries }
    }

    /// First command matching `value`.
    pub fn lookup(&self, value: u32) -> Option<Command> {
        self.entries.iter().find_map(|entry| entry.resolve(value))
    }

    /// Entries in match order.
    pub fn entries(&self) -> &[CommandEntry] {
        &self.entries
    }
}
