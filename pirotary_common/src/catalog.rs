//! Playlist and spoken-message catalog.
//!
//! Both files are JSON documents loaded once at startup; a missing or
//! malformed file is fatal. Field names follow the files already deployed on
//! the phones (`files`/`songs`/`tracks`/`folder` and
//! `phrases`/`helpsentences`/`list`/`help`/`airport`/`ICAO`).

use crate::consts::MAX_TRACKS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Message spoken when the handset is lifted.
pub const MSG_PICKUP: usize = 0;
/// Message spoken when the handset is replaced.
pub const MSG_HANGUP: usize = 1;
/// Second half of the play-all announcement.
pub const MSG_PLAYLIST: usize = 2;
/// First half of the play-all announcement.
pub const MSG_PLAY_ALL_INTRO: usize = 3;
/// Prefix spoken before every track title.
pub const MSG_NOW_PLAYING: usize = 4;
/// Text before the track count of the title listing.
pub const MSG_TITLES_INTRO: usize = 6;
/// Text after the track count of the title listing.
pub const MSG_TITLES_OUTRO: usize = 7;
/// Optional response to an unrecognized code.
pub const MSG_INVALID: usize = 8;

/// Messages that must be present for the mandatory announcements.
pub const MIN_MESSAGES: usize = MSG_TITLES_OUTRO + 1;

/// Error type for catalog loading.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// Catalog file not found.
    #[error("Catalog file not found: {0}")]
    FileNotFound(PathBuf),

    /// File could not be read or JSON is malformed.
    #[error("Failed to parse catalog {path}: {reason}")]
    ParseError {
        /// File being parsed.
        path: PathBuf,
        /// Underlying reader or JSON error.
        reason: String,
    },

    /// Content is inconsistent.
    #[error("Catalog validation failed: {0}")]
    ValidationError(String),
}

/// Ordered playlist of audio files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Playlist {
    /// File identifiers, without folder and extension.
    pub files: Vec<String>,
    /// Human-readable titles, one per file.
    pub songs: Vec<String>,
    /// Number of playable tracks.
    pub tracks: usize,
    /// Folder prefix of every file.
    pub folder: String,
}

impl Playlist {
    /// Number of playable tracks.
    pub fn len(&self) -> usize {
        self.tracks
    }

    /// Whether the playlist has no playable track.
    pub fn is_empty(&self) -> bool {
        self.tracks == 0
    }

    /// Title of the track at `index`.
    pub fn title(&self, index: usize) -> Option<&str> {
        if index < self.tracks {
            self.songs.get(index).map(String::as_str)
        } else {
            None
        }
    }

    /// Audio file of the track at `index`.
    pub fn track_path(&self, index: usize) -> Option<PathBuf> {
        if index >= self.tracks {
            return None;
        }
        self.files
            .get(index)
            .map(|file| Path::new(&self.folder).join(format!("{file}.mp3")))
    }

    /// Playable titles in order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.songs.iter().take(self.tracks).map(String::as_str)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.tracks > self.files.len() || self.tracks > self.songs.len() {
            return Err(CatalogError::ValidationError(format!(
                "playlist declares {} tracks but lists {} files and {} titles",
                self.tracks,
                self.files.len(),
                self.songs.len()
            )));
        }
        if self.tracks > MAX_TRACKS {
            return Err(CatalogError::ValidationError(format!(
                "playlist declares {} tracks, at most {MAX_TRACKS} can be selected",
                self.tracks
            )));
        }
        Ok(())
    }
}

/// Spoken-message catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageCatalog {
    /// Number of announcement strings.
    #[serde(default)]
    pub phrases: usize,
    /// Number of help sentences to speak.
    #[serde(rename = "helpsentences")]
    pub help_sentences: usize,
    /// Announcement strings.
    #[serde(rename = "list")]
    pub messages: Vec<String>,
    /// Help sentences.
    pub help: Vec<String>,
    /// Airport name spoken before the weather report.
    pub airport: String,
    /// ICAO code passed to the weather query.
    #[serde(rename = "ICAO")]
    pub icao: String,
}

impl MessageCatalog {
    /// Announcement at `index`, empty when absent.
    pub fn message(&self, index: usize) -> &str {
        self.messages.get(index).map(String::as_str).unwrap_or("")
    }

    /// Help sentences in order.
    pub fn help(&self) -> impl Iterator<Item = &str> {
        self.help.iter().take(self.help_sentences).map(String::as_str)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.messages.len() < MIN_MESSAGES {
            return Err(CatalogError::ValidationError(format!(
                "message list has {} entries, {MIN_MESSAGES} required",
                self.messages.len()
            )));
        }
        if self.help_sentences > self.help.len() {
            return Err(CatalogError::ValidationError(format!(
                "{} help sentences declared, {} listed",
                self.help_sentences,
                self.help.len()
            )));
        }
        Ok(())
    }
}

/// Everything the dialer speaks or plays.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Tracks.
    pub playlist: Playlist,
    /// Announcements and help.
    pub messages: MessageCatalog,
}

impl Catalog {
    /// Build a catalog from already-parsed parts.
    pub fn new(playlist: Playlist, messages: MessageCatalog) -> Result<Self, CatalogError> {
        playlist.validate()?;
        messages.validate()?;
        Ok(Self { playlist, messages })
    }

    /// Load and validate both catalog files.
    pub fn load(playlist_path: &Path, messages_path: &Path) -> Result<Self, CatalogError> {
        let playlist: Playlist = load_json(playlist_path)?;
        let messages: MessageCatalog = load_json(messages_path)?;
        let catalog = Self::new(playlist, messages)?;

        tracing::info!(
            "Catalog loaded: {} tracks, {} messages, {} help sentences",
            catalog.playlist.len(),
            catalog.messages.messages.len(),
            catalog.messages.help_sentences
        );
        Ok(catalog)
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound(path.to_path_buf())
        } else {
            CatalogError::ParseError {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| CatalogError::ParseError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
