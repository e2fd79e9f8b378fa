//! Game configuration
//!
//! Defaults match the shipped game. The browser build only reads the mute
//! flag from the URL fragment; the native runner can load a JSON file.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::music::NoteTableKind;

/// Errors raised when validating or loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must have at least one beat and one pitch (got {beats}x{pitches})")]
    EmptyGrid { beats: usize, pitches: usize },
    #[error("at least one player is required")]
    NoPlayers,
    #[error("player count {0} does not fit a player id")]
    TooManyPlayers(usize),
    #[error("initial mine count {count} exceeds mine limit {limit}")]
    TooManyInitialMines { count: usize, limit: usize },
    #[error("tempo {0} bpm is below the minimum")]
    InvalidTempo(f64),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in beats
    pub beats: usize,
    /// Grid height in pitch rows
    pub pitches: usize,
    /// Random mines placed at game start
    pub initial_mines: usize,
    /// Cap for random mine placement
    pub mine_limit: usize,
    /// Players spawned at beat 0; ids are `u32`
    pub player_count: usize,
    /// Sequencer tempo (bpm)
    pub tempo: f64,
    /// Suppress all audio playback
    pub muted: bool,
    /// Which note table rows are mapped through
    pub note_table: NoteTableKind,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            beats: BEATS,
            pitches: PITCHES,
            initial_mines: MINE_COUNT,
            mine_limit: MINE_LIMIT,
            player_count: PLAYER_COUNT,
            tempo: STARTING_TEMPO,
            muted: false,
            note_table: NoteTableKind::MinorChord,
        }
    }
}

impl GameConfig {
    /// Default config with the mute flag taken from a URL fragment
    pub fn from_url_hash(hash: &str) -> Self {
        Self {
            muted: hash == MUTED_HASH,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config; missing fields use defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.beats == 0 || self.pitches == 0 {
            return Err(ConfigError::EmptyGrid {
                beats: self.beats,
                pitches: self.pitches,
            });
        }
        if self.player_count == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if u32::try_from(self.player_count).is_err() {
            return Err(ConfigError::TooManyPlayers(self.player_count));
        }
        if self.initial_mines > self.mine_limit {
            return Err(ConfigError::TooManyInitialMines {
                count: self.initial_mines,
                limit: self.mine_limit,
            });
        }
        if self.tempo.is_nan() || self.tempo < MIN_TEMPO {
            return Err(ConfigError::InvalidTempo(self.tempo));
        }
        Ok(())
    }

    /// Load config from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let hash = web_sys::window()
            .and_then(|w| w.location().hash().ok())
            .unwrap_or_default();

        let config = Self::from_url_hash(&hash);
        if config.muted {
            log::info!("Audio muted via URL fragment");
        }
        config
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
