//! Beat Mines - A rhythm game on a beat grid
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, actors, commands, sequencer)
//! - `music`: Note tables mapping grid rows to pitches
//! - `input`: Keyboard decoding into player commands
//! - `config`: Game configuration and its sources
//! - `render`: Tile view model (+ Canvas 2D renderer on wasm)
//! - `audio`: Web Audio synthesis (wasm only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod input;
pub mod music;
pub mod render;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use input::{CommandError, command_for_key, command_for_key_code};
pub use music::{Note, NoteDuration, NoteTable, NoteTableKind};

/// Game configuration constants
pub mod consts {
    /// Grid width (sequencer steps per sweep)
    pub const BEATS: usize = 8;
    /// Grid height (note rows)
    pub const PITCHES: usize = 3;
    /// Mines placed at game start
    pub const MINE_COUNT: usize = 2;
    /// Random placement stops once this many mines exist
    pub const MINE_LIMIT: usize = 9;
    /// Players spawned at game start
    pub const PLAYER_COUNT: usize = 1;
    /// Sequencer tempo in beats per minute
    pub const STARTING_TEMPO: f64 = 240.0;
    /// Lowest tempo the sequencer accepts
    pub const MIN_TEMPO: f64 = 1.0;

    /// URL fragment that mutes all playback
    pub const MUTED_HASH: &str = "#muted";
}

/// Milliseconds between sequencer steps at the given tempo
#[inline]
pub fn beat_interval_ms(tempo: f64) -> f64 {
    60_000.0 / tempo
}
