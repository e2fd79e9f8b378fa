//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time is passed in by the caller (milliseconds)
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod command;
pub mod grid;
pub mod sequencer;
pub mod state;

pub use actor::{Mine, Player};
pub use command::Command;
pub use grid::{Cell, Grid, OccupantKind, Position};
pub use sequencer::{BeatReport, Sequencer};
pub use state::{GameEvent, GameState, PlacementError, SoundEvent};
