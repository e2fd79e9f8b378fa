//! Keyboard decoding
//!
//! Both `KeyboardEvent.key` names and the legacy numeric key codes are
//! accepted. Anything unmapped is rejected with a `CommandError` that the
//! caller logs and drops.

use thiserror::Error;

use crate::sim::Command;

/// Legacy `KeyboardEvent.which` codes
pub mod key_codes {
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const LEFT_L: u32 = 65;
    pub const UP_L: u32 = 87;
    pub const RIGHT_L: u32 = 68;
    pub const DOWN_L: u32 = 83;
    pub const SPACE: u32 = 32;
    pub const MINE: u32 = 77;
}

/// Input that does not map to any player command
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unrecognized key {0:?}")]
    UnknownKey(String),
    #[error("unrecognized key code {0}")]
    UnknownKeyCode(u32),
}

/// Decode a `KeyboardEvent.key` value
pub fn command_for_key(key: &str) -> Result<Command, CommandError> {
    match key {
        "ArrowUp" | "w" | "W" => Ok(Command::Up),
        "ArrowDown" | "s" | "S" => Ok(Command::Down),
        "ArrowLeft" | "a" | "A" => Ok(Command::Left),
        "ArrowRight" | "d" | "D" => Ok(Command::Right),
        " " => Ok(Command::Trigger),
        "m" | "M" => Ok(Command::PlaceMine),
        _ => Err(CommandError::UnknownKey(key.to_string())),
    }
}

/// Decode a legacy numeric key code
pub fn command_for_key_code(code: u32) -> Result<Command, CommandError> {
    use key_codes::*;
    match code {
        UP | UP_L => Ok(Command::Up),
        DOWN | DOWN_L => Ok(Command::Down),
        LEFT | LEFT_L => Ok(Command::Left),
        RIGHT | RIGHT_L => Ok(Command::Right),
        SPACE => Ok(Command::Trigger),
        MINE => Ok(Command::PlaceMine),
        _ => Err(CommandError::UnknownKeyCode(code)),
    }
}
