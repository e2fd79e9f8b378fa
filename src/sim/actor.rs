//! Grid actors
//!
//! Actors are owned by `GameState` and referenced from grid cells by id.
//! A player's id is its index in `GameState::players`; a mine's id is its
//! index in `GameState::mines`.

use serde::{Deserialize, Serialize};

use super::grid::Position;

/// A player avatar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    /// Always equals the cell the player is registered in
    pub pos: Position,
}

impl Player {
    pub fn new(id: u32, pos: Position) -> Self {
        Self { id, pos }
    }
}

/// A mine. Never moves and is never removed once placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mine {
    pub id: u32,
    /// Player that placed it (random mines belong to player 0)
    pub owner: u32,
    pub pos: Position,
    /// Hidden until the next lap completion
    pub hidden: bool,
}

impl Mine {
    pub fn new(id: u32, owner: u32, pos: Position) -> Self {
        Self {
            id,
            owner,
            pos,
            hidden: true,
        }
    }
}
