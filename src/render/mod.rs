//! Rendering module
//!
//! `tile_views` turns the game state into a flat list of what each tile
//! should show. The wasm-only `canvas` module draws that list with the
//! Canvas 2D API.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{GameState, Position};

/// Tile colors
pub mod colors {
    pub const TILE: &str = "#555";
    /// Column the sequencer played last
    pub const TILE_ACTIVE: &str = "#777";
    pub const MINE: &str = "#FF0000";
    pub const PLAYER_ONE: &str = "#FF0000";
    pub const PLAYER_OTHER: &str = "#00FF00";
}

/// What a single tile shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub pos: Position,
    /// Tile is in the active sequencer column
    pub active: bool,
    /// Players on the tile, in arrival order
    pub players: Vec<u32>,
    /// Draw the mine marker
    pub mine_visible: bool,
}

/// Player marker color
pub fn player_color(id: u32) -> &'static str {
    if id == 0 {
        colors::PLAYER_ONE
    } else {
        colors::PLAYER_OTHER
    }
}

/// Build the view of every tile, column by column.
///
/// A mine marker shows while the debug toggle is held, once the tile's first
/// mine has been revealed, or while a player stands on the tile.
pub fn tile_views(state: &GameState) -> Vec<TileView> {
    state
        .grid
        .cells()
        .map(|cell| {
            let mine_visible = cell.mines.first().is_some_and(|&id| {
                state.show_mines
                    || state.mine(id).is_some_and(|m| !m.hidden)
                    || cell.has_player()
            });
            TileView {
                pos: cell.pos,
                active: cell.pos.beat == state.active_beat,
                players: cell.players.clone(),
                mine_visible,
            }
        })
        .collect()
}

/// Debug readout counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudCounters {
    pub mines: usize,
    pub level: u32,
    pub sweep: u32,
}

impl HudCounters {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            mines: state.mine_count(),
            level: state.level_count,
            sweep: state.sweep_count,
        }
    }

    /// (element id, text) pairs for the debug readout
    pub fn entries(&self) -> [(&'static str, String); 3] {
        [
            ("mineCount", format!("Mines: {}", self.mines)),
            ("levelCount", format!("levelCount: {}", self.level)),
            ("sweepCount", format!("sweepCount: {}", self.sweep)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Command;

    fn state_with_mine_ahead() -> GameState {
        let config = GameConfig {
            initial_mines: 0,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 11).expect("valid config");
        state.apply_command(0, Command::Right);
        state.apply_command(0, Command::PlaceMine);
        state.apply_command(0, Command::Right);
        state
    }

    fn view_at(views: &[TileView], pos: Position) -> &TileView {
        views.iter().find(|v| v.pos == pos).expect("tile exists")
    }

    #[test]
    fn test_hidden_mine_visibility() {
        let mut state = state_with_mine_ahead();
        let mine_pos = state.mines[0].pos;

        let views = tile_views(&state);
        assert_eq!(views.len(), 24);
        assert!(!view_at(&views, mine_pos).mine_visible);

        // Debug toggle shows every mine
        state.show_mines = true;
        assert!(view_at(&tile_views(&state), mine_pos).mine_visible);
        state.show_mines = false;

        // Standing on the tile shows it too
        state.apply_command(0, Command::Left);
        assert!(view_at(&tile_views(&state), mine_pos).mine_visible);
    }

    #[test]
    fn test_revealed_mine_visible() {
        let mut state = state_with_mine_ahead();
        let mine_pos = state.mines[0].pos;
        state.reveal_mines();
        let views = tile_views(&state);
        assert!(view_at(&views, mine_pos).mine_visible);
        assert_eq!(views.iter().filter(|v| v.mine_visible).count(), 1);
    }

    #[test]
    fn test_active_column_and_players() {
        let mut state = state_with_mine_ahead();
        state.active_beat = 3;
        let views = tile_views(&state);
        assert_eq!(views.iter().filter(|v| v.active).count(), 3);
        assert!(views.iter().filter(|v| v.active).all(|v| v.pos.beat == 3));

        let player_pos = state.players[0].pos;
        assert_eq!(view_at(&views, player_pos).players, vec![0]);
        assert_eq!(player_color(0), colors::PLAYER_ONE);
        assert_eq!(player_color(1), colors::PLAYER_OTHER);
    }

    #[test]
    fn test_hud_entries() {
        let state = state_with_mine_ahead();
        let hud = HudCounters::from_state(&state);
        assert_eq!(
            hud,
            HudCounters {
                mines: 1,
                level: 0,
                sweep: 0
            }
        );
        assert_eq!(hud.entries()[0], ("mineCount", "Mines: 1".to_string()));
    }
}
