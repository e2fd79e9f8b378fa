//! Game state and core simulation types
//!
//! `GameState` is the single context object every subsystem is handed:
//! it owns the grid, all actors, the RNG and the progress counters.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use thiserror::Error;

use super::actor::{Mine, Player};
use super::grid::{Grid, OccupantKind, Position};
use crate::config::{ConfigError, GameConfig};
use crate::music::NoteDuration;

/// Sounds requested by the simulation (fire-and-forget)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Downbeat percussion (beat 0)
    Kick,
    /// Off-beat percussion (even beats)
    HiHat,
    /// Pitched note for a grid row
    Note {
        /// Grid row the note came from
        row: usize,
        /// Note table index (row 0 maps to the highest index)
        pitch_index: usize,
        duration: NoteDuration,
    },
}

impl SoundEvent {
    /// Note event for a grid row; rows are inverted so the top row is highest
    pub fn note_for_row(row: usize, pitches: usize) -> Self {
        SoundEvent::Note {
            row,
            pitch_index: pitches - 1 - row,
            duration: NoteDuration::Eighth,
        }
    }
}

/// Things that happened while applying a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Moved {
        player: u32,
        from: Position,
        to: Position,
    },
    LapCompleted {
        player: u32,
        level: u32,
    },
    MinesRevealed {
        count: usize,
    },
    MinePlaced {
        mine: u32,
        pos: Position,
    },
    Sound(SoundEvent),
}

/// Why a mine could not be placed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("mine limit of {limit} reached")]
    MineLimitReached { limit: usize },
    #[error("every cell off the start column already holds a mine")]
    NoEligibleCell,
    #[error("no player with id {0}")]
    UnknownPlayer(u32),
}

/// Complete game state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: GameConfig,
    pub grid: Grid,
    /// Indexed by player id
    pub players: Vec<Player>,
    /// Indexed by mine id, in placement order
    pub mines: Vec<Mine>,
    /// Completed laps
    pub level_count: u32,
    /// Sequencer sweeps since the last lap
    pub sweep_count: u32,
    /// Beat the sequencer played last (render highlight)
    pub active_beat: usize,
    /// Debug toggle: draw every mine while held
    pub show_mines: bool,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game: empty grid, players on beat 0, initial random mines
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self {
            seed,
            grid: Grid::new(config.beats, config.pitches),
            players: Vec::with_capacity(config.player_count),
            mines: Vec::with_capacity(config.mine_limit),
            level_count: 0,
            sweep_count: 0,
            active_beat: 0,
            show_mines: false,
            rng: Pcg32::seed_from_u64(seed),
            config,
        };

        for id in 0..state.config.player_count {
            // Players always start on the left edge
            let pitch = state.rng.random_range(0..state.grid.pitches());
            state.spawn_player(id as u32, Position::new(0, pitch));
        }

        for _ in 0..state.config.initial_mines {
            if let Err(e) = state.place_random_mine() {
                log::warn!("Initial mine not placed: {}", e);
            }
        }

        Ok(state)
    }

    fn spawn_player(&mut self, id: u32, pos: Position) {
        self.players.push(Player::new(id, pos));
        self.grid.insert_occupant(id, pos, OccupantKind::Player);
    }

    pub fn player(&self, id: u32) -> Option<&Player> {
        self.players.get(id as usize)
    }

    pub fn mine(&self, id: u32) -> Option<&Mine> {
        self.mines.get(id as usize)
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    fn add_mine(&mut self, owner: u32, pos: Position) -> u32 {
        let id = self.mines.len() as u32;
        self.mines.push(Mine::new(id, owner, pos));
        self.grid.insert_occupant(id, pos, OccupantKind::Mine);
        id
    }

    /// Place a mine under a player. Mines may stack on one cell.
    pub fn place_mine(&mut self, player: u32) -> Result<u32, PlacementError> {
        let pos = self
            .player(player)
            .ok_or(PlacementError::UnknownPlayer(player))?
            .pos;
        let id = self.add_mine(player, pos);
        log::info!("Player {} placed mine {} at {:?}", player, id, pos);
        Ok(id)
    }

    /// Place a mine owned by player 0 on a random mine-free cell off beat 0.
    ///
    /// Fails once the configured mine limit is reached, or when every
    /// eligible cell already holds a mine.
    pub fn place_random_mine(&mut self) -> Result<u32, PlacementError> {
        let limit = self.config.mine_limit;
        if self.mines.len() >= limit {
            return Err(PlacementError::MineLimitReached { limit });
        }

        // Beat 0 is the player start column
        let free: Vec<Position> = self
            .grid
            .cells()
            .filter(|c| c.pos.beat > 0 && !c.has_mine())
            .map(|c| c.pos)
            .collect();
        if free.is_empty() {
            return Err(PlacementError::NoEligibleCell);
        }

        let pos = free[self.rng.random_range(0..free.len())];
        let owner = self.players.first().map(|p| p.id).unwrap_or(0);
        let id = self.add_mine(owner, pos);
        log::info!("Placed random mine {} at {:?}", id, pos);
        Ok(id)
    }

    /// Reveal every placed mine; returns how many mines exist
    pub fn reveal_mines(&mut self) -> usize {
        for mine in &mut self.mines {
            mine.hidden = false;
        }
        self.mines.len()
    }

    /// Whether every actor is registered exactly once, in the cell matching
    /// its recorded position
    pub fn occupancy_consistent(&self) -> bool {
        let players_ok = self.players.iter().all(|p| {
            self.grid.count_registrations(p.id, OccupantKind::Player) == 1
                && self.grid.cell(p.pos).players.contains(&p.id)
        });
        let mines_ok = self.mines.iter().all(|m| {
            self.grid.count_registrations(m.id, OccupantKind::Mine) == 1
                && self.grid.cell(m.pos).mines.contains(&m.id)
        });
        players_ok && mines_ok
    }
}
