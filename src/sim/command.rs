//! Player commands
//!
//! Movement rules: vertical moves clamp at the grid edges, horizontal moves
//! wrap. Wrapping right onto beat 0 completes a lap.

use super::grid::{OccupantKind, Position};
use super::state::{GameEvent, GameState, SoundEvent};

/// A decoded player input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    /// Play the note of the player's current row
    Trigger,
    /// Drop a mine on the player's cell
    PlaceMine,
}

impl GameState {
    /// Apply a command for a player, returning what happened
    pub fn apply_command(&mut self, player: u32, command: Command) -> Vec<GameEvent> {
        let Some(from) = self.player(player).map(|p| p.pos) else {
            log::warn!("Command {:?} for unknown player {}", command, player);
            return Vec::new();
        };

        match command {
            Command::Trigger => {
                vec![GameEvent::Sound(SoundEvent::note_for_row(
                    from.pitch,
                    self.grid.pitches(),
                ))]
            }
            Command::PlaceMine => match self.place_mine(player) {
                Ok(mine) => vec![GameEvent::MinePlaced { mine, pos: from }],
                Err(e) => {
                    log::warn!("Mine not placed: {}", e);
                    Vec::new()
                }
            },
            Command::Up | Command::Down | Command::Left | Command::Right => {
                let to = self.target_position(from, command);
                self.move_player(player, from, to);

                let mut events = vec![GameEvent::Moved { player, from, to }];
                if command == Command::Right && to.beat == 0 {
                    events.extend(self.complete_lap(player));
                }
                events
            }
        }
    }

    /// Where a movement command leads from `from`
    fn target_position(&self, from: Position, command: Command) -> Position {
        let beats = self.grid.beats();
        let pitches = self.grid.pitches();
        match command {
            Command::Up => Position::new(from.beat, from.pitch.saturating_sub(1)),
            Command::Down => Position::new(from.beat, (from.pitch + 1).min(pitches - 1)),
            Command::Left => {
                let beat = if from.beat == 0 { beats - 1 } else { from.beat - 1 };
                Position::new(beat, from.pitch)
            }
            Command::Right => Position::new((from.beat + 1) % beats, from.pitch),
            Command::Trigger | Command::PlaceMine => from,
        }
    }

    /// Deregister from the old cell and register in the new one
    fn move_player(&mut self, player: u32, from: Position, to: Position) {
        if self
            .grid
            .move_occupant(player, from, to, OccupantKind::Player)
        {
            self.players[player as usize].pos = to;
        } else {
            log::error!("Player {} missing from cell {:?}", player, from);
        }
    }

    /// Lap bookkeeping: new level, reveal mines, add one more
    fn complete_lap(&mut self, player: u32) -> Vec<GameEvent> {
        self.sweep_count = 0;
        self.level_count += 1;
        log::info!("Player {} completed lap, level {}", player, self.level_count);

        let mut events = vec![
            GameEvent::LapCompleted {
                player,
                level: self.level_count,
            },
            GameEvent::MinesRevealed {
                count: self.reveal_mines(),
            },
        ];

        match self.place_random_mine() {
            Ok(mine) => events.push(GameEvent::MinePlaced {
                mine,
                pos: self.mines[mine as usize].pos,
            }),
            Err(e) => log::info!("No new mine this lap: {}", e),
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use proptest::prelude::*;

    fn new_state(initial_mines: usize) -> GameState {
        let config = GameConfig {
            initial_mines,
            ..GameConfig::default()
        };
        GameState::new(config, 4242).expect("valid config")
    }

    /// Put player 0 on a known cell
    fn place_player(state: &mut GameState, to: Position) {
        let from = state.players[0].pos;
        state.move_player(0, from, to);
    }

    #[test]
    fn test_vertical_moves_clamp() {
        let mut state = new_state(0);
        place_player(&mut state, Position::new(3, 0));

        state.apply_command(0, Command::Up);
        assert_eq!(state.players[0].pos, Position::new(3, 0));

        state.apply_command(0, Command::Down);
        state.apply_command(0, Command::Down);
        state.apply_command(0, Command::Down);
        assert_eq!(state.players[0].pos, Position::new(3, 2));
        assert!(state.occupancy_consistent());
    }

    #[test]
    fn test_left_wraps_without_lap() {
        let mut state = new_state(0);
        place_player(&mut state, Position::new(0, 1));

        let events = state.apply_command(0, Command::Left);
        assert_eq!(state.players[0].pos, Position::new(7, 1));
        assert_eq!(events.len(), 1);
        assert_eq!(state.level_count, 0);
    }

    #[test]
    fn test_right_wrap_completes_lap() {
        let mut state = new_state(2);
        state.sweep_count = 5;
        place_player(&mut state, Position::new(7, 1));

        let events = state.apply_command(0, Command::Right);
        assert_eq!(state.players[0].pos, Position::new(0, 1));
        assert_eq!(state.level_count, 1);
        assert_eq!(state.sweep_count, 0);
        assert_eq!(state.mine_count(), 3);
        assert!(state.mines.iter().take(2).all(|m| !m.hidden));
        assert!(state.mines[2].hidden);
        assert!(events.contains(&GameEvent::LapCompleted { player: 0, level: 1 }));
        assert!(events.contains(&GameEvent::MinesRevealed { count: 2 }));
    }

    #[test]
    fn test_lap_at_mine_limit_adds_nothing() {
        let config = GameConfig {
            initial_mines: 9,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 8).expect("valid config");
        place_player(&mut state, Position::new(7, 0));

        let events = state.apply_command(0, Command::Right);
        assert_eq!(state.level_count, 1);
        assert_eq!(state.mine_count(), 9);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::MinePlaced { .. })));
    }

    #[test]
    fn test_trigger_plays_row_without_moving() {
        let mut state = new_state(0);
        place_player(&mut state, Position::new(2, 0));

        let events = state.apply_command(0, Command::Trigger);
        assert_eq!(state.players[0].pos, Position::new(2, 0));
        assert_eq!(
            events,
            vec![GameEvent::Sound(SoundEvent::note_for_row(0, 3))]
        );
    }

    #[test]
    fn test_place_mine_command() {
        let mut state = new_state(0);
        place_player(&mut state, Position::new(4, 2));

        let events = state.apply_command(0, Command::PlaceMine);
        assert_eq!(
            events,
            vec![GameEvent::MinePlaced {
                mine: 0,
                pos: Position::new(4, 2)
            }]
        );
        assert!(state.grid.cell(Position::new(4, 2)).has_mine());
    }

    #[test]
    fn test_unknown_player_is_ignored() {
        let mut state = new_state(0);
        assert!(state.apply_command(3, Command::Right).is_empty());
    }

    #[test]
    fn test_full_lap_scenario() {
        let mut state = new_state(2);
        let start = state.players[0].pos;
        assert_eq!(start.beat, 0);

        for _ in 0..8 {
            state.apply_command(0, Command::Right);
        }

        assert_eq!(state.players[0].pos, start);
        assert_eq!(state.level_count, 1);
        assert_eq!(state.sweep_count, 0);
        assert_eq!(state.mine_count(), 3);
        assert!(state.occupancy_consistent());
    }

    fn any_command() -> impl Strategy<Value = Command> {
        prop_oneof![
            Just(Command::Up),
            Just(Command::Down),
            Just(Command::Left),
            Just(Command::Right),
            Just(Command::Trigger),
            Just(Command::PlaceMine),
        ]
    }

    proptest! {
        #[test]
        fn player_stays_registered_in_its_cell(
            seed in any::<u64>(),
            beats in 1usize..12,
            pitches in 1usize..6,
            commands in prop::collection::vec(any_command(), 0..100),
        ) {
            let config = GameConfig { beats, pitches, initial_mines: 0, ..GameConfig::default() };
            let mut state = GameState::new(config, seed).expect("valid config");
            for command in commands {
                state.apply_command(0, command);
                let pos = state.players[0].pos;
                prop_assert!(pos.pitch < pitches);
                prop_assert!(pos.beat < beats);
                prop_assert_eq!(state.grid.count_registrations(0, OccupantKind::Player), 1);
                prop_assert!(state.grid.cell(pos).players.contains(&0));
            }
            prop_assert!(state.occupancy_consistent());
        }
    }
}
