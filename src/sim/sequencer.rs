//! Beat sequencer
//!
//! Sweeps the grid one column per beat using wall-clock pacing: each call to
//! `step` checks how long it has been since the last beat and plays the next
//! column once a full beat interval has passed.

use super::state::{GameState, SoundEvent};
use crate::beat_interval_ms;
use crate::consts::MIN_TEMPO;

/// What one sequencer beat played
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeatReport {
    /// Column that was played
    pub beat: usize,
    pub sounds: Vec<SoundEvent>,
    /// The pointer wrapped back to beat 0 after this column
    pub wrapped: bool,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    current_beat: usize,
    tempo: f64,
    last_tick_ms: f64,
}

impl Sequencer {
    /// Start at beat 0; the first beat plays one interval after `now_ms`
    pub fn new(tempo: f64, now_ms: f64) -> Self {
        Self {
            current_beat: 0,
            tempo: tempo.max(MIN_TEMPO),
            last_tick_ms: now_ms,
        }
    }

    /// Beat that will play next
    pub fn current_beat(&self) -> usize {
        self.current_beat
    }

    pub fn tempo(&self) -> f64 {
        self.tempo
    }

    pub fn interval_ms(&self) -> f64 {
        beat_interval_ms(self.tempo)
    }

    /// Scheduling tick: plays a beat if one is due
    pub fn step(&mut self, now_ms: f64, state: &mut GameState) -> Option<BeatReport> {
        if now_ms - self.last_tick_ms < self.interval_ms() {
            return None;
        }
        self.last_tick_ms = now_ms;
        Some(self.play_beat(state))
    }

    /// Play the current column and advance the pointer
    pub fn play_beat(&mut self, state: &mut GameState) -> BeatReport {
        let beats = state.grid.beats();
        let pitches = state.grid.pitches();
        let beat = self.current_beat % beats;
        state.active_beat = beat;

        let mut sounds = Vec::new();
        if beat == 0 {
            sounds.push(SoundEvent::Kick);
        }
        if beat % 2 == 0 {
            sounds.push(SoundEvent::HiHat);
        }
        // Players standing on a mine do not mute it
        sounds.extend(
            state
                .grid
                .column(beat)
                .iter()
                .filter(|cell| cell.has_mine())
                .map(|cell| SoundEvent::note_for_row(cell.pos.pitch, pitches)),
        );

        self.current_beat = (beat + 1) % beats;
        let wrapped = self.current_beat == 0;
        if wrapped {
            state.sweep_count += 1;
        }
        log::trace!("Beat {} played {} sounds", beat, sounds.len());

        BeatReport {
            beat,
            sounds,
            wrapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::{Command, Position};

    fn empty_state() -> GameState {
        let config = GameConfig {
            initial_mines: 0,
            ..GameConfig::default()
        };
        GameState::new(config, 77).expect("valid config")
    }

    fn notes(report: &BeatReport) -> Vec<usize> {
        report
            .sounds
            .iter()
            .filter_map(|s| match s {
                SoundEvent::Note { pitch_index, .. } => Some(*pitch_index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_waits_for_beat_interval() {
        let mut state = empty_state();
        // 240 bpm = 250 ms per beat
        let mut seq = Sequencer::new(240.0, 1000.0);
        assert!(seq.step(1100.0, &mut state).is_none());
        assert!(seq.step(1249.9, &mut state).is_none());

        let report = seq.step(1250.0, &mut state).expect("beat due");
        assert_eq!(report.beat, 0);
        assert_eq!(seq.current_beat(), 1);

        // Interval is measured from the last beat, not a fixed grid
        assert!(seq.step(1400.0, &mut state).is_none());
        assert!(seq.step(1520.0, &mut state).is_some());
        assert_eq!(state.active_beat, 1);
    }

    #[test]
    fn test_percussion_pattern() {
        let mut state = empty_state();
        let mut seq = Sequencer::new(240.0, 0.0);
        let played: Vec<Vec<SoundEvent>> =
            (0..4).map(|_| seq.play_beat(&mut state).sounds).collect();
        assert_eq!(played[0], vec![SoundEvent::Kick, SoundEvent::HiHat]);
        assert!(played[1].is_empty());
        assert_eq!(played[2], vec![SoundEvent::HiHat]);
        assert!(played[3].is_empty());
    }

    #[test]
    fn test_mines_trigger_inverted_notes() {
        let mut state = empty_state();
        for _ in 0..3 {
            state.apply_command(0, Command::Right);
        }
        while state.players[0].pos.pitch > 0 {
            state.apply_command(0, Command::Up);
        }
        // Two stacked mines on row 0 still play a single note
        state.apply_command(0, Command::PlaceMine);
        state.apply_command(0, Command::PlaceMine);
        state.apply_command(0, Command::Down);
        state.apply_command(0, Command::Down);
        state.apply_command(0, Command::PlaceMine);
        assert_eq!(state.players[0].pos, Position::new(3, 2));

        let mut seq = Sequencer::new(240.0, 0.0);
        let reports: Vec<BeatReport> = (0..4).map(|_| seq.play_beat(&mut state)).collect();
        assert!(notes(&reports[2]).is_empty());
        // Row 0 maps to the highest index (2), row 2 to index 0
        assert_eq!(notes(&reports[3]), vec![2, 0]);
    }

    #[test]
    fn test_player_does_not_suppress_mine() {
        let mut state = empty_state();
        state.apply_command(0, Command::Right);
        state.apply_command(0, Command::PlaceMine);
        let row = state.players[0].pos.pitch;

        let mut seq = Sequencer::new(240.0, 0.0);
        seq.play_beat(&mut state);
        let report = seq.play_beat(&mut state);
        assert_eq!(report.beat, 1);
        assert_eq!(notes(&report), vec![2 - row]);
    }

    #[test]
    fn test_sweep_counts_once_per_wrap() {
        let mut state = empty_state();
        let mut seq = Sequencer::new(240.0, 0.0);

        for beat in 0..8 {
            let report = seq.play_beat(&mut state);
            assert_eq!(report.beat, beat);
            assert_eq!(report.wrapped, beat == 7);
        }
        assert_eq!(seq.current_beat(), 0);
        assert_eq!(state.sweep_count, 1);

        for _ in 0..8 {
            seq.play_beat(&mut state);
        }
        assert_eq!(state.sweep_count, 2);
    }

    #[test]
    fn test_tempo_clamped() {
        let seq = Sequencer::new(0.0, 0.0);
        assert_eq!(seq.tempo(), MIN_TEMPO);
        assert_eq!(Sequencer::new(120.0, 0.0).interval_ms(), 500.0);
    }
}
