//! Note tables
//!
//! Grid rows are mapped to notes by walking a table of pitch classes on C:
//! `degree = index % len`, `octave = 3 + index / len`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Octave of the first table entry
pub const BASE_OCTAVE: u32 = 3;

/// Which table the rows walk through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteTableKind {
    /// C minor triad (C, Eb, G)
    #[default]
    MinorChord,
    /// C mixolydian scale
    Mixolydian,
}

/// A pitch class: display name and semitones above C
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PitchClass {
    name: &'static str,
    semitones: u32,
}

const fn pc(name: &'static str, semitones: u32) -> PitchClass {
    PitchClass { name, semitones }
}

const MINOR_CHORD: [PitchClass; 3] = [pc("C", 0), pc("Eb", 3), pc("G", 7)];

const MIXOLYDIAN: [PitchClass; 7] = [
    pc("C", 0),
    pc("D", 2),
    pc("E", 4),
    pc("F", 5),
    pc("G", 7),
    pc("A", 9),
    pc("Bb", 10),
];

/// A concrete note (pitch class + octave)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub name: &'static str,
    pub octave: u32,
    semitones: u32,
}

impl Note {
    /// MIDI note number (C4 = 60)
    pub fn midi(&self) -> u32 {
        12 * (self.octave + 1) + self.semitones
    }

    /// Equal-tempered frequency in Hz (A4 = 440)
    pub fn frequency(&self) -> f32 {
        440.0 * 2f32.powf((self.midi() as f32 - 69.0) / 12.0)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// Note length tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoteDuration {
    #[default]
    Eighth,
}

impl NoteDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteDuration::Eighth => "8n",
        }
    }

    /// Length in seconds at the given tempo (a quarter note is one beat)
    pub fn seconds(&self, tempo: f64) -> f64 {
        let beat = 60.0 / tempo;
        match self {
            NoteDuration::Eighth => beat / 2.0,
        }
    }
}

/// Maps pitch indices to notes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTable {
    kind: NoteTableKind,
}

impl NoteTable {
    pub fn new(kind: NoteTableKind) -> Self {
        Self { kind }
    }

    fn classes(&self) -> &'static [PitchClass] {
        match self.kind {
            NoteTableKind::MinorChord => &MINOR_CHORD,
            NoteTableKind::Mixolydian => &MIXOLYDIAN,
        }
    }

    /// Number of entries before the table repeats an octave higher
    pub fn period(&self) -> usize {
        self.classes().len()
    }

    /// Note for a pitch index
    pub fn note(&self, pitch_index: usize) -> Note {
        let period = self.period();
        let class = self.classes()[pitch_index % period];
        Note {
            name: class.name,
            octave: BASE_OCTAVE + (pitch_index / period) as u32,
            semitones: class.semitones,
        }
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::new(NoteTableKind::default())
    }
}
