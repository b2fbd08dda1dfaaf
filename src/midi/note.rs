//! Note event and melody representation.
//!
//! A [`NoteEvent`] is one monophonic note occurrence; a [`Melody`] is the
//! ordered sequence of events produced by one generation call. Events are
//! created by the generator, consumed by the encoder, and never mutated.

use super::{duration_symbol, pitch_name};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a single generated note with pitch, dynamics, and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// MIDI note number (0-127). 60 = Middle C (C4).
    pub pitch: u8,

    /// Note velocity. The generator samples this uniformly from 40-100.
    pub velocity: u8,

    /// Duration in ticks: 120 (quarter), 240 (half), or 480 (whole).
    pub duration_ticks: u32,
}

impl NoteEvent {
    /// Creates a new note event, clamping pitch and velocity into MIDI's
    /// 7-bit range.
    pub fn new(pitch: u8, velocity: u8, duration_ticks: u32) -> Self {
        Self {
            pitch: pitch.min(127),
            velocity: velocity.min(127),
            duration_ticks,
        }
    }
}

/// An ordered, monophonic sequence of note events.
///
/// Every melody carries a leading instrument selection (the `program` field,
/// fixed to 0 = acoustic grand piano by the generator) which the encoder
/// emits as a program-change before the first note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Melody {
    /// MIDI program number for the whole melody (0 = piano).
    pub program: u8,

    /// The note events, in playback order.
    pub events: Vec<NoteEvent>,
}

impl Melody {
    /// Creates a melody for the given instrument with no events yet.
    pub fn new(program: u8) -> Self {
        Self {
            program: program.min(127),
            events: Vec::new(),
        }
    }

    /// Appends a note event, preserving insertion order.
    pub fn push(&mut self, event: NoteEvent) {
        self.events.push(event);
    }

    /// Number of note events in the melody.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True if the melody has no note events.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Decoder output: one human-readable token per note-off event.
///
/// Tokens are immutable value records with no link back to the event they
/// came from. The octave marker is fixed at 4 regardless of the actual
/// pitch; only the pitch class is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoteToken {
    /// Pitch-class name ("C" through "B").
    pub pitch_name: &'static str,

    /// Duration symbol: "q", "h", or "w".
    pub duration_symbol: &'static str,
}

impl NoteToken {
    /// Builds a token from raw event data, using the shared lookup tables.
    pub fn from_event(pitch: u8, duration_ticks: u32) -> Self {
        Self {
            pitch_name: pitch_name(pitch),
            duration_symbol: duration_symbol(duration_ticks),
        }
    }
}

impl fmt::Display for NoteToken {
    /// Renders as e.g. "C/4,q" - pitch name, fixed octave marker, duration.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/4,{}", self.pitch_name, self.duration_symbol)
    }
}
