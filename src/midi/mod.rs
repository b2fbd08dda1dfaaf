//! MIDI data structures and lookup tables.
//!
//! This module provides the core types for representing generated melodies
//! and the note/duration tables shared by the encoder and decoder.

mod midi_export;
mod midi_import;
mod note;

pub use midi_export::export_to_midi;
#[allow(unused_imports)]
pub use midi_export::encode;
pub use midi_import::decode_midi;
// decode and MidiDecodeError are available for callers working on in-memory
// blobs or matching on failure kinds
#[allow(unused_imports)]
pub use midi_import::{decode, MidiDecodeError};
pub use note::{Melody, NoteEvent, NoteToken};

/// Standard MIDI note names for display purposes.
/// Maps a pitch class (note number mod 12) to its name within an octave.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Ticks per beat (quarter note) - standard MIDI resolution.
pub const TICKS_PER_BEAT: u32 = 480;

/// The three note lengths the generator emits, in ticks.
pub const DURATION_TICKS: [u32; 3] = [120, 240, 480];

/// Converts a MIDI note number to its pitch-class name ("C" through "B").
///
/// Periodic with period 12: `pitch_name(n) == pitch_name(n + 12)` for all n.
/// Falls back to "C" if the lookup somehow misses, rather than failing.
///
/// # Examples
///
/// ```
/// use tunegen::midi::pitch_name;
///
/// assert_eq!(pitch_name(60), "C"); // Middle C
/// assert_eq!(pitch_name(70), "A#");
/// ```
pub fn pitch_name(pitch: u8) -> &'static str {
    NOTE_NAMES.get((pitch % 12) as usize).copied().unwrap_or("C")
}

/// Converts a tick duration to its display symbol.
///
/// Only the three generator durations have distinct symbols; anything else
/// (including 0) renders as a quarter note.
///
/// # Examples
///
/// ```
/// use tunegen::midi::duration_symbol;
///
/// assert_eq!(duration_symbol(240), "h");
/// assert_eq!(duration_symbol(17), "q");
/// ```
pub fn duration_symbol(ticks: u32) -> &'static str {
    match ticks {
        120 => "q",
        240 => "h",
        480 => "w",
        _ => "q",
    }
}

/// Converts a pitch-class name to a MIDI note number in the middle octave.
///
/// "C" maps to 60 (middle C), "B" to 71. Returns None for anything that is
/// not one of the twelve names in [`NOTE_NAMES`].
pub fn base_note_number(name: &str) -> Option<u8> {
    let name = name.trim();
    let index = NOTE_NAMES.iter().position(|&n| n == name)?;
    Some(60 + index as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_name_basics() {
        assert_eq!(pitch_name(60), "C");
        assert_eq!(pitch_name(61), "C#");
        assert_eq!(pitch_name(69), "A");
        assert_eq!(pitch_name(71), "B");
        assert_eq!(pitch_name(0), "C");
        assert_eq!(pitch_name(127), "G");
    }

    #[test]
    fn test_pitch_name_is_periodic() {
        for pitch in 0u8..=115 {
            assert_eq!(pitch_name(pitch), pitch_name(pitch + 12));
        }
    }

    #[test]
    fn test_duration_symbol_table() {
        assert_eq!(duration_symbol(120), "q");
        assert_eq!(duration_symbol(240), "h");
        assert_eq!(duration_symbol(480), "w");
    }

    #[test]
    fn test_duration_symbol_defaults_to_quarter() {
        assert_eq!(duration_symbol(0), "q");
        assert_eq!(duration_symbol(1), "q");
        assert_eq!(duration_symbol(121), "q");
        assert_eq!(duration_symbol(u32::MAX), "q");
    }

    #[test]
    fn test_base_note_number() {
        assert_eq!(base_note_number("C"), Some(60));
        assert_eq!(base_note_number("F#"), Some(66));
        assert_eq!(base_note_number("B"), Some(71));
        assert_eq!(base_note_number("H"), None);
        assert_eq!(base_note_number(""), None);
    }
}
