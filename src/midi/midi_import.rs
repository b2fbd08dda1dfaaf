//! Standard MIDI File (SMF) decoding into note tokens.
//!
//! Reads .mid and .midi data and emits one human-readable [`NoteToken`] per
//! note-off event. The token's duration comes from the note-off event's own
//! delta time, mirroring the encoder's on/off pairing contract.
//!
//! # Limitations
//!
//! - Only note-off events produce tokens; note-on, program-change, and all
//!   other event types are skipped
//! - A note-on with velocity 0 (the running-status idiom for note off) is
//!   not treated as a note off here, matching the encoder's explicit 0x8n
//!   events

use super::NoteToken;
use midly::{Smf, TrackEventKind};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while decoding MIDI data.
///
/// All variants mean "no tokens available" - decoding never returns a
/// partial token list. Distinct from an empty track, which decodes
/// successfully to zero tokens.
#[derive(Debug, Error)]
pub enum MidiDecodeError {
    /// File could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// MIDI parsing failed (malformed header, truncated stream, bad chunk)
    #[error("MIDI parse error: {0}")]
    Parse(#[from] midly::Error),
}

/// Decodes an in-memory MIDI blob into note tokens.
///
/// Iterates every track and every event in file order; order of the
/// returned tokens reconstructs the melodic sequence. Decoding the same
/// well-formed blob always yields the same tokens.
///
/// # Errors
///
/// Returns [`MidiDecodeError::Parse`] if the data is not a well-formed
/// MIDI container.
pub fn decode(data: &[u8]) -> Result<Vec<NoteToken>, MidiDecodeError> {
    let smf = Smf::parse(data)?;

    let mut tokens = Vec::new();
    for track in &smf.tracks {
        for event in track {
            if let TrackEventKind::Midi {
                message: midly::MidiMessage::NoteOff { key, vel: _ },
                ..
            } = event.kind
            {
                tokens.push(NoteToken::from_event(key.as_int(), event.delta.as_int()));
            }
        }
    }

    Ok(tokens)
}

/// Decodes a MIDI file on disk into note tokens.
///
/// # Errors
///
/// Returns [`MidiDecodeError::Io`] if the file cannot be read (including a
/// missing file) and [`MidiDecodeError::Parse`] if its contents are not
/// valid MIDI.
pub fn decode_midi<P: AsRef<Path>>(path: P) -> Result<Vec<NoteToken>, MidiDecodeError> {
    let data = fs::read(path.as_ref())?;
    decode(&data)
}
