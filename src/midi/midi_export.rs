//! Standard MIDI File (SMF) export functionality.
//!
//! Encodes a generated melody as a single-track .mid file consumable by any
//! standards-compliant MIDI reader or sequencer.
//!
//! # Format Details
//!
//! Exports as SMF Format 0 (single track) with:
//! - A program-change event at delta 0 selecting the melody's instrument
//! - For each note: note-on at delta 0, then note-off (velocity 0) with the
//!   note's duration as the note-off delta time
//! - An end-of-track meta event
//!
//! The note duration always rides on the *off* event's delta, never the on
//! event's. The decoder relies on this pairing.

use super::{Melody, TICKS_PER_BEAT};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a variable-length quantity (VLQ) used for delta times in MIDI.
///
/// VLQ encodes values using 7 bits per byte, with the MSB indicating
/// whether more bytes follow (1 = more bytes, 0 = last byte).
///
/// # Arguments
///
/// * `value` - The value to encode (max 0x0FFFFFFF for MIDI)
/// * `buffer` - Output buffer to write to
fn write_vlq(value: u32, buffer: &mut Vec<u8>) {
    // VLQ can be 1-4 bytes for MIDI delta times
    // Each byte uses 7 bits for data, MSB indicates continuation
    if value == 0 {
        buffer.push(0);
        return;
    }

    let mut temp = value;
    let mut bytes = Vec::with_capacity(4);

    while temp > 0 {
        bytes.push((temp & 0x7F) as u8);
        temp >>= 7;
    }

    // Write bytes in reverse order with continuation bits
    for (i, &byte) in bytes.iter().rev().enumerate() {
        if i < bytes.len() - 1 {
            buffer.push(byte | 0x80); // Set continuation bit
        } else {
            buffer.push(byte); // Last byte, no continuation
        }
    }
}

/// MIDI event types the melody encoder emits.
enum MidiEvent {
    /// Note on: channel, pitch, velocity
    NoteOn {
        channel: u8,
        pitch: u8,
        velocity: u8,
    },
    /// Note off: channel, pitch, velocity (always 0 here)
    NoteOff {
        channel: u8,
        pitch: u8,
        velocity: u8,
    },
    /// Program change: channel, program number
    ProgramChange { channel: u8, program: u8 },
    /// End of track (meta event)
    EndOfTrack,
}

/// Writes a single MIDI event to the buffer (without delta time).
fn write_event(event: &MidiEvent, buffer: &mut Vec<u8>) {
    match event {
        MidiEvent::NoteOn {
            channel,
            pitch,
            velocity,
        } => {
            buffer.push(0x90 | (channel & 0x0F));
            buffer.push(*pitch);
            buffer.push(*velocity);
        }
        MidiEvent::NoteOff {
            channel,
            pitch,
            velocity,
        } => {
            buffer.push(0x80 | (channel & 0x0F));
            buffer.push(*pitch);
            buffer.push(*velocity);
        }
        MidiEvent::ProgramChange { channel, program } => {
            buffer.push(0xC0 | (channel & 0x0F));
            buffer.push(*program);
        }
        MidiEvent::EndOfTrack => {
            // Meta event: FF 2F 00
            buffer.push(0xFF);
            buffer.push(0x2F);
            buffer.push(0x00);
        }
    }
}

/// Channel the whole melody plays on. The generator is monophonic, so one
/// channel is all it ever needs.
const MELODY_CHANNEL: u8 = 0;

/// Builds the track chunk data for a melody.
///
/// Events are already in playback order, so deltas are written directly:
/// the program change and every note-on get delta 0, every note-off carries
/// its note's duration.
fn build_track_data(melody: &Melody) -> Vec<u8> {
    let mut buffer = Vec::new();

    write_vlq(0, &mut buffer);
    write_event(
        &MidiEvent::ProgramChange {
            channel: MELODY_CHANNEL,
            program: melody.program,
        },
        &mut buffer,
    );

    for event in &melody.events {
        write_vlq(0, &mut buffer);
        write_event(
            &MidiEvent::NoteOn {
                channel: MELODY_CHANNEL,
                pitch: event.pitch,
                velocity: event.velocity,
            },
            &mut buffer,
        );

        write_vlq(event.duration_ticks, &mut buffer);
        write_event(
            &MidiEvent::NoteOff {
                channel: MELODY_CHANNEL,
                pitch: event.pitch,
                velocity: 0,
            },
            &mut buffer,
        );
    }

    write_vlq(0, &mut buffer);
    write_event(&MidiEvent::EndOfTrack, &mut buffer);

    buffer
}

/// Encodes a melody as a complete Standard MIDI File in memory.
///
/// # Format
///
/// Creates a Format 0 MIDI file: one header chunk (MThd) followed by one
/// track chunk (MTrk) holding the program change and the note on/off pairs.
///
/// # Guarantees
///
/// Round-tripping through [`super::decode`] yields exactly one token per
/// note event, in original order.
pub fn encode(melody: &Melody) -> Vec<u8> {
    let track_data = build_track_data(melody);

    let mut blob = Vec::with_capacity(14 + 8 + track_data.len());

    // Header chunk (MThd)
    blob.extend_from_slice(b"MThd");
    blob.extend_from_slice(&6u32.to_be_bytes()); // Header length (always 6)
    blob.extend_from_slice(&0u16.to_be_bytes()); // Format 0 (single track)
    blob.extend_from_slice(&1u16.to_be_bytes()); // One track
    blob.extend_from_slice(&(TICKS_PER_BEAT as u16).to_be_bytes()); // Division

    // Track chunk (MTrk)
    blob.extend_from_slice(b"MTrk");
    blob.extend_from_slice(&(track_data.len() as u32).to_be_bytes());
    blob.extend_from_slice(&track_data);

    blob
}

/// Exports a melody to a Standard MIDI File on disk.
///
/// # Arguments
///
/// * `melody` - The melody to export
/// * `path` - Output file path
///
/// # Errors
///
/// Returns error if file creation or writing fails
pub fn export_to_midi<P: AsRef<Path>>(melody: &Melody, path: P) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&encode(melody))?;
    writer.flush()?;
    Ok(())
}
