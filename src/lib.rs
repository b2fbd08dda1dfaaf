//! tunegen - a random melody generator with MIDI encoding and decoding.
//!
//! This library provides the core functionality for the melody service:
//! weighted random note generation, a Standard MIDI File encoder/decoder,
//! and the host-side artifact and rendering plumbing around them.

pub mod gen;
pub mod midi;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use gen::{generate_melody, generate_melody_with, Scale, ScaleMask};
pub use midi::{decode_midi, export_to_midi, Melody, NoteEvent, NoteToken, TICKS_PER_BEAT};
pub use render::{AudioRenderer, TimidityRenderer};
pub use session::{ArtifactStore, SessionArtifacts};
