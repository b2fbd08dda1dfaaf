//! Audio rendering via an external synthesizer process.
//!
//! The core only produces MIDI bytes; turning them into audible audio is
//! delegated to a renderer behind the [`AudioRenderer`] trait so hosts can
//! inject whatever backend they have available. The stock implementation
//! shells out to `timidity`.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, error};

/// Errors from an audio rendering attempt.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The renderer process could not be spawned
    #[error("failed to launch renderer: {0}")]
    Io(#[from] std::io::Error),

    /// The renderer ran but reported failure
    #[error("renderer exited with {status}: {stderr}")]
    Failed {
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Capability interface for turning a MIDI file into a playable audio file.
///
/// Implementations must not retry on failure; the caller decides what a
/// failed render means.
pub trait AudioRenderer {
    /// Renders `midi_path` to `audio_path`, overwriting any existing file.
    fn render(&self, midi_path: &Path, audio_path: &Path) -> Result<(), RenderError>;
}

/// Renders MIDI to WAV by invoking the `timidity` executable.
#[derive(Debug, Clone, Default)]
pub struct TimidityRenderer;

impl AudioRenderer for TimidityRenderer {
    fn render(&self, midi_path: &Path, audio_path: &Path) -> Result<(), RenderError> {
        debug!("Rendering {:?} to {:?}", midi_path, audio_path);

        let output = Command::new("timidity")
            .arg(midi_path)
            .arg("-Ow")
            .arg("-o")
            .arg(audio_path)
            .output()?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("Render failed ({}): {}", output.status, stderr.trim());
            Err(RenderError::Failed {
                status: output.status,
                stderr,
            })
        }
    }
}
