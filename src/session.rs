//! Per-session artifact lifecycle.
//!
//! Each generation request produces a MIDI file and, optionally, a rendered
//! audio file. [`SessionArtifacts`] owns the pair for one session: replacing
//! an artifact deletes its predecessor, and dropping the session removes
//! whatever is left, so no storage outlives the session that created it.
//!
//! All artifact paths live under an [`ArtifactStore`] root; paths that
//! resolve outside the root are rejected before any read or delete.

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors from artifact storage operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Storage root could not be created or a file operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A path escaped the storage root
    #[error("path {0:?} is outside the storage root")]
    OutsideRoot(PathBuf),
}

/// Length of the random suffix in generated artifact names.
const NAME_SUFFIX_LEN: usize = 6;

/// A directory that owns all generated artifacts.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Opens (creating if needed) a store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, SessionError> {
        let root = root.as_ref();
        fs::create_dir_all(root)?;
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    /// The canonicalized storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Builds a fresh artifact path: `prefix_<unix-seconds>_<random>.<ext>`.
    ///
    /// The timestamp plus random suffix keeps concurrent sessions from
    /// colliding on names.
    pub fn unique_path(&self, prefix: &str, extension: &str) -> PathBuf {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NAME_SUFFIX_LEN)
            .map(char::from)
            .collect();
        self.root
            .join(format!("{}_{}_{}.{}", prefix, seconds, suffix, extension))
    }

    /// Checks that `path` resolves inside the storage root.
    ///
    /// Guards every read and delete against traversal: a stored path that
    /// escapes the root (via `..` or a symlink) is refused, not followed.
    pub fn checked(&self, path: &Path) -> Result<PathBuf, SessionError> {
        let resolved = path.canonicalize()?;
        if resolved.starts_with(&self.root) {
            Ok(resolved)
        } else {
            Err(SessionError::OutsideRoot(path.to_path_buf()))
        }
    }
}

/// The artifacts one session currently owns.
///
/// At most one MIDI and one audio file exist at a time; storing a new one
/// deletes the file it supersedes. Dropping the session deletes both.
#[derive(Debug)]
pub struct SessionArtifacts {
    store: ArtifactStore,
    midi: Option<PathBuf>,
    audio: Option<PathBuf>,
}

impl SessionArtifacts {
    /// Creates an empty session over the given store.
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            midi: None,
            audio: None,
        }
    }

    /// The store this session writes into.
    #[allow(dead_code)]
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Current MIDI artifact, if one exists.
    #[allow(dead_code)]
    pub fn midi_path(&self) -> Option<&Path> {
        self.midi.as_deref()
    }

    /// Current audio artifact, if one exists.
    #[allow(dead_code)]
    pub fn audio_path(&self) -> Option<&Path> {
        self.audio.as_deref()
    }

    /// Records a new MIDI artifact, deleting the superseded one.
    pub fn replace_midi(&mut self, path: PathBuf) -> Result<(), SessionError> {
        let path = self.store.checked(&path)?;
        if let Some(old) = self.midi.replace(path) {
            remove_artifact(&old);
        }
        Ok(())
    }

    /// Records a new audio artifact, deleting the superseded one.
    pub fn replace_audio(&mut self, path: PathBuf) -> Result<(), SessionError> {
        let path = self.store.checked(&path)?;
        if let Some(old) = self.audio.replace(path) {
            remove_artifact(&old);
        }
        Ok(())
    }

    /// Releases ownership of both artifacts without deleting them.
    ///
    /// For the case where the session's output is the deliverable: the
    /// returned paths survive the session, and the drop cleanup is disarmed.
    pub fn persist(mut self) -> (Option<PathBuf>, Option<PathBuf>) {
        (self.midi.take(), self.audio.take())
    }

    /// Deletes both artifacts immediately.
    pub fn clear(&mut self) {
        if let Some(path) = self.midi.take() {
            remove_artifact(&path);
        }
        if let Some(path) = self.audio.take() {
            remove_artifact(&path);
        }
    }
}

impl Drop for SessionArtifacts {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Removes an artifact file; a file already gone is not an error.
fn remove_artifact(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed artifact {:?}", path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove artifact {:?}: {}", path, e),
    }
}
