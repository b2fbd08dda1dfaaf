//! tunegen - a random melody generator with MIDI export and playback prep.
//!
//! Generates a short pseudo-random melody in a major or minor scale, writes
//! it to a .mid file, optionally renders it to WAV through timidity, then
//! decodes the file back and prints the note list as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run                          # major scale from middle C
//! cargo run -- --scale minor -b A   # minor scale from A
//! cargo run -- --seed 42            # reproducible melody
//! cargo run -- --render             # also render audio via timidity
//! ```

mod gen;
mod midi;
mod render;
mod session;

use gen::{generate_melody_with, Scale};
use midi::base_note_number;
use render::{AudioRenderer, TimidityRenderer};
use session::{ArtifactStore, SessionArtifacts};

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

/// Command-line options for the generator.
struct CliOptions {
    /// Scale name; anything other than "major"/"minor" falls back to major.
    scale: String,
    /// Base pitch-class name ("C" through "B").
    base_note: String,
    /// RNG seed; same seed produces the same melody.
    seed: Option<u64>,
    /// Directory artifacts are written into.
    out_dir: PathBuf,
    /// Whether to render the melody to WAV.
    render: bool,
}

impl CliOptions {
    /// Parses command-line arguments.
    ///
    /// Supports:
    /// - `--scale <major|minor>` or `-s <name>`
    /// - `--base-note <name>` or `-b <name>`: pitch class, e.g. "C" or "F#"
    /// - `--seed <n>`: fixed RNG seed for reproducible output
    /// - `--out <dir>` or `-o <dir>`: artifact directory (default "artifacts")
    /// - `--render` or `-r`: also render a WAV via timidity
    /// - `--help` or `-h`: print help and exit
    fn parse() -> Result<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut scale = String::from("major");
        let mut base_note = String::from("C");
        let mut seed = None;
        let mut out_dir = PathBuf::from("artifacts");
        let mut render = false;
        let mut i = 1;

        while i < args.len() {
            match args[i].as_str() {
                "--scale" | "-s" => {
                    i += 1;
                    scale = take_value(&args, i, "--scale")?.to_string();
                }
                "--base-note" | "-b" => {
                    i += 1;
                    base_note = take_value(&args, i, "--base-note")?.to_string();
                }
                "--seed" => {
                    i += 1;
                    let raw = take_value(&args, i, "--seed")?;
                    seed = Some(raw.parse().with_context(|| format!("bad seed: {}", raw))?);
                }
                "--out" | "-o" => {
                    i += 1;
                    out_dir = PathBuf::from(take_value(&args, i, "--out")?);
                }
                "--render" | "-r" => render = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown option: {}", other);
                    eprintln!("Use --help for usage information");
                    std::process::exit(1);
                }
            }
            i += 1;
        }

        Ok(Self {
            scale,
            base_note,
            seed,
            out_dir,
            render,
        })
    }
}

fn take_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    match args.get(i) {
        Some(value) => Ok(value),
        None => bail!("{} requires a value", flag),
    }
}

fn print_help() {
    println!("tunegen - random melody generator");
    println!();
    println!("Options:");
    println!("  -s, --scale <name>      major or minor (default: major)");
    println!("  -b, --base-note <name>  base pitch class, C through B (default: C)");
    println!("      --seed <n>          fixed RNG seed for reproducible output");
    println!("  -o, --out <dir>         artifact directory (default: artifacts)");
    println!("  -r, --render            render a WAV via timidity");
    println!("  -h, --help              print this help");
}

/// Main entry point.
fn main() -> Result<()> {
    let cli = CliOptions::parse()?;

    // Initialize logging (optional, for debugging)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Validate input up front; the generator itself accepts anything.
    if cli.scale != "major" && cli.scale != "minor" {
        bail!("scale must be \"major\" or \"minor\", got {:?}", cli.scale);
    }
    let base_pitch = match base_note_number(&cli.base_note) {
        Some(pitch) => pitch,
        None => bail!("base note must be one of C through B, got {:?}", cli.base_note),
    };

    let scale = Scale::parse(&cli.scale);
    let melody = match cli.seed {
        Some(seed) => generate_melody_with(&mut ChaCha8Rng::seed_from_u64(seed), scale, base_pitch),
        None => generate_melody_with(&mut StdRng::from_entropy(), scale, base_pitch),
    };
    tracing::info!("Generated {} notes in {} scale", melody.len(), cli.scale);

    let store = ArtifactStore::new(&cli.out_dir)
        .with_context(|| format!("Failed to open artifact store at {:?}", cli.out_dir))?;
    let mut session = SessionArtifacts::new(store.clone());

    let midi_path = store.unique_path("melody", "mid");
    midi::export_to_midi(&melody, &midi_path)
        .with_context(|| format!("Failed to write MIDI file {:?}", midi_path))?;
    session.replace_midi(midi_path.clone())?;

    let wav_path = if cli.render {
        let wav_path = store.unique_path("melody", "wav");
        TimidityRenderer
            .render(&midi_path, &wav_path)
            .context("Audio rendering failed")?;
        session.replace_audio(wav_path.clone())?;
        Some(wav_path)
    } else {
        None
    };

    // Read the artifact back and report what was written, as the service
    // layer would for its response body.
    let checked = store.checked(&midi_path)?;
    let notes = midi::decode_midi(&checked).context("Failed to decode generated MIDI")?;
    let tokens: Vec<String> = notes.iter().map(|t| t.to_string()).collect();

    let report = serde_json::json!({
        "midi_file": midi_path,
        "wav_file": wav_path,
        "notes": tokens,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    // The artifacts are this run's output; keep them past the session.
    session.persist();

    Ok(())
}
