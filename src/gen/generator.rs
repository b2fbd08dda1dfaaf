//! Weighted random melody generation.

use super::{Scale, ScaleMask};
use crate::midi::{Melody, NoteEvent, DURATION_TICKS};
use rand::seq::SliceRandom;
use rand::Rng;

/// Lowest pitch the melody may wander down to after the first note.
const PITCH_FLOOR: u8 = 24;

/// Highest pitch the melody may wander up to after the first note.
const PITCH_CEILING: u8 = 108;

/// Fewest notes in a generated melody.
const MIN_EVENTS: usize = 10;

/// Most notes in a generated melody.
const MAX_EVENTS: usize = 30;

/// Instrument for every generated melody: 0 = acoustic grand piano.
const PIANO_PROGRAM: u8 = 0;

/// Generates a melody using the thread-local random source.
///
/// Convenience wrapper over [`generate_melody_with`] for callers that do not
/// need reproducibility. The event count is chosen uniformly from 10-30.
///
/// The caller is expected to have validated `base_pitch` (0-127) and the
/// scale name already; unrecognized scales resolve to major weights via
/// [`Scale::Other`] rather than failing.
#[allow(dead_code)]
pub fn generate_melody(scale: Scale, base_pitch: u8) -> Melody {
    generate_melody_with(&mut rand::thread_rng(), scale, base_pitch)
}

/// Generates a melody from an explicit random source.
///
/// Passing a seeded RNG makes generation fully deterministic: the same seed,
/// scale, and base pitch always produce the same melody.
pub fn generate_melody_with<R: Rng>(rng: &mut R, scale: Scale, base_pitch: u8) -> Melody {
    let count = rng.gen_range(MIN_EVENTS..=MAX_EVENTS);
    generate_melody_with_count(rng, scale, base_pitch, count)
}

/// Generates a melody with a fixed number of note events.
///
/// For each event, a semitone offset is sampled from the scale's weighted
/// mask, velocity uniformly from 40-100, and duration uniformly from
/// {120, 240, 480} ticks.
///
/// The first pitch is `base_pitch + offset` with no range clamp (saturated
/// at 127 only because a MIDI data byte cannot exceed it); every later pitch
/// is the previous pitch plus a fresh offset, clamped to [24, 108]. The
/// asymmetry is intentional, inherited behavior.
pub fn generate_melody_with_count<R: Rng>(
    rng: &mut R,
    scale: Scale,
    base_pitch: u8,
    count: usize,
) -> Melody {
    let mask = ScaleMask::new(scale);
    let mut melody = Melody::new(PIANO_PROGRAM);

    let mut prev_pitch: Option<u8> = None;
    for _ in 0..count {
        let offset = mask.sample(rng);
        let velocity = rng.gen_range(40..=100);
        let duration = *DURATION_TICKS
            .choose(rng)
            .unwrap_or(&DURATION_TICKS[0]);

        let pitch = match prev_pitch {
            Some(prev) => (prev + offset).clamp(PITCH_FLOOR, PITCH_CEILING),
            None => base_pitch.saturating_add(offset).min(127),
        };

        melody.push(NoteEvent::new(pitch, velocity, duration));
        prev_pitch = Some(pitch);
    }

    melody
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_fixed_seed_is_deterministic() {
        let mut a = ChaCha8Rng::seed_from_u64(1234);
        let mut b = ChaCha8Rng::seed_from_u64(1234);
        let first = generate_melody_with(&mut a, Scale::Major, 60);
        let second = generate_melody_with(&mut b, Scale::Major, 60);
        assert_eq!(first, second);
    }

    #[test]
    fn test_event_count_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let melody = generate_melody_with(&mut rng, Scale::Minor, 60);
            assert!((MIN_EVENTS..=MAX_EVENTS).contains(&melody.len()));
        }
    }

    #[test]
    fn test_range_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10_000 {
            let melody = generate_melody_with_count(&mut rng, Scale::Major, 60, 12);
            for (i, event) in melody.events.iter().enumerate() {
                if i > 0 {
                    assert!((PITCH_FLOOR..=PITCH_CEILING).contains(&event.pitch));
                }
                assert!((40..=100).contains(&event.velocity));
                assert!(DURATION_TICKS.contains(&event.duration_ticks));
            }
        }
    }

    #[test]
    fn test_first_pitch_is_unclamped() {
        // With a base above the ceiling, the first note may exceed 108 but
        // the rest are pulled back into range.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            let melody = generate_melody_with_count(&mut rng, Scale::Major, 120, 8);
            assert!(melody.events[0].pitch >= 120);
            for event in &melody.events[1..] {
                assert!(event.pitch <= PITCH_CEILING);
            }
        }
    }

    #[test]
    fn test_first_pitch_offset_from_base() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        for _ in 0..200 {
            let melody = generate_melody_with_count(&mut rng, Scale::Major, 60, 1);
            let pitch = melody.events[0].pitch;
            assert!((60..=71).contains(&pitch));
        }
    }

    #[test]
    fn test_single_event_bias_toward_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let in_scale = Scale::Major.offsets();

        let draws = 10_000;
        let mut in_scale_hits = 0usize;
        for _ in 0..draws {
            let melody = generate_melody_with_count(&mut rng, Scale::Major, 60, 1);
            let offset = melody.events[0].pitch - 60;
            if in_scale.contains(&offset) {
                in_scale_hits += 1;
            }
        }
        assert!(
            in_scale_hits >= draws * 9 / 10,
            "only {}/{} first notes were in scale",
            in_scale_hits,
            draws
        );
    }

    #[test]
    fn test_melody_selects_piano() {
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let melody = generate_melody_with(&mut rng, Scale::Major, 60);
        assert_eq!(melody.program, PIANO_PROGRAM);
    }

    #[test]
    fn test_forced_count_is_respected() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for count in [0usize, 1, 10, 30, 64] {
            let melody = generate_melody_with_count(&mut rng, Scale::Minor, 48, count);
            assert_eq!(melody.len(), count);
        }
    }
}
