//! Scale kinds and the per-semitone probability mask.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The scale a melody is generated in.
///
/// `Other` is the explicit fallback for unrecognized scale names: it
/// resolves to major weights rather than failing, so callers that skip
/// validation still get a melody. Host layers that want a hard error should
/// reject unknown names before building a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scale {
    Major,
    Minor,
    /// Unrecognized scale name; behaves as major.
    Other,
}

impl Scale {
    /// Parses a scale name. Anything other than "major" or "minor" maps to
    /// [`Scale::Other`].
    pub fn parse(name: &str) -> Self {
        match name {
            "major" => Scale::Major,
            "minor" => Scale::Minor,
            _ => Scale::Other,
        }
    }

    /// Semitone offsets (relative to the base pitch) that belong to the
    /// scale.
    pub fn offsets(&self) -> &'static [u8] {
        match self {
            Scale::Major | Scale::Other => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }
}

/// Per-semitone selection weights for one generation request.
///
/// In-scale offsets share 95% of the probability mass; the remaining 5% is
/// spread over the chromatic leftovers, so no offset is ever impossible,
/// only improbable. Weights over all 12 offsets sum to 1.0.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleMask {
    weights: [f64; 12],
}

/// Probability mass shared by the in-scale offsets.
const IN_SCALE_MASS: f64 = 0.95;

impl ScaleMask {
    /// Builds the mask for a scale.
    pub fn new(scale: Scale) -> Self {
        let in_scale = scale.offsets();
        let in_weight = IN_SCALE_MASS / in_scale.len() as f64;
        let out_weight = (1.0 - IN_SCALE_MASS) / (12 - in_scale.len()) as f64;

        let mut weights = [out_weight; 12];
        for &offset in in_scale {
            weights[offset as usize] = in_weight;
        }

        Self { weights }
    }

    /// The weight assigned to a semitone offset (0-11).
    #[allow(dead_code)]
    pub fn weight(&self, offset: u8) -> f64 {
        self.weights[(offset % 12) as usize]
    }

    /// Samples one semitone offset according to the weights.
    ///
    /// Uses a cumulative roll over the mask; total mass is 1.0, so the roll
    /// lands inside the table except for floating-point edge cases, which
    /// fall through to the last offset.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> u8 {
        let mut roll = rng.gen::<f64>();
        for (offset, &weight) in self.weights.iter().enumerate() {
            if roll < weight {
                return offset as u8;
            }
            roll -= weight;
        }
        11
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_parse_falls_back_to_other() {
        assert_eq!(Scale::parse("major"), Scale::Major);
        assert_eq!(Scale::parse("minor"), Scale::Minor);
        assert_eq!(Scale::parse("dorian"), Scale::Other);
        assert_eq!(Scale::parse(""), Scale::Other);
        assert_eq!(Scale::parse("MAJOR"), Scale::Other);
    }

    #[test]
    fn test_other_uses_major_offsets() {
        assert_eq!(Scale::Other.offsets(), Scale::Major.offsets());
        assert_eq!(ScaleMask::new(Scale::Other), ScaleMask::new(Scale::Major));
    }

    #[test]
    fn test_weights_sum_to_one() {
        for scale in [Scale::Major, Scale::Minor, Scale::Other] {
            let mask = ScaleMask::new(scale);
            let total: f64 = (0..12).map(|o| mask.weight(o)).sum();
            assert!(
                (total - 1.0).abs() < 1e-9,
                "{:?} weights sum to {}",
                scale,
                total
            );
        }
    }

    #[test]
    fn test_every_offset_is_possible() {
        for scale in [Scale::Major, Scale::Minor] {
            let mask = ScaleMask::new(scale);
            for offset in 0..12 {
                assert!(mask.weight(offset) > 0.0);
            }
        }
    }

    #[test]
    fn test_in_scale_weights_dominate() {
        let mask = ScaleMask::new(Scale::Minor);
        let in_scale = Scale::Minor.offsets();
        for offset in 0u8..12 {
            if in_scale.contains(&offset) {
                assert!((mask.weight(offset) - 0.95 / 7.0).abs() < 1e-12);
            } else {
                assert!((mask.weight(offset) - 0.05 / 5.0).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_sampling_is_biased_toward_scale() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mask = ScaleMask::new(Scale::Major);
        let in_scale = Scale::Major.offsets();

        let draws = 10_000;
        let in_scale_hits = (0..draws)
            .filter(|_| in_scale.contains(&mask.sample(&mut rng)))
            .count();

        // Expected hit rate is 95%; 90% leaves generous slack.
        assert!(
            in_scale_hits >= draws * 9 / 10,
            "only {}/{} draws were in scale",
            in_scale_hits,
            draws
        );
    }

    #[test]
    fn test_sample_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mask = ScaleMask::new(Scale::Minor);
        for _ in 0..1_000 {
            assert!(mask.sample(&mut rng) < 12);
        }
    }
}
