// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::Note;
use crate::{
    time::{MusicalTime, TimeRange, TimeSignature},
    traits::HasExtent,
    types::Normal,
    util::Rng,
};
use serde::{Deserialize, Serialize};

/// A [RhythmPattern] is one bar of onsets, quantized to sixteenth notes. It
/// carries no pitch; apply it to a key to get playable notes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RhythmPattern {
    time_signature: TimeSignature,
    onsets: Vec<TimeRange>,
}
impl RhythmPattern {
    #[allow(missing_docs)]
    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    #[allow(missing_docs)]
    pub fn onsets(&self) -> &[TimeRange] {
        &self.onsets
    }

    /// Produces one [Note] per onset, all on the given key.
    pub fn apply(&self, key: u8) -> Vec<Note> {
        self.onsets
            .iter()
            .map(|onset| Note {
                key,
                range: onset.clone(),
            })
            .collect()
    }
}
impl HasExtent for RhythmPattern {
    fn extent(&self) -> TimeRange {
        TimeRange(
            MusicalTime::START..MusicalTime::new_with_bars(&self.time_signature, 1),
        )
    }
}

/// Generates one-bar [RhythmPattern]s. The downbeat is always present; every
/// other sixteenth slot plays with probability equal to the density. A seeded
/// [Rng] reproduces the same stream of patterns.
#[derive(Debug)]
pub struct RhythmGenerator {
    time_signature: TimeSignature,
    density: Normal,
    rng: Rng,
}
impl RhythmGenerator {
    /// Creates a [RhythmGenerator].
    pub fn new_with(time_signature: TimeSignature, density: Normal, rng: Rng) -> Self {
        Self {
            time_signature,
            density,
            rng,
        }
    }

    #[allow(missing_docs)]
    pub fn density(&self) -> Normal {
        self.density
    }

    /// Generates the next one-bar pattern.
    pub fn generate(&mut self) -> RhythmPattern {
        let slots = self.time_signature.top * 4;
        let onsets = (0..slots)
            .filter(|&slot| slot == 0 || self.rng.rand_bool(self.density.value()))
            .map(|slot| {
                TimeRange::new_with_start_and_duration(
                    MusicalTime::DURATION_SIXTEENTH * slot,
                    MusicalTime::DURATION_SIXTEENTH,
                )
            })
            .collect();
        RhythmPattern {
            time_signature: self.time_signature,
            onsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::{assert_ge, assert_le};

    fn generator(density: f64, seed: u128) -> RhythmGenerator {
        RhythmGenerator::new_with(
            TimeSignature::default(),
            Normal::new(density),
            Rng::new_with_seed(seed),
        )
    }

    #[test]
    fn downbeat_is_always_present() {
        let mut g = generator(0.0, 1);
        for _ in 0..8 {
            let pattern = g.generate();
            assert_eq!(pattern.onsets().len(), 1);
            assert_eq!(pattern.onsets()[0].0.start, MusicalTime::START);
        }
    }

    #[test]
    fn full_density_fills_every_slot() {
        let mut g = generator(1.0, 1);
        let pattern = g.generate();
        assert_eq!(pattern.onsets().len(), 16);
    }

    #[test]
    fn onsets_are_quantized_within_the_bar() {
        let mut g = generator(0.7, 99);
        let grid = MusicalTime::UNITS_PER_BEAT / 4;
        let pattern = g.generate();
        for onset in pattern.onsets() {
            assert_eq!(onset.0.start.total_units() % grid, 0);
            assert!(pattern.extent().contains(&onset.0.start));
        }
        assert_ge!(pattern.onsets().len(), 1);
        assert_le!(pattern.onsets().len(), 16);
    }

    #[test]
    fn seeded_generators_agree() {
        let mut g1 = generator(0.5, 12345);
        let mut g2 = generator(0.5, 12345);
        for _ in 0..4 {
            assert_eq!(g1.generate(), g2.generate());
        }
    }

    #[test]
    fn pattern_applies_to_a_key() {
        let mut g = generator(1.0, 7);
        let notes = g.generate().apply(42);
        assert_eq!(notes.len(), 16);
        assert!(notes.iter().all(|note| note.key == 42));
    }
}
