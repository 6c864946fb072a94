// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::{ArrangerInput, IntervalClass, PreferenceStore};
use crate::{theory::Chord, time::TimeSignature, traits::SuggestsHarmony};

/// A [ChordToneHarmonizer] suggests harmony deterministically: each melody
/// note gets one chord tone voiced below it. The active chord changes once
/// per bar, cycling through the input progression. Candidate tones are scored
/// with the user's learned interval preferences, with a bonus for staying
/// diatonic when the piece's key is known, and a slight pull toward close
/// voicings so that equal preferences produce tight harmony rather than
/// arbitrary jumps.
#[derive(Debug, Default)]
pub struct ChordToneHarmonizer {
    preferences: PreferenceStore,
    time_signature: TimeSignature,
}
impl ChordToneHarmonizer {
    /// How much being in the key is worth, relative to preference weights.
    const DIATONIC_BONUS: f64 = 0.125;

    /// A tiebreaker that favors candidates closer to the melody. Small enough
    /// that it never overrides a real preference difference.
    const VOICING_NUDGE: f64 = 1.0 / 1024.0;

    /// Creates a [ChordToneHarmonizer] with the given preferences.
    pub fn new_with(preferences: PreferenceStore) -> Self {
        Self {
            preferences,
            time_signature: Default::default(),
        }
    }

    #[allow(missing_docs)]
    pub fn preferences(&self) -> &PreferenceStore {
        &self.preferences
    }

    #[allow(missing_docs)]
    pub fn preferences_mut(&mut self) -> &mut PreferenceStore {
        &mut self.preferences
    }

    #[allow(missing_docs)]
    pub fn set_time_signature(&mut self, time_signature: TimeSignature) {
        self.time_signature = time_signature;
    }

    /// The chord governing the melody note at the given index, assuming one
    /// melody note per beat and one chord per bar, cycling.
    fn active_chord<'a>(&self, chords: &'a [Chord], melody_index: usize) -> &'a Chord {
        &chords[(melody_index / self.time_signature.top) % chords.len()]
    }

    /// The chord tones in the octave below the melody note. Empty only when
    /// the melody note is at the very bottom of the key range.
    fn candidates_below(chord: &Chord, melody_key: u8) -> Vec<u8> {
        let melody = melody_key as i32;
        chord
            .tone_classes()
            .iter()
            .filter_map(|&class| {
                let class = class as i32;
                let key = (melody - 1) - (melody - 1 - class).rem_euclid(12);
                (key >= 0).then_some(key as u8)
            })
            .collect()
    }

    fn score(&self, input: &ArrangerInput, melody_key: u8, candidate: u8) -> f64 {
        let distance = melody_key.abs_diff(candidate);
        let mut score = self
            .preferences
            .weight(IntervalClass::new(distance))
            .value();
        if let Some(scale) = &input.key {
            if scale.contains_class(candidate % 12) {
                score += Self::DIATONIC_BONUS;
            }
        }
        score - f64::from(distance) * Self::VOICING_NUDGE
    }
}
impl SuggestsHarmony for ChordToneHarmonizer {
    fn suggest(&self, input: &ArrangerInput) -> anyhow::Result<Vec<u8>> {
        input.validate()?;
        log::debug!(
            "harmonizing {} melody notes over {} chords",
            input.melody.len(),
            input.chords.len()
        );
        let harmony = input
            .melody
            .iter()
            .enumerate()
            .map(|(index, &melody_key)| {
                let chord = self.active_chord(&input.chords, index);
                let candidates = Self::candidates_below(chord, melody_key);
                if candidates.is_empty() {
                    // The melody is at the bottom of the key range; voice the
                    // chord root above it instead.
                    let root = chord.root_class();
                    return if root > melody_key { root } else { root + 12 };
                }
                candidates
                    .into_iter()
                    .max_by(|a, b| {
                        self.score(input, melody_key, *a)
                            .total_cmp(&self.score(input, melody_key, *b))
                    })
                    .unwrap()
            })
            .collect();
        Ok(harmony)
    }
}
