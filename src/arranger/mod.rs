// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Turns a musical request into a complete [Arrangement]: the melody laid out
//! on the grid, a harmony line suggested under it, and a generated percussion
//! track.

pub use harmonizer::ChordToneHarmonizer;
pub use input::{ArrangerInput, InputError};
pub use preference::{IntervalClass, PreferenceStore};

mod harmonizer;
mod input;
mod preference;

use crate::{
    composition::{
        Arrangement, ArrangementUidFactory, Note, Pattern, PatternBuilder, RhythmGenerator,
    },
    time::{MusicalTime, TimeSignature},
    traits::{HasExtent, SuggestsHarmony},
    types::Normal,
    util::Rng,
};

/// An [Arranger] coordinates the pieces: it validates the request, asks its
/// harmonizer for a harmony line, lays melody and harmony out one note per
/// beat, and generates a percussion track bar by bar. Each finished
/// [Arrangement] gets a uid from the arranger's factory.
#[derive(Debug)]
pub struct Arranger<H: SuggestsHarmony> {
    harmonizer: H,
    uid_factory: ArrangementUidFactory,
    time_signature: TimeSignature,
    rhythm_density: Normal,
}
impl<H: SuggestsHarmony + Default> Default for Arranger<H> {
    fn default() -> Self {
        Self::new_with(H::default())
    }
}
impl<H: SuggestsHarmony> Arranger<H> {
    /// The General MIDI closed hi-hat, which carries the generated rhythm.
    const HI_HAT: u8 = 42;
    /// The General MIDI acoustic bass drum, which anchors each downbeat.
    const KICK: u8 = 35;

    /// Creates an [Arranger] with the given harmonizer.
    pub fn new_with(harmonizer: H) -> Self {
        Self {
            harmonizer,
            uid_factory: Default::default(),
            time_signature: Default::default(),
            rhythm_density: Default::default(),
        }
    }

    #[allow(missing_docs)]
    pub fn harmonizer(&self) -> &H {
        &self.harmonizer
    }

    #[allow(missing_docs)]
    pub fn harmonizer_mut(&mut self) -> &mut H {
        &mut self.harmonizer
    }

    #[allow(missing_docs)]
    pub fn set_rhythm_density(&mut self, density: Normal) {
        self.rhythm_density = density;
    }

    /// Produces an [Arrangement] for the request. The [Rng] drives rhythm
    /// generation only; the same seed and request always produce the same
    /// arrangement.
    pub fn arrange(&self, input: &ArrangerInput, rng: Rng) -> anyhow::Result<Arrangement> {
        input.validate()?;
        let harmony_keys = self.harmonizer.suggest(input)?;

        let melody = self.beat_pattern(&input.melody)?;
        let harmony = self.beat_pattern(&harmony_keys)?;
        let bars = melody.duration().total_beats() / self.time_signature.top;
        let rhythm = self.rhythm_pattern(bars, rng)?;

        log::info!(
            "arranged {} melody notes into {} bars at {}",
            input.melody.len(),
            bars,
            input.tempo
        );
        Ok(Arrangement {
            uid: self.uid_factory.mint_next(),
            tempo: input.tempo,
            time_signature: self.time_signature,
            melody,
            harmony,
            rhythm,
        })
    }

    /// Lays a series of keys out one per beat, each a quarter note long.
    fn beat_pattern(&self, keys: &[u8]) -> anyhow::Result<Pattern> {
        let mut builder = PatternBuilder::default();
        builder.time_signature(self.time_signature);
        for (beat, &key) in keys.iter().enumerate() {
            builder.note(Note::new_with(
                key,
                MusicalTime::ONE_BEAT * beat,
                MusicalTime::DURATION_QUARTER,
            ));
        }
        Ok(builder.build()?)
    }

    /// Builds the percussion track: a fresh one-bar rhythm for each bar on
    /// the hi-hat, plus a kick on every downbeat.
    fn rhythm_pattern(&self, bars: usize, rng: Rng) -> anyhow::Result<Pattern> {
        let mut generator =
            RhythmGenerator::new_with(self.time_signature, self.rhythm_density, rng);
        let mut builder = PatternBuilder::default();
        builder.time_signature(self.time_signature);
        for bar in 0..bars {
            let offset = MusicalTime::new_with_bars(&self.time_signature, bar);
            builder.note(Note::new_with(
                Self::KICK,
                offset,
                MusicalTime::DURATION_SIXTEENTH,
            ));
            for note in generator.generate().apply(Self::HI_HAT) {
                builder.note(note + offset);
            }
        }
        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::Tempo;

    fn request() -> ArrangerInput {
        ArrangerInput {
            melody: vec![60, 62, 64, 65, 67, 69],
            chords: vec!["Cmaj7".parse().unwrap(), "G7".parse().unwrap()],
            tempo: Tempo(96.0),
            key: None,
        }
    }

    #[test]
    fn arrange_rejects_invalid_requests() {
        let arranger = Arranger::<ChordToneHarmonizer>::default();
        let mut input = request();
        input.melody.truncate(2);
        assert!(arranger.arrange(&input, Rng::new_with_seed(1)).is_err());
    }

    #[test]
    fn melody_and_harmony_move_in_lockstep() {
        let arranger = Arranger::<ChordToneHarmonizer>::default();
        let input = request();
        let arrangement = arranger.arrange(&input, Rng::new_with_seed(1)).unwrap();

        assert_eq!(arrangement.melody.notes().len(), input.melody.len());
        assert_eq!(
            arrangement.harmony.notes().len(),
            arrangement.melody.notes().len()
        );
        for (melody, harmony) in arrangement
            .melody
            .notes()
            .iter()
            .zip(arrangement.harmony.notes())
        {
            assert_eq!(melody.range, harmony.range);
            assert!(harmony.key < melody.key);
        }
        assert_eq!(arrangement.melody.notes()[1].range.0.start, MusicalTime::ONE_BEAT);
        assert_eq!(arrangement.tempo, input.tempo);
    }

    #[test]
    fn rhythm_spans_the_whole_arrangement() {
        let arranger = Arranger::<ChordToneHarmonizer>::default();
        let arrangement = arranger
            .arrange(&request(), Rng::new_with_seed(7))
            .unwrap();

        // Six melody beats in 4/4 round up to two bars.
        assert_eq!(
            arrangement.rhythm.extent(),
            arrangement.melody.extent()
        );
        // Every bar has its kick.
        let kicks: Vec<_> = arrangement
            .rhythm
            .notes()
            .iter()
            .filter(|note| note.key == 35)
            .collect();
        assert_eq!(kicks.len(), 2);
        assert_eq!(kicks[0].range.0.start, MusicalTime::START);
        assert_eq!(kicks[1].range.0.start, MusicalTime::new_with_beats(4));
    }

    #[test]
    fn same_seed_same_arrangement() {
        let arranger = Arranger::<ChordToneHarmonizer>::default();
        let a = arranger.arrange(&request(), Rng::new_with_seed(42)).unwrap();
        let b = arranger.arrange(&request(), Rng::new_with_seed(42)).unwrap();
        assert_eq!(a.melody, b.melody);
        assert_eq!(a.harmony, b.harmony);
        assert_eq!(a.rhythm, b.rhythm);
    }

    #[test]
    fn each_arrangement_gets_its_own_uid() {
        let arranger = Arranger::<ChordToneHarmonizer>::default();
        let a = arranger.arrange(&request(), Rng::new_with_seed(1)).unwrap();
        let b = arranger.arrange(&request(), Rng::new_with_seed(1)).unwrap();
        assert_ne!(a.uid, b.uid);
    }
}
