// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::Note;
use crate::{
    midi::MidiEvent,
    time::{MusicalTime, TimeRange, TimeSignature},
    traits::HasExtent,
};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

impl PatternBuilder {
    /// The value in a note sequence that indicates a rest.
    pub const REST: u8 = 255;

    /// Builds the [Pattern].
    pub fn build(&self) -> Result<Pattern, PatternBuilderError> {
        match self.build_from_builder() {
            Ok(mut pattern) => {
                pattern.post_build();
                Ok(pattern)
            }
            Err(e) => Err(e),
        }
    }

    /// Adds notes from a step sequence: one entry per sixteenth note, with
    /// [PatternBuilder::REST] meaning silence. Each note gets the given
    /// duration, or a sixteenth if none is specified.
    pub fn note_sequence(
        &mut self,
        sequence: Vec<u8>,
        note_duration: Option<MusicalTime>,
    ) -> &mut Self {
        let duration = note_duration.unwrap_or(MusicalTime::DURATION_SIXTEENTH);
        for (index, key) in sequence.iter().enumerate() {
            if *key == Self::REST {
                continue;
            }
            self.note(Note::new_with(
                *key,
                MusicalTime::DURATION_SIXTEENTH * index,
                duration,
            ));
        }
        self
    }
}

/// A [Pattern] is a score fragment: an ordered collection of [Note]s plus the
/// time signature they were written in. A pattern's extent is always a whole
/// number of bars, so an empty 4/4 pattern still occupies one measure.
#[derive(Clone, Debug, Default, Builder, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[builder(build_fn(private, name = "build_from_builder"))]
pub struct Pattern {
    /// The time signature this pattern was written in.
    #[builder(default)]
    time_signature: TimeSignature,

    /// The notes, kept sorted by start time and then key.
    #[builder(default, setter(each(name = "note", into)))]
    notes: Vec<Note>,
}
impl Pattern {
    fn post_build(&mut self) {
        self.notes
            .sort_by_key(|note| (note.range.0.start, note.key));
    }

    #[allow(missing_docs)]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    #[allow(missing_docs)]
    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    /// Returns a copy of this pattern moved later by the given amount.
    pub fn shift_right(&self, time: MusicalTime) -> Self {
        Self {
            time_signature: self.time_signature,
            notes: self
                .notes
                .iter()
                .map(|note| note.clone() + time)
                .collect(),
        }
    }
}
impl HasExtent for Pattern {
    fn extent(&self) -> TimeRange {
        let last_unit = self
            .notes
            .iter()
            .map(|note| note.range.0.end.total_units())
            .max()
            .unwrap_or(0);
        let bar_units = self.time_signature.top * MusicalTime::UNITS_PER_BEAT;
        let bars = ((last_unit + bar_units - 1) / bar_units).max(1);
        TimeRange(MusicalTime::START..MusicalTime::new_with_beats(bars * self.time_signature.top))
    }
}
#[allow(clippy::from_over_into)]
impl Into<Vec<MidiEvent>> for Pattern {
    fn into(self) -> Vec<MidiEvent> {
        self.notes.into_iter().fold(Vec::default(), |mut v, note| {
            let events: Vec<MidiEvent> = note.into();
            v.extend(events);
            v
        })
    }
}
