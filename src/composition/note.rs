// Copyright (c) 2024 Mike Tsao. All rights reserved.

use crate::{
    midi::{new_note_off, new_note_on, MidiEvent},
    theory::{Pitch, TheoryError},
    time::{MusicalTime, TimeRange},
};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// A [Note] is a single played note. It knows which key it's playing (a MIDI
/// key value) and when (start/end) it's supposed to play, relative to time
/// zero.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Note {
    /// The MIDI key code for the note. 60 is middle C.
    pub key: u8,
    /// The range of time when this note should play.
    pub range: TimeRange,
}
impl Note {
    /// The velocity used when a note is turned into MIDI events.
    pub const VELOCITY: u8 = 127;

    /// Creates a [Note] from a key and a start/end (inclusive start, exclusive
    /// end).
    pub const fn new_with_start_and_end(key: u8, start: MusicalTime, end: MusicalTime) -> Self {
        Self {
            key,
            range: TimeRange(start..end),
        }
    }

    /// Creates a [Note] from a key and start/duration.
    pub const fn new_with(key: u8, start: MusicalTime, duration: MusicalTime) -> Self {
        let end = MusicalTime::new_with_units(start.total_units() + duration.total_units());
        Self::new_with_start_and_end(key, start, end)
    }

    /// Creates a [Note] from a spelled [Pitch] and start/duration. Fails if
    /// the pitch is outside the MIDI key range.
    pub fn new_with_pitch(
        pitch: &Pitch,
        start: MusicalTime,
        duration: MusicalTime,
    ) -> Result<Self, TheoryError> {
        Ok(Self::new_with(pitch.key()?, start, duration))
    }

    /// The range of time this note covers.
    pub fn extent(&self) -> TimeRange {
        self.range.clone()
    }
}
impl Add<MusicalTime> for Note {
    type Output = Self;

    fn add(self, rhs: MusicalTime) -> Self::Output {
        Self::new_with_start_and_end(self.key, self.range.0.start + rhs, self.range.0.end + rhs)
    }
}
impl From<Note> for Vec<MidiEvent> {
    fn from(note: Note) -> Self {
        vec![
            MidiEvent {
                message: new_note_on(note.key, Note::VELOCITY),
                time: note.range.0.start,
            },
            MidiEvent {
                message: new_note_off(note.key, Note::VELOCITY),
                time: note.range.0.end,
            },
        ]
    }
}
