// Copyright (c) 2024 Mike Tsao. All rights reserved.

#![warn(missing_docs)]

//! The `arranger` crate turns a melody, a list of chords, and a tempo into a
//! playable arrangement: a harmony line voiced below the melody, and a
//! generated rhythm track. Arrangements can be written out as standard MIDI
//! files.

/// The arranging pipeline: validated input, harmony suggestion, and learned
/// user preferences.
pub mod arranger;
/// Representation of music scores: notes, patterns, rhythms, arrangements.
pub mod composition;
/// Standard MIDI file rendering of arrangements.
pub mod export;
/// MIDI-related types shared across the system.
pub mod midi;
/// Music-theory building blocks: pitches, scales, chords.
pub mod theory;
/// Musical time: positions, ranges, tempo, time signatures.
pub mod time;
/// Common behaviors of system components.
pub mod traits;
/// Common data types used throughout the system.
pub mod types;
/// Unique identifiers.
pub mod uid;
/// Various helpers.
pub mod util;

/// A collection of imports that are useful to users of this crate. `use
/// arranger::prelude::*;` for easier onboarding.
pub mod prelude {
    pub use super::{
        arranger::{
            Arranger, ArrangerInput, ChordToneHarmonizer, InputError, IntervalClass,
            PreferenceStore,
        },
        composition::{
            Arrangement, ArrangementUid, ArrangementUidFactory, Note, Pattern, PatternBuilder,
            RhythmGenerator, RhythmPattern,
        },
        export,
        midi::{new_note_off, new_note_on, u4, u7, MidiChannel, MidiEvent, MidiMessage},
        theory::{
            format_pitches, Accidental, Chord, ChordQuality, NoteLetter, Pitch, Scale, ScaleKind,
            TheoryError,
        },
        time::{MusicalTime, Tempo, TimeRange, TimeSignature},
        traits::{HasExtent, HasSettings, SuggestsHarmony},
        types::{Normal, ParameterType},
        uid::{IsUid, UidFactory},
        util::Rng,
    };
}
