// Copyright (c) 2024 Mike Tsao. All rights reserved.

use crate::{
    theory::{Chord, Scale},
    time::Tempo,
    types::ParameterType,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways an arranging request can be unusable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    /// The melody is too short to harmonize meaningfully.
    #[error("melody must contain at least {min} notes (got {got})", min = ArrangerInput::MIN_MELODY_LEN, got = .0)]
    MelodyTooShort(usize),
    /// There aren't enough chords to make a progression.
    #[error("at least {min} chords are required (got {got})", min = ArrangerInput::MIN_CHORD_COUNT, got = .0)]
    TooFewChords(usize),
    /// The tempo is outside the performable range.
    #[error("tempo must be between {min} and {max} BPM (got {got})", min = Tempo::MIN_VALUE, max = Tempo::MAX_VALUE, got = .0)]
    TempoOutOfRange(ParameterType),
    /// A melody entry isn't a MIDI key.
    #[error("melody note {0} is not a MIDI key")]
    MelodyKeyOutOfRange(u8),
}

/// An [ArrangerInput] is everything the user tells us about the piece they
/// want arranged: the melody as MIDI keys, the chords to harmonize with, the
/// tempo, and optionally the key the piece is in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArrangerInput {
    /// The melody, one MIDI key per beat.
    pub melody: Vec<u8>,
    /// The chord progression, one chord per bar, cycling.
    pub chords: Vec<Chord>,
    /// Beats per minute.
    pub tempo: Tempo,
    /// The key of the piece, if known. Harmonizers use it to prefer diatonic
    /// tones.
    #[serde(default)]
    pub key: Option<Scale>,
}
impl ArrangerInput {
    /// The fewest melody notes we'll accept.
    pub const MIN_MELODY_LEN: usize = 5;
    /// The fewest chords we'll accept.
    pub const MIN_CHORD_COUNT: usize = 2;

    /// Checks the request against the acceptance rules. Everything downstream
    /// of this check can assume the input is well-formed.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.melody.len() < Self::MIN_MELODY_LEN {
            return Err(InputError::MelodyTooShort(self.melody.len()));
        }
        if self.chords.len() < Self::MIN_CHORD_COUNT {
            return Err(InputError::TooFewChords(self.chords.len()));
        }
        if !self.tempo.is_performable() {
            return Err(InputError::TempoOutOfRange(self.tempo.value()));
        }
        if let Some(&key) = self.melody.iter().find(|&&key| key > 127) {
            return Err(InputError::MelodyKeyOutOfRange(key));
        }
        Ok(())
    }

    /// Flattens the request into a numeric feature vector: the melody keys,
    /// each chord's chroma, and the tempo, concatenated in that order. This
    /// is the representation a learned model would consume.
    pub fn feature_vector(&self) -> Vec<ParameterType> {
        let mut features: Vec<ParameterType> =
            self.melody.iter().map(|&key| key as ParameterType).collect();
        for chord in &self.chords {
            features.extend(chord.chroma());
        }
        features.push(self.tempo.value());
        features
    }
}
