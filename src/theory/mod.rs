// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Music-theory building blocks: pitch spelling and parsing, scales, and
//! chords. These are the vocabulary that the arranging pipeline speaks.

use thiserror::Error;

pub use chord::{Chord, ChordQuality};
pub use note::{format_pitches, Accidental, NoteLetter, Pitch};
pub use scale::{Scale, ScaleKind};

mod chord;
mod note;
mod scale;

/// Things that can go wrong while interpreting musical notation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TheoryError {
    /// A pitch string didn't match the `C4` / `D#5` / `Eb2` form.
    #[error("invalid pitch: {0}")]
    InvalidPitch(String),
    /// A chord symbol wasn't one we understand.
    #[error("invalid chord: {0}")]
    InvalidChord(String),
    /// A scale name wasn't one we understand.
    #[error("unsupported scale type: {0}")]
    InvalidScale(String),
    /// A pitch fell outside the 0..=127 MIDI key range.
    #[error("pitch is outside the MIDI key range: {0}")]
    KeyOutOfRange(i32),
}

/// The most commonly used imports.
pub mod prelude {
    pub use super::{Accidental, Chord, ChordQuality, NoteLetter, Pitch, Scale, ScaleKind};
}
