// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::TheoryError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum_macros::EnumIter;

/// The seven letter names of Western notation.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}
impl NoteLetter {
    /// The letter's position within an octave, in semitones above C.
    pub fn semitones_above_c(&self) -> u8 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    /// The letter's position in C-based letter order (C=0 .. B=6). Octave
    /// numbers increment at C, so this is what octave arithmetic wants.
    pub fn c_based_index(&self) -> usize {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 1,
            NoteLetter::E => 2,
            NoteLetter::F => 3,
            NoteLetter::G => 4,
            NoteLetter::A => 5,
            NoteLetter::B => 6,
        }
    }

    /// The letter at the given C-based index, wrapping past B.
    pub fn from_c_based_index(index: usize) -> Self {
        match index % 7 {
            0 => NoteLetter::C,
            1 => NoteLetter::D,
            2 => NoteLetter::E,
            3 => NoteLetter::F,
            4 => NoteLetter::G,
            5 => NoteLetter::A,
            _ => NoteLetter::B,
        }
    }

    pub(crate) fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            _ => None,
        }
    }

    fn as_char(&self) -> char {
        match self {
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
        }
    }
}

/// A pitch modifier. We handle single sharps and flats; double accidentals
/// don't occur in the chord and scale vocabulary we accept.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accidental {
    #[allow(missing_docs)]
    #[default]
    Natural,
    #[allow(missing_docs)]
    Sharp,
    #[allow(missing_docs)]
    Flat,
}
impl Accidental {
    /// The semitone adjustment this accidental applies.
    pub fn offset(&self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }
}

/// A [Pitch] is a spelled note: letter, accidental, and octave, as in `C4`,
/// `D#5`, or `Eb2`. Spelling is preserved, so Eb and D# are distinct pitches
/// even though they map to the same MIDI key.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Pitch {
    /// The letter name.
    pub letter: NoteLetter,
    /// The accidental.
    pub accidental: Accidental,
    /// The octave, where C4 is middle C.
    pub octave: i8,
}
impl Pitch {
    /// Creates a [Pitch] from its parts.
    pub fn new_with(letter: NoteLetter, accidental: Accidental, octave: i8) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// The pitch class, 0..=11, where C and B# are both zero.
    pub fn pitch_class(&self) -> u8 {
        (self.letter.semitones_above_c() as i8 + self.accidental.offset()).rem_euclid(12) as u8
    }

    /// The MIDI key number for this pitch, following the C4=60 convention.
    pub fn key(&self) -> Result<u8, TheoryError> {
        let key = (self.octave as i32 + 1) * 12
            + self.letter.semitones_above_c() as i32
            + self.accidental.offset() as i32;
        if (0..=127).contains(&key) {
            Ok(key as u8)
        } else {
            Err(TheoryError::KeyOutOfRange(key))
        }
    }

    /// Creates the [Pitch] for a MIDI key number, spelling black keys as
    /// sharps.
    pub fn from_key(key: u8) -> Self {
        let octave = (key / 12) as i8 - 1;
        let (letter, accidental) = match key % 12 {
            0 => (NoteLetter::C, Accidental::Natural),
            1 => (NoteLetter::C, Accidental::Sharp),
            2 => (NoteLetter::D, Accidental::Natural),
            3 => (NoteLetter::D, Accidental::Sharp),
            4 => (NoteLetter::E, Accidental::Natural),
            5 => (NoteLetter::F, Accidental::Natural),
            6 => (NoteLetter::F, Accidental::Sharp),
            7 => (NoteLetter::G, Accidental::Natural),
            8 => (NoteLetter::G, Accidental::Sharp),
            9 => (NoteLetter::A, Accidental::Natural),
            10 => (NoteLetter::A, Accidental::Sharp),
            _ => (NoteLetter::B, Accidental::Natural),
        };
        Self {
            letter,
            accidental,
            octave,
        }
    }
}
impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.letter.as_char(),
            self.accidental.as_str(),
            self.octave
        )
    }
}
impl FromStr for Pitch {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::InvalidPitch(s.to_string());
        let mut chars = s.chars();
        let letter = chars.next().and_then(NoteLetter::from_char).ok_or_else(invalid)?;
        let rest = chars.as_str();
        let (accidental, octave_str) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };
        let digits = octave_str.strip_prefix('-').unwrap_or(octave_str);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let octave = octave_str.parse::<i8>().map_err(|_| invalid())?;
        // Octaves -1 through 9 cover the MIDI key range (C-1=0 .. G9=127).
        if !(-1..=9).contains(&octave) {
            return Err(invalid());
        }
        Ok(Self {
            letter,
            accidental,
            octave,
        })
    }
}
impl From<Pitch> for String {
    fn from(value: Pitch) -> Self {
        value.to_string()
    }
}
impl TryFrom<String> for Pitch {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

/// Formats a slice of pitches as a space-separated string.
pub fn format_pitches(pitches: &[Pitch]) -> String {
    pitches
        .iter()
        .map(Pitch::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
