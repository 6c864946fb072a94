// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::{Accidental, NoteLetter, Pitch, TheoryError};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum_macros::EnumIter;

/// The seventh-chord qualities in our vocabulary.
#[derive(Clone, Copy, Debug, EnumIter, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    /// Major seventh, as in Cmaj7.
    Major7,
    /// Dominant seventh, as in G7.
    Dominant7,
    /// Minor seventh, as in Am7.
    Minor7,
}
impl ChordQuality {
    /// Semitone offsets of the four chord tones from the root.
    pub fn offsets(&self) -> &'static [u8; 4] {
        match self {
            ChordQuality::Major7 => &[0, 4, 7, 11],
            ChordQuality::Dominant7 => &[0, 4, 7, 10],
            ChordQuality::Minor7 => &[0, 3, 7, 10],
        }
    }

    fn suffix(&self) -> &'static str {
        match self {
            ChordQuality::Major7 => "maj7",
            ChordQuality::Dominant7 => "7",
            ChordQuality::Minor7 => "m7",
        }
    }
}

/// A [Chord] is a chord symbol: a root (with no octave) and a quality, as in
/// `Cmaj7`, `G7`, or `Am7`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Chord {
    /// The root letter name.
    pub root: NoteLetter,
    /// The root's accidental.
    pub accidental: Accidental,
    /// The chord quality.
    pub quality: ChordQuality,
}
impl Chord {
    /// Creates a [Chord] from its parts.
    pub fn new_with(root: NoteLetter, accidental: Accidental, quality: ChordQuality) -> Self {
        Self {
            root,
            accidental,
            quality,
        }
    }

    /// The pitch class of the root, 0..=11.
    pub fn root_class(&self) -> u8 {
        Pitch::new_with(self.root, self.accidental, 0).pitch_class()
    }

    /// The pitch classes of the four chord tones.
    pub fn tone_classes(&self) -> [u8; 4] {
        let root = self.root_class();
        let offsets = self.quality.offsets();
        [
            (root + offsets[0]) % 12,
            (root + offsets[1]) % 12,
            (root + offsets[2]) % 12,
            (root + offsets[3]) % 12,
        ]
    }

    /// Whether the given pitch class is a tone of this chord.
    pub fn contains_class(&self, pitch_class: u8) -> bool {
        self.tone_classes().contains(&(pitch_class % 12))
    }

    /// A 12-dimensional chroma vector: 1.0 at each chord tone's pitch class,
    /// 0.0 elsewhere. This is the feature representation handed to models.
    pub fn chroma(&self) -> [f64; 12] {
        let mut chroma = [0.0; 12];
        for class in self.tone_classes() {
            chroma[class as usize] = 1.0;
        }
        chroma
    }
}
impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pitch = Pitch::new_with(self.root, self.accidental, 0).to_string();
        let root = pitch.trim_end_matches(char::is_numeric);
        write!(f, "{}{}", root, self.quality.suffix())
    }
}
impl FromStr for Chord {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TheoryError::InvalidChord(s.to_string());
        let mut chars = s.chars();
        let root = chars
            .next()
            .and_then(NoteLetter::from_char)
            .ok_or_else(invalid)?;
        let rest = chars.as_str();
        let (accidental, suffix) = match rest.chars().next() {
            Some('#') => (Accidental::Sharp, &rest[1..]),
            Some('b') => (Accidental::Flat, &rest[1..]),
            _ => (Accidental::Natural, rest),
        };
        let quality = match suffix {
            "maj7" => ChordQuality::Major7,
            "7" => ChordQuality::Dominant7,
            "m7" | "min7" => ChordQuality::Minor7,
            _ => return Err(invalid()),
        };
        Ok(Self {
            root,
            accidental,
            quality,
        })
    }
}
impl From<Chord> for String {
    fn from(value: Chord) -> Self {
        value.to_string()
    }
}
impl TryFrom<String> for Chord {
    type Error = TheoryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}
