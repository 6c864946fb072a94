// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::{Accidental, NoteLetter, Pitch, TheoryError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

/// The scale flavors we know how to spell.
#[derive(
    Clone, Copy, Debug, Default, Display, EnumIter, Eq, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScaleKind {
    /// The major (Ionian) scale.
    #[default]
    Major,
    /// The natural minor (Aeolian) scale.
    NaturalMinor,
}
impl ScaleKind {
    /// Semitone offsets of the seven scale degrees from the root.
    pub fn intervals(&self) -> &'static [u8; 7] {
        match self {
            ScaleKind::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleKind::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
        }
    }
}
impl FromStr for ScaleKind {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "major" => Ok(ScaleKind::Major),
            "minor" | "natural-minor" => Ok(ScaleKind::NaturalMinor),
            _ => Err(TheoryError::InvalidScale(s.to_string())),
        }
    }
}

/// A [Scale] is a root pitch plus a [ScaleKind]. The seven diatonic pitches
/// are derived from the kind's interval table, so any root works, including
/// ones with accidentals.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Scale {
    root: Pitch,
    kind: ScaleKind,
}
impl Scale {
    /// Creates a [Scale].
    pub fn new_with(root: Pitch, kind: ScaleKind) -> Self {
        Self { root, kind }
    }

    #[allow(missing_docs)]
    pub fn root(&self) -> Pitch {
        self.root
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// The seven diatonic pitches, starting at the root. Each degree takes
    /// the next letter name, with the accidental that lands it on the right
    /// semitone; a degree that would need a double accidental falls back to
    /// sharp spelling.
    pub fn pitches(&self) -> Vec<Pitch> {
        let root_class = self.root.pitch_class() as i8;
        let root_index = self.root.letter.c_based_index();
        self.kind
            .intervals()
            .iter()
            .enumerate()
            .map(|(degree, interval)| {
                let letter = NoteLetter::from_c_based_index(root_index + degree);
                let octave = self.root.octave + ((root_index + degree) / 7) as i8;
                let target_class = (root_class + *interval as i8).rem_euclid(12);
                let mut offset = target_class - letter.semitones_above_c() as i8;
                if offset > 6 {
                    offset -= 12;
                } else if offset < -6 {
                    offset += 12;
                }
                match offset {
                    0 => Pitch::new_with(letter, Accidental::Natural, octave),
                    1 => Pitch::new_with(letter, Accidental::Sharp, octave),
                    -1 => Pitch::new_with(letter, Accidental::Flat, octave),
                    _ => {
                        // Awkward key; respell enharmonically.
                        let key = (octave as i32 + 1) * 12 + target_class as i32;
                        Pitch::from_key(key.clamp(0, 127) as u8)
                    }
                }
            })
            .collect()
    }

    /// Whether the given pitch class belongs to this scale.
    pub fn contains_class(&self, pitch_class: u8) -> bool {
        let root_class = self.root.pitch_class();
        self.kind
            .intervals()
            .iter()
            .any(|interval| (root_class + interval) % 12 == pitch_class % 12)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theory::format_pitches;

    fn scale(root: &str, kind: ScaleKind) -> Scale {
        Scale::new_with(root.parse().unwrap(), kind)
    }

    #[test]
    fn c_major_is_all_naturals() {
        let s = scale("C4", ScaleKind::Major);
        assert_eq!(format_pitches(&s.pitches()), "C4 D4 E4 F4 G4 A4 B4");
    }

    #[test]
    fn a_natural_minor_crosses_the_octave() {
        let s = scale("A3", ScaleKind::NaturalMinor);
        assert_eq!(format_pitches(&s.pitches()), "A3 B3 C4 D4 E4 F4 G4");
    }

    #[test]
    fn flat_roots_spell_with_flats() {
        let s = scale("Eb4", ScaleKind::Major);
        assert_eq!(format_pitches(&s.pitches()), "Eb4 F4 G4 Ab4 Bb4 C5 D5");
    }

    #[test]
    fn sharp_roots_spell_with_sharps() {
        let s = scale("E4", ScaleKind::Major);
        assert_eq!(format_pitches(&s.pitches()), "E4 F#4 G#4 A4 B4 C#5 D#5");
    }

    #[test]
    fn membership_is_by_pitch_class() {
        let s = scale("C4", ScaleKind::Major);
        assert!(s.contains_class(0)); // C
        assert!(!s.contains_class(1)); // C#
        assert!(s.contains_class(11)); // B
        let m = scale("A3", ScaleKind::NaturalMinor);
        // A minor and C major share the same pitch classes.
        for class in 0..12 {
            assert_eq!(s.contains_class(class), m.contains_class(class));
        }
    }

    #[test]
    fn top_of_range_roots_spell_without_wrapping() {
        let s = scale("G9", ScaleKind::Major);
        let pitches = s.pitches();
        assert_eq!(pitches.len(), 7);
        assert_eq!(format_pitches(&pitches[..3]), "G9 A9 B9");
        assert!(pitches.iter().all(|p| p.octave >= 9));
    }

    #[test]
    fn scale_kind_parsing() {
        assert_eq!("major".parse::<ScaleKind>().unwrap(), ScaleKind::Major);
        assert_eq!("Minor".parse::<ScaleKind>().unwrap(), ScaleKind::NaturalMinor);
        assert!(matches!(
            "dorian".parse::<ScaleKind>(),
            Err(TheoryError::InvalidScale(_))
        ));
    }

    #[test]
    fn every_kind_displays_its_parseable_name() {
        use strum::IntoEnumIterator;
        for kind in ScaleKind::iter() {
            assert_eq!(kind.to_string().parse::<ScaleKind>().unwrap(), kind);
            assert_eq!(kind.intervals()[0], 0, "every scale starts at its root");
        }
    }
}
