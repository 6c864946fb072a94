// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Handles musical time: positions within a score, ranges, tempo, and time
//! signatures.

use crate::types::ParameterType;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    ops::{Add, AddAssign, Mul, Range, Sub},
};

/// [MusicalTime] is a point in a score, measured in fixed subdivisions of a
/// beat. Keeping time in integer units means positions compare and hash
/// exactly, which matters when notes are used as map keys or deduplicated.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub struct MusicalTime {
    units: usize,
}
#[allow(missing_docs)]
impl MusicalTime {
    /// How finely a beat is subdivided. A sixteenth note is a quarter of
    /// this, which leaves plenty of room for swing and humanization later.
    pub const UNITS_PER_BEAT: usize = 4096;

    pub const START: Self = Self { units: 0 };
    pub const TIME_MAX: Self = Self { units: usize::MAX };
    pub const ONE_UNIT: Self = Self { units: 1 };
    pub const ONE_BEAT: Self = Self {
        units: Self::UNITS_PER_BEAT,
    };
    pub const DURATION_SIXTEENTH: Self = Self {
        units: Self::UNITS_PER_BEAT / 4,
    };
    pub const DURATION_EIGHTH: Self = Self {
        units: Self::UNITS_PER_BEAT / 2,
    };
    pub const DURATION_QUARTER: Self = Self {
        units: Self::UNITS_PER_BEAT,
    };
    pub const DURATION_HALF: Self = Self {
        units: Self::UNITS_PER_BEAT * 2,
    };
    pub const DURATION_WHOLE: Self = Self {
        units: Self::UNITS_PER_BEAT * 4,
    };

    /// Creates a [MusicalTime] from raw units.
    pub const fn new_with_units(units: usize) -> Self {
        Self { units }
    }

    /// Creates a [MusicalTime] from whole beats.
    pub const fn new_with_beats(beats: usize) -> Self {
        Self {
            units: beats * Self::UNITS_PER_BEAT,
        }
    }

    /// Creates a [MusicalTime] from whole bars of the given time signature.
    pub fn new_with_bars(time_signature: &TimeSignature, bars: usize) -> Self {
        Self::new_with_beats(time_signature.top * bars)
    }

    /// The total number of units since time zero.
    pub const fn total_units(&self) -> usize {
        self.units
    }

    /// The number of whole beats since time zero, rounding down.
    pub const fn total_beats(&self) -> usize {
        self.units / Self::UNITS_PER_BEAT
    }

    /// Returns this time rounded to the nearest sixteenth note.
    pub fn quantized(&self) -> Self {
        let grid = Self::UNITS_PER_BEAT / 4;
        let units = ((self.units + grid / 2) / grid) * grid;
        Self { units }
    }
}
impl fmt::Display for MusicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:04}",
            self.total_beats(),
            self.units % Self::UNITS_PER_BEAT
        )
    }
}
impl Add for MusicalTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units + rhs.units,
        }
    }
}
impl AddAssign for MusicalTime {
    fn add_assign(&mut self, rhs: Self) {
        self.units += rhs.units;
    }
}
impl Sub for MusicalTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            units: self.units - rhs.units,
        }
    }
}
impl Mul<usize> for MusicalTime {
    type Output = Self;

    fn mul(self, rhs: usize) -> Self::Output {
        Self {
            units: self.units * rhs,
        }
    }
}

/// A [TimeRange] is a half-open range of score time: inclusive start,
/// exclusive end.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeRange(pub Range<MusicalTime>);
impl TimeRange {
    /// Creates a [TimeRange] from a start position and a duration.
    pub fn new_with_start_and_duration(start: MusicalTime, duration: MusicalTime) -> Self {
        Self(start..start + duration)
    }

    /// The length of this range.
    pub fn duration(&self) -> MusicalTime {
        self.0.end - self.0.start
    }

    /// Whether the given time falls within this range.
    pub fn contains(&self, time: &MusicalTime) -> bool {
        self.0.contains(time)
    }

    /// Returns a copy of this range moved later by the given amount.
    pub fn shift_right(&self, time: MusicalTime) -> Self {
        Self(self.0.start + time..self.0.end + time)
    }

    /// Grows this range just enough to cover the other one. An empty range
    /// adopts the other range rather than pinning the union to time zero.
    pub fn expand_with_range(&mut self, other: &TimeRange) {
        if other.0.is_empty() {
            return;
        }
        if self.0.is_empty() {
            *self = other.clone();
        } else {
            self.0 = self.0.start.min(other.0.start)..self.0.end.max(other.0.end);
        }
    }
}
impl From<Range<MusicalTime>> for TimeRange {
    fn from(value: Range<MusicalTime>) -> Self {
        Self(value)
    }
}

/// Beats per minute.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tempo(pub ParameterType);
impl Default for Tempo {
    fn default() -> Self {
        Self(128.0)
    }
}
impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("{:0.2} BPM", self.0))
    }
}
impl From<u16> for Tempo {
    fn from(value: u16) -> Self {
        Self(value as ParameterType)
    }
}
impl From<ParameterType> for Tempo {
    fn from(value: ParameterType) -> Self {
        Self(value)
    }
}
impl Tempo {
    /// The slowest performable tempo.
    pub const MIN_VALUE: ParameterType = 40.0;

    /// The fastest performable tempo.
    pub const MAX_VALUE: ParameterType = 240.0;

    /// A getter for the raw value.
    pub fn value(&self) -> ParameterType {
        self.0
    }

    /// Beats per second.
    pub fn bps(&self) -> ParameterType {
        self.0 / 60.0
    }

    /// Whether this tempo is within the performable range.
    pub fn is_performable(&self) -> bool {
        (Self::MIN_VALUE..=Self::MAX_VALUE).contains(&self.0)
    }

    /// Microseconds per beat, as written into MIDI tempo meta-events.
    pub fn microseconds_per_beat(&self) -> u32 {
        (60_000_000.0 / self.0).round() as u32
    }
}

/// [TimeSignature] is a musical time signature. The top number is beats per
/// bar, and the bottom is the note value of a beat.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimeSignature {
    /// Beats per bar.
    pub top: usize,
    /// The note value that counts as one beat. Must be a power of two.
    pub bottom: usize,
}
impl Default for TimeSignature {
    fn default() -> Self {
        Self { top: 4, bottom: 4 }
    }
}
impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.top, self.bottom)
    }
}
impl TimeSignature {
    /// Creates a [TimeSignature], validating both numbers.
    pub fn new_with(top: usize, bottom: usize) -> anyhow::Result<Self> {
        if top == 0 {
            return Err(anyhow!("time signature top can't be zero"));
        }
        if bottom == 0 || !bottom.is_power_of_two() {
            return Err(anyhow!("time signature bottom must be a power of two"));
        }
        Ok(Self { top, bottom })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn musical_time_constants_are_consistent() {
        assert_eq!(MusicalTime::DURATION_QUARTER, MusicalTime::ONE_BEAT);
        assert_eq!(
            MusicalTime::DURATION_SIXTEENTH * 4,
            MusicalTime::DURATION_QUARTER
        );
        assert_eq!(MusicalTime::DURATION_WHOLE, MusicalTime::ONE_BEAT * 4);
    }

    #[test]
    fn musical_time_quantizes_to_sixteenths() {
        let grid = MusicalTime::UNITS_PER_BEAT / 4;
        assert_eq!(MusicalTime::START.quantized(), MusicalTime::START);
        assert_eq!(
            MusicalTime::new_with_units(grid / 2 - 1).quantized(),
            MusicalTime::START
        );
        assert_eq!(
            MusicalTime::new_with_units(grid / 2).quantized(),
            MusicalTime::new_with_units(grid)
        );
        assert_eq!(
            MusicalTime::new_with_units(grid + 1).quantized(),
            MusicalTime::new_with_units(grid)
        );
    }

    #[test]
    fn time_range_expansion() {
        let mut range = TimeRange::default();
        assert_eq!(range.duration(), MusicalTime::START);

        let one_bar = TimeRange(MusicalTime::ONE_BEAT..MusicalTime::new_with_beats(5));
        range.expand_with_range(&one_bar);
        assert_eq!(
            range, one_bar,
            "Expanding an empty range should adopt the other range, not pin to time zero"
        );

        range.expand_with_range(&TimeRange(
            MusicalTime::START..MusicalTime::new_with_beats(2),
        ));
        assert_eq!(
            range,
            TimeRange(MusicalTime::START..MusicalTime::new_with_beats(5))
        );
    }

    #[test]
    fn tempo_basics() {
        assert_eq!(Tempo::default().value(), 128.0);
        assert_eq!(Tempo(120.0).bps(), 2.0);
        assert_eq!(Tempo(120.0).microseconds_per_beat(), 500_000);
        assert_eq!(format!("{}", Tempo(90.0)), "90.00 BPM");

        assert!(Tempo(40.0).is_performable());
        assert!(Tempo(240.0).is_performable());
        assert!(!Tempo(39.9).is_performable());
        assert!(!Tempo(240.1).is_performable());
    }

    #[test]
    fn time_signature_validation() {
        assert!(TimeSignature::new_with(4, 4).is_ok());
        assert!(TimeSignature::new_with(7, 8).is_ok());
        assert!(TimeSignature::new_with(0, 4).is_err());
        assert!(TimeSignature::new_with(4, 0).is_err());
        assert!(TimeSignature::new_with(4, 3).is_err());
        assert_eq!(format!("{}", TimeSignature::default()), "4/4");
    }
}
