// Copyright (c) 2024 Mike Tsao. All rights reserved.

use super::Pattern;
use crate::{
    midi::MidiChannel,
    time::{Tempo, TimeRange, TimeSignature},
    traits::HasExtent,
    uid::{IsUid, UidFactory},
};
use delegate::delegate;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identifies an [Arrangement].
#[derive(Clone, Copy, Debug, Default, Display, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrangementUid(usize);
impl IsUid for ArrangementUid {
    fn as_usize(&self) -> usize {
        self.0
    }
}
impl From<usize> for ArrangementUid {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

/// Mints [ArrangementUid]s.
#[derive(Debug, Serialize, Deserialize)]
pub struct ArrangementUidFactory(UidFactory<ArrangementUid>);
impl Default for ArrangementUidFactory {
    fn default() -> Self {
        Self(UidFactory::<ArrangementUid>::new(1024))
    }
}
impl ArrangementUidFactory {
    delegate! {
        to self.0 {
            /// Generates the next unique [ArrangementUid].
            pub fn mint_next(&self) -> ArrangementUid;
        }
    }
}

/// An [Arrangement] is a finished piece of work: the user's melody, the
/// suggested harmony line, and a generated rhythm track, all sharing one
/// tempo and time signature.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Arrangement {
    /// Identifies this arrangement among everything the factory has minted.
    pub uid: ArrangementUid,
    /// Beats per minute for the whole arrangement.
    pub tempo: Tempo,
    /// The time signature shared by all three patterns.
    pub time_signature: TimeSignature,
    /// The melody as given by the user.
    pub melody: Pattern,
    /// The harmony line, one note under each melody note.
    pub harmony: Pattern,
    /// The percussion track.
    pub rhythm: Pattern,
}
impl Arrangement {
    /// The tracks of this arrangement, each with the MIDI channel it plays
    /// on. Percussion goes to the General MIDI percussion channel.
    pub fn tracks(&self) -> [(MidiChannel, &Pattern); 3] {
        [
            (MidiChannel(0), &self.melody),
            (MidiChannel(1), &self.harmony),
            (MidiChannel::PERCUSSION, &self.rhythm),
        ]
    }
}
impl HasExtent for Arrangement {
    fn extent(&self) -> TimeRange {
        let mut extent = TimeRange::default();
        extent.expand_with_range(&self.melody.extent());
        extent.expand_with_range(&self.harmony.extent());
        extent.expand_with_range(&self.rhythm.extent());
        extent
    }
}
