// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Management of all MIDI-related information that flows within the system.

use crate::time::MusicalTime;
use derive_more::Display as DeriveDisplay;
use serde::{Deserialize, Serialize};

pub use midly::{
    num::{u4, u7},
    MidiMessage,
};

/// Newtype for MIDI channel.
#[derive(
    Clone, Copy, Debug, Default, DeriveDisplay, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub struct MidiChannel(pub u8);
#[allow(missing_docs)]
impl MidiChannel {
    pub const MIN_VALUE: u8 = 0;
    pub const MAX_VALUE: u8 = 15; // inclusive

    /// The General MIDI channel reserved for percussion.
    pub const PERCUSSION: Self = Self(9);

    pub const fn new(value: u8) -> Self {
        Self(value)
    }
}
impl From<u4> for MidiChannel {
    fn from(value: u4) -> Self {
        Self(value.as_int())
    }
}
impl From<u8> for MidiChannel {
    fn from(value: u8) -> Self {
        Self(value)
    }
}
impl From<MidiChannel> for u8 {
    fn from(value: MidiChannel) -> Self {
        value.0
    }
}

/// Convenience function to make a note-on [MidiMessage].
pub fn new_note_on(note: u8, vel: u8) -> MidiMessage {
    MidiMessage::NoteOn {
        key: u7::from(note),
        vel: u7::from(vel),
    }
}

/// Convenience function to make a note-off [MidiMessage].
pub fn new_note_off(note: u8, vel: u8) -> MidiMessage {
    MidiMessage::NoteOff {
        key: u7::from(note),
        vel: u7::from(vel),
    }
}

/// A [MidiMessage] paired with the score time when it happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MidiEvent {
    #[allow(missing_docs)]
    pub message: MidiMessage,
    #[allow(missing_docs)]
    pub time: MusicalTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_conversions() {
        let channel = MidiChannel::from(u4::from(7));
        assert_eq!(channel, MidiChannel(7));
        assert_eq!(u8::from(channel), 7);
        assert_eq!(MidiChannel::PERCUSSION, MidiChannel(9));
    }

    #[test]
    fn note_message_helpers() {
        assert_eq!(
            new_note_on(60, 127),
            MidiMessage::NoteOn {
                key: u7::from(60),
                vel: u7::from(127)
            }
        );
        assert_eq!(
            new_note_off(60, 0),
            MidiMessage::NoteOff {
                key: u7::from(60),
                vel: u7::from(0)
            }
        );
    }
}
