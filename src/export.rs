// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Renders [Arrangement]s as standard MIDI files.

use crate::{
    composition::Arrangement,
    midi::{u4, MidiEvent, MidiMessage},
    time::MusicalTime,
};
use anyhow::format_err;
use midly::{
    num::{u15, u24, u28},
    Format, Header, MetaMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use std::path::Path;

/// Ticks per quarter note in rendered files.
pub const PPQ: u16 = 480;

fn to_ticks(time: MusicalTime) -> u32 {
    (time.total_units() * PPQ as usize / MusicalTime::UNITS_PER_BEAT) as u32
}

/// Renders the arrangement as a format-0 standard MIDI file: one track
/// containing tempo and time-signature metadata followed by every note of
/// every pattern, with melody on channel 0, harmony on channel 1, and
/// percussion on the General MIDI percussion channel.
pub fn render(arrangement: &Arrangement) -> anyhow::Result<Vec<u8>> {
    let mut events: Vec<(u32, u4, MidiMessage)> = Vec::default();
    for (channel, pattern) in arrangement.tracks() {
        let midi_events: Vec<MidiEvent> = pattern.clone().into();
        events.extend(
            midi_events
                .into_iter()
                .map(|event| (to_ticks(event.time), u4::from(channel.0), event.message)),
        );
    }
    // Note-offs sort before note-ons at the same tick so a repeated key
    // retriggers cleanly.
    events.sort_by_key(|(ticks, _, message)| {
        (*ticks, matches!(message, MidiMessage::NoteOn { .. }))
    });

    let bottom_log2 = arrangement.time_signature.bottom.trailing_zeros() as u8;
    let mut track = vec![
        TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::from(
                arrangement.tempo.microseconds_per_beat(),
            ))),
        },
        TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::TimeSignature(
                arrangement.time_signature.top as u8,
                bottom_log2,
                24,
                8,
            )),
        },
    ];
    let mut last_ticks = 0;
    for (ticks, channel, message) in events {
        track.push(TrackEvent {
            delta: u28::from(ticks - last_ticks),
            kind: TrackEventKind::Midi { channel, message },
        });
        last_ticks = ticks;
    }
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let smf = Smf {
        header: Header::new(Format::SingleTrack, Timing::Metrical(u15::from(PPQ))),
        tracks: vec![track],
    };
    let mut buffer = Vec::default();
    smf.write_std(&mut buffer)?;
    Ok(buffer)
}

/// Renders the arrangement and writes it to disk.
pub fn write_to_path(arrangement: &Arrangement, path: &Path) -> anyhow::Result<()> {
    let bytes = render(arrangement)?;
    std::fs::write(path, bytes).map_err(|e| format_err!("Couldn't write {path:?}: {e}"))?;
    log::info!("wrote MIDI file {path:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        arranger::{Arranger, ArrangerInput, ChordToneHarmonizer},
        time::Tempo,
        util::Rng,
    };

    fn arrangement() -> Arrangement {
        let arranger = Arranger::<ChordToneHarmonizer>::default();
        let input = ArrangerInput {
            melody: vec![60, 62, 64, 65, 67],
            chords: vec!["Cmaj7".parse().unwrap(), "G7".parse().unwrap()],
            tempo: Tempo(120.0),
            key: None,
        };
        arranger.arrange(&input, Rng::new_with_seed(1)).unwrap()
    }

    #[test]
    fn tick_conversion_is_anchored_to_the_quarter_note() {
        assert_eq!(to_ticks(MusicalTime::ONE_BEAT), 480);
        assert_eq!(to_ticks(MusicalTime::DURATION_SIXTEENTH), 120);
        assert_eq!(to_ticks(MusicalTime::START), 0);
    }

    #[test]
    fn rendered_file_parses_back() {
        let arrangement = arrangement();
        let bytes = render(&arrangement).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(smf.header.timing, Timing::Metrical(u15::from(PPQ)));
        assert_eq!(smf.tracks.len(), 1);
        assert_eq!(
            smf.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::from(500_000))),
            "120 BPM is half a million microseconds per beat"
        );
        assert_eq!(
            smf.tracks[0][1].kind,
            TrackEventKind::Meta(MetaMessage::TimeSignature(4, 2, 24, 8))
        );
        assert_eq!(
            smf.tracks[0].last().unwrap().kind,
            TrackEventKind::Meta(MetaMessage::EndOfTrack)
        );
    }

    #[test]
    fn every_note_lands_on_its_channel() {
        let arrangement = arrangement();
        let note_count: usize = arrangement
            .tracks()
            .iter()
            .map(|(_, pattern)| pattern.notes().len())
            .sum();

        let bytes = render(&arrangement).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        let mut note_ons = 0;
        let mut channels = std::collections::HashSet::new();
        for event in &smf.tracks[0] {
            if let TrackEventKind::Midi { channel, message } = event.kind {
                channels.insert(channel.as_int());
                if matches!(message, MidiMessage::NoteOn { .. }) {
                    note_ons += 1;
                }
            }
        }
        assert_eq!(note_ons, note_count);
        assert!(channels.contains(&0), "melody plays on channel 0");
        assert!(channels.contains(&1), "harmony plays on channel 1");
        assert!(channels.contains(&9), "percussion plays on channel 9");
    }

    #[test]
    fn melody_notes_fall_on_beat_boundaries() {
        let bytes = render(&arrangement()).unwrap();
        let smf = Smf::parse(&bytes).unwrap();
        let mut ticks = 0u32;
        let mut melody_onsets = Vec::default();
        for event in &smf.tracks[0] {
            ticks += event.delta.as_int();
            if let TrackEventKind::Midi { channel, message } = event.kind {
                if channel.as_int() == 0 && matches!(message, MidiMessage::NoteOn { .. }) {
                    melody_onsets.push(ticks);
                }
            }
        }
        assert_eq!(melody_onsets, vec![0, 480, 960, 1440, 1920]);
    }
}
