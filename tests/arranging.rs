// Copyright (c) 2024 Mike Tsao. All rights reserved.

use arranger::prelude::*;
use std::path::PathBuf;

fn request() -> ArrangerInput {
    ArrangerInput {
        melody: vec![60, 62, 64, 65, 67, 69, 71, 72],
        chords: vec![
            "Cmaj7".parse().unwrap(),
            "Am7".parse().unwrap(),
            "D7".parse().unwrap(),
            "G7".parse().unwrap(),
        ],
        tempo: Tempo(110.0),
        key: Some(Scale::new_with("C4".parse().unwrap(), ScaleKind::Major)),
    }
}

#[test]
fn full_pipeline_from_request_to_midi_file() {
    let arranger = Arranger::<ChordToneHarmonizer>::default();
    let arrangement = arranger.arrange(&request(), Rng::new_with_seed(1)).unwrap();

    // The melody and harmony lines are the same length and move together,
    // with the harmony voiced below on chord tones.
    assert_eq!(arrangement.melody.notes().len(), 8);
    assert_eq!(arrangement.harmony.notes().len(), 8);
    for (melody, harmony) in arrangement
        .melody
        .notes()
        .iter()
        .zip(arrangement.harmony.notes())
    {
        assert!(harmony.key < melody.key);
        assert_eq!(melody.range.0.start, harmony.range.0.start);
    }

    // The percussion track covers the same two bars as the melody.
    assert_eq!(arrangement.rhythm.extent(), arrangement.melody.extent());

    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("arrangement.mid");
    export::write_to_path(&arrangement, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let smf = midly::Smf::parse(&bytes).unwrap();
    assert_eq!(smf.tracks.len(), 1);
}

#[test]
fn feedback_changes_the_next_arrangement() {
    // Every melody note is a tone of its bar's chord, so an octave below is
    // always available.
    let input = ArrangerInput {
        melody: vec![60, 64, 67, 71, 67, 71, 62, 65],
        chords: vec!["Cmaj7".parse().unwrap(), "G7".parse().unwrap()],
        tempo: Tempo(110.0),
        key: None,
    };

    let baseline = Arranger::<ChordToneHarmonizer>::default()
        .arrange(&input, Rng::new_with_seed(1))
        .unwrap();

    // Strongly prefer octaves below the melody.
    let mut preferences = PreferenceStore::default();
    for _ in 0..5 {
        preferences.record(IntervalClass::new(0), true);
    }
    let arranger = Arranger::new_with(ChordToneHarmonizer::new_with(preferences));
    let retrained = arranger.arrange(&input, Rng::new_with_seed(1)).unwrap();

    assert_ne!(
        baseline.harmony, retrained.harmony,
        "feedback should steer the harmony line"
    );
    assert!(retrained
        .harmony
        .notes()
        .iter()
        .zip(retrained.melody.notes())
        .all(|(harmony, melody)| melody.key - harmony.key == 12));
}

#[test]
fn preferences_survive_a_round_trip_to_disk() {
    let path = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("preferences.json");

    let mut preferences = PreferenceStore::default();
    preferences.record(IntervalClass::new(7), true);
    preferences.save(&path).unwrap();

    let reloaded = PreferenceStore::load(&path).unwrap();
    let arranger = Arranger::new_with(ChordToneHarmonizer::new_with(reloaded));
    let with_saved = arranger.arrange(&request(), Rng::new_with_seed(9)).unwrap();

    let arranger = Arranger::new_with(ChordToneHarmonizer::new_with({
        let mut p = PreferenceStore::default();
        p.record(IntervalClass::new(7), true);
        p
    }));
    let with_fresh = arranger.arrange(&request(), Rng::new_with_seed(9)).unwrap();

    assert_eq!(with_saved.harmony, with_fresh.harmony);
}
