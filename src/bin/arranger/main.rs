// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! The `arranger` command turns a JSON request (melody, chords, tempo) into a
//! standard MIDI file, and records feedback that steers future harmony
//! suggestions.

use arranger::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, about, long_about = None)]
struct Args {
    /// Where learned harmony preferences are kept.
    #[clap(short, long, default_value = "preferences.json")]
    preferences: PathBuf,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Arranges a request file into a standard MIDI file.
    Arrange {
        /// A JSON file containing the melody, chords, and tempo.
        input: PathBuf,

        /// Where to write the MIDI file.
        #[clap(short, long, default_value = "arrangement.mid")]
        output: PathBuf,

        /// Rhythm seed. The same seed reproduces the same rhythm track.
        #[clap(short, long)]
        seed: Option<u128>,

        /// Rhythm busyness, from 0.0 (sparse) to 1.0 (every sixteenth).
        #[clap(short, long, default_value_t = 0.5)]
        density: f64,
    },
    /// Records whether you liked a suggested harmony interval.
    Feedback {
        /// The interval, in semitones below the melody.
        semitones: u8,

        /// Record a thumbs-down instead of a thumbs-up.
        #[clap(long)]
        dislike: bool,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let preferences = if args.preferences.exists() {
        PreferenceStore::load(&args.preferences)?
    } else {
        PreferenceStore::default()
    };

    match args.command {
        Command::Arrange {
            input,
            output,
            seed,
            density,
        } => {
            let file = std::fs::File::open(&input)
                .map_err(|e| anyhow::format_err!("Couldn't open {input:?}: {e}"))?;
            let request: ArrangerInput = serde_json::from_reader(std::io::BufReader::new(file))
                .map_err(|e| anyhow::format_err!("Couldn't parse {input:?}: {e}"))?;

            let mut arranger = Arranger::new_with(ChordToneHarmonizer::new_with(preferences));
            arranger.set_rhythm_density(Normal::new(density));
            let rng = match seed {
                Some(seed) => Rng::new_with_seed(seed),
                None => Rng::default(),
            };
            let arrangement = arranger.arrange(&request, rng)?;
            export::write_to_path(&arrangement, &output)?;
            eprintln!(
                "Arranged {} notes at {} into {}",
                arrangement.melody.notes().len(),
                arrangement.tempo,
                output.display()
            );
        }
        Command::Feedback { semitones, dislike } => {
            let mut preferences = preferences;
            let interval = IntervalClass::new(semitones);
            preferences.record(interval, !dislike);
            preferences.save(&args.preferences)?;
            eprintln!(
                "Interval {} now has weight {:.2}",
                interval.semitones(),
                preferences.weight(interval).value()
            );
        }
    }
    Ok(())
}
