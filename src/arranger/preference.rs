// Copyright (c) 2024 Mike Tsao. All rights reserved.

use crate::{traits::HasSettings, types::Normal};
use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs::File,
    io::Read,
    path::Path,
};

/// An [IntervalClass] is the distance, in semitones mod 12, between a harmony
/// note and the melody note above it. Zero is an octave (we never suggest
/// unisons), seven is a perfect fifth below, and so on.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize,
)]
pub struct IntervalClass(u8);
impl IntervalClass {
    /// Creates an [IntervalClass], folding larger intervals into one octave.
    pub fn new(semitones: u8) -> Self {
        Self(semitones % 12)
    }

    /// A getter for the raw value.
    pub fn semitones(&self) -> u8 {
        self.0
    }
}

/// A [PreferenceStore] remembers how the user has reacted to suggested
/// harmony intervals. Each interval class carries a weight in 0.0..=1.0 that
/// starts at the midpoint and moves a fixed step toward 1.0 on a thumbs-up
/// and toward 0.0 on a thumbs-down. Harmonizers consult the weights when
/// scoring candidate notes, so the arranger drifts toward the sounds the
/// user keeps.
#[derive(Debug, Derivative, Serialize, Deserialize)]
#[derivative(Default)]
#[serde(rename_all = "kebab-case")]
pub struct PreferenceStore {
    weights: BTreeMap<IntervalClass, Normal>,

    /// How far one piece of feedback moves a weight.
    #[derivative(Default(value = "0.1"))]
    #[serde(default = "PreferenceStore::default_learning_rate")]
    learning_rate: f64,

    #[serde(skip)]
    has_been_saved: bool,
}
impl HasSettings for PreferenceStore {
    fn has_been_saved(&self) -> bool {
        self.has_been_saved
    }

    fn needs_save(&mut self) {
        self.has_been_saved = false;
    }

    fn mark_clean(&mut self) {
        self.has_been_saved = true;
    }
}
impl PreferenceStore {
    fn default_learning_rate() -> f64 {
        0.1
    }

    /// The current weight for an interval class. Intervals we've never heard
    /// about sit at the midpoint.
    pub fn weight(&self, interval: IntervalClass) -> Normal {
        self.weights.get(&interval).copied().unwrap_or_default()
    }

    /// Records one piece of feedback and nudges the interval's weight.
    pub fn record(&mut self, interval: IntervalClass, liked: bool) {
        let current = self.weight(interval).value();
        let updated = if liked {
            current + self.learning_rate
        } else {
            current - self.learning_rate
        };
        self.weights.insert(interval, Normal::new(updated));
        self.needs_save();
        log::debug!(
            "interval {} weight is now {:.2}",
            interval.semitones(),
            self.weight(interval).value()
        );
    }

    /// Loads preferences from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut contents = String::new();
        let mut file = File::open(path)
            .map_err(|e| anyhow::format_err!("Couldn't open {path:?}: {}", e))?;
        file.read_to_string(&mut contents)
            .map_err(|e| anyhow::format_err!("Couldn't read {path:?}: {}", e))?;
        let mut store: Self = serde_json::from_str(&contents)
            .map_err(|e| anyhow::format_err!("Couldn't parse {path:?}: {}", e))?;
        store.mark_clean();
        Ok(store)
    }

    /// Saves preferences to a JSON file, creating parent directories as
    /// needed.
    pub fn save(&mut self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(&self)
            .map_err(|_| anyhow::format_err!("Unable to serialize preferences JSON"))?;
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(|e| {
                anyhow::format_err!("Unable to create {path:?} parent directories: {}", e)
            })?;
        }
        std::fs::write(path, json)
            .map_err(|e| anyhow::format_err!("Unable to write {path:?}: {}", e))?;
        self.mark_clean();
        Ok(())
    }
}
