// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Describes major system interfaces.

use crate::{arranger::ArrangerInput, time::TimeRange};

/// Something that occupies a range of score time.
pub trait HasExtent {
    /// The range of time that this thing covers.
    fn extent(&self) -> TimeRange;

    /// Convenience method that returns the length of the extent.
    fn duration(&self) -> crate::time::MusicalTime {
        self.extent().duration()
    }
}

/// Something that holds a persistent piece of configuration and knows whether
/// its in-memory state has diverged from what's on disk.
pub trait HasSettings {
    /// Whether the current state has been saved.
    fn has_been_saved(&self) -> bool;
    /// Marks the state as dirty.
    fn needs_save(&mut self);
    /// Marks the state as saved.
    fn mark_clean(&mut self);
}

/// The seam between the arranging pipeline and whatever suggests harmony.
/// Implementations receive the full (validated) arranger input and return one
/// harmony key per melody note.
pub trait SuggestsHarmony {
    /// Suggests a harmony line for the given input. The result has exactly
    /// one key per melody note.
    fn suggest(&self, input: &ArrangerInput) -> anyhow::Result<Vec<u8>>;
}
