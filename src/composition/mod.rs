// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Creation and representation of music scores.

pub use arrangement::{Arrangement, ArrangementUid, ArrangementUidFactory};
pub use note::Note;
pub use pattern::{Pattern, PatternBuilder};
pub use rhythm::{RhythmGenerator, RhythmPattern};

mod arrangement;
mod note;
mod pattern;
mod rhythm;

/// The most commonly used imports.
pub mod prelude {
    pub use super::{
        Arrangement, ArrangementUid, ArrangementUidFactory, Note, Pattern, PatternBuilder,
        RhythmGenerator, RhythmPattern,
    };
}
