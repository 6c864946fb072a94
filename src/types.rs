// Copyright (c) 2024 Mike Tsao. All rights reserved.

use serde::{Deserialize, Serialize};

/// [ParameterType] is the primitive used for general-purpose fractional
/// numbers throughout the system.
pub type ParameterType = f64;

/// A [Normal] is a [ParameterType] that's bounded to 0.0..=1.0. Out-of-range
/// values are clamped at construction, so a [Normal] is always valid.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Normal(ParameterType);
impl Default for Normal {
    /// The midpoint, which is a reasonable starting value for anything that
    /// hasn't yet been pushed in either direction.
    fn default() -> Self {
        Self(0.5)
    }
}
impl Normal {
    /// The smallest value a [Normal] can hold.
    pub const MIN: ParameterType = 0.0;
    /// The largest value a [Normal] can hold.
    pub const MAX: ParameterType = 1.0;

    /// Creates a [Normal], clamping the given value into range.
    pub fn new(value: ParameterType) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// A getter for the raw value.
    pub fn value(&self) -> ParameterType {
        self.0
    }
}
impl From<ParameterType> for Normal {
    fn from(value: ParameterType) -> Self {
        Self::new(value)
    }
}
