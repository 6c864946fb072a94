// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Various helpers.

pub use rng::Rng;

mod rng;
