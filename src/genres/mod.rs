// src/genres/mod.rs

// Concrete games that compose systems into prestige layers.
// Each genre is feature-gated so downstream crates enable only what they use.

pub mod sdk;
pub use sdk::*;

#[cfg(feature = "genre-idle")]
pub mod idle;

#[cfg(feature = "genre-idle")]
pub use idle::*;
