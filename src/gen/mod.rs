//! Probabilistic melody generation.
//!
//! This module turns a scale and a base pitch into an ordered sequence of
//! note events, using weighted random sampling over a 12-tone probability
//! mask. Generation is pure apart from the caller-supplied random source.

mod generator;
mod scale;

pub use generator::generate_melody_with;
#[allow(unused_imports)]
pub use generator::{generate_melody, generate_melody_with_count};
pub use scale::{Scale, ScaleMask};
