//! Color types used throughout the codec.
//!
//! Palettes and samples are plain 8-bit RGB triples; see [`Rgb`].

mod rgb;

pub use rgb::Rgb;
