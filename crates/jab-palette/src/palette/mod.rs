//! Palette types and utilities
//!
//! This module provides the [`Palette`] type and nearest-color
//! classification, canonical palette generation for every [`ColorMode`],
//! embedded palette interpolation for the 128- and 256-color modes, and
//! quality metrics.
//!
//! [`ColorMode`]: crate::ColorMode

mod error;
mod generator;
mod interpolate;
mod palette;
mod quality;

pub use error::{PaletteError, ParseColorError};
pub use generator::{
    generate, generate_embedded, generate_with_profile, subdivide_cube, PaletteScheme,
};
pub use interpolate::{
    embedded_to_full_index, interpolate, interpolate_levels, verify_subset, ChannelSet,
    EMBEDDED_LEVELS, EMBEDDED_PALETTE_SIZE, INTERPOLATED_LEVELS,
};
pub use palette::{classify, DistanceMetric, Palette};
pub use quality::{
    color_variation, matches_canonical, min_color_separation, validate_palette_accuracy,
    within_tolerance, QualityReport,
};
