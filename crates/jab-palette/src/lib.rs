#![allow(clippy::module_inception)]

//! jab-palette: color palettes for JAB Code symbols
//!
//! This library maps between RGB colors and palette indices for the seven
//! JAB Code color modes (4 to 256 colors). It covers both directions:
//!
//! - **Encoding**: produce the canonical palette for a mode and reduce an
//!   image to it, with optional Floyd-Steinberg error diffusion
//! - **Decoding**: classify sampled module colors to the nearest palette
//!   index, and rebuild 128/256-color palettes from the 64 colors a symbol
//!   embeds in its metadata
//!
//! # Quick Start
//!
//! ```
//! use jab_palette::{ColorMode, Quantizer, Raster};
//!
//! let pixels = vec![200u8; 4 * 4 * 3];
//! let raster = Raster::rgb(&pixels, 4, 4).unwrap();
//!
//! let image = Quantizer::new(ColorMode::Colors64).quantize(&raster);
//! assert_eq!(image.width(), 4);
//! assert!(image.indices().iter().all(|&i| i < 64));
//! ```
//!
//! # Classifying Samples
//!
//! ```
//! use jab_palette::{ColorMode, DistanceMetric, Palette, Rgb};
//!
//! let palette = Palette::for_mode(ColorMode::Colors8);
//! let index = palette.classify(Rgb::new(240, 20, 30), DistanceMetric::Euclidean);
//! assert_eq!(index, 4); // red
//! ```
//!
//! # Palette Layout
//!
//! | Colors | Construction | Channel levels |
//! |--------|--------------|----------------|
//! | 4 | fixed table | black, cyan, magenta, yellow |
//! | 8 | fixed table | RGB cube vertices |
//! | 16 | grid | R 4, G 2, B 2 |
//! | 32 | grid | R 4, G 4, B 2 |
//! | 64 | grid | R 4, G 4, B 4 |
//! | 128 | embedded grid + interpolation | R 8, G 4, B 4 |
//! | 256 | embedded grid + interpolation | R 8, G 8, B 4 |
//!
//! Grids are enumerated red-outer, green-middle, blue-inner. The 4-level
//! grids use `{0, 85, 170, 255}`. The embedded grids of the two largest
//! modes use `{0, 73, 182, 255}` on their interpolated channels, which
//! expand to `{0, 36, 73, 109, 145, 182, 218, 255}`.
//!
//! # Distance Metrics
//!
//! [`DistanceMetric::Euclidean`] (the default) is plain RGB distance.
//! [`DistanceMetric::LumaWeighted`] weights channel differences by their
//! Rec. 601 luma contribution. Nothing in the crate picks a metric on the
//! caller's behalf except the defaults of [`Quantizer`].
//!
//! # Determinism
//!
//! All color math is integer arithmetic on 8-bit channels. Classification
//! ties go to the lowest palette index, and error diffusion always scans in
//! the same order, so identical inputs give byte-identical outputs.

pub mod color;
pub mod dither;
pub mod error;
pub mod metadata;
pub mod mode;
pub mod output;
pub mod palette;
pub mod quantize;


pub use color::Rgb;
pub use error::CodecError;
pub use metadata::{
    decode_nc, decode_nc_samples, decode_palette_bytes, encode_embedded_palette, encode_nc,
    encode_palette, nc_colors, nc_part1_palette, reconstruct_palette, NcPart,
};
pub use mode::{ColorMode, FourColorProfile};
pub use output::IndexImage;
pub use palette::{
    classify, color_variation, embedded_to_full_index, generate, generate_embedded,
    generate_with_profile, interpolate, interpolate_levels, matches_canonical,
    min_color_separation, subdivide_cube, validate_palette_accuracy, ChannelSet,
    DistanceMetric, Palette, PaletteError, PaletteScheme, ParseColorError, QualityReport,
};
pub use quantize::{binarize, DitherPolicy, Quantizer, Raster};
