//! Image quantization to a JAB Code palette.
//!
//! [`Quantizer`] is the entry point: pick a mode (or an explicit palette),
//! optionally override the [`DitherPolicy`] and [`DistanceMetric`], then
//! call [`Quantizer::quantize`] on any number of [`Raster`]s.
//!
//! [`binarize`] is the separate two-color path: a fixed luma threshold with
//! no diffusion.
//!
//! [`DistanceMetric`]: crate::DistanceMetric

mod quantizer;
mod raster;

pub use quantizer::{binarize, DitherPolicy, Quantizer, BINARY_THRESHOLD};
pub use raster::Raster;
