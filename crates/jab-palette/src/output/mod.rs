//! Output types for the quantizer.
//!
//! [`IndexImage`] stores one palette index per pixel together with the
//! palette it refers to. The reduced-color RGB rendering is computed on
//! demand with [`IndexImage::to_rgb`].

mod index_image;

pub use index_image::IndexImage;
