//! Symbol metadata that carries palette information.
//!
//! A symbol announces its color mode as the 3-bit value `Nc`, written once
//! in a fixed 3-color palette (Part I, readable before the real palette is
//! known) and once in the symbol's own palette (Part II). The palette
//! itself is stored as RGB triples: in full for modes up to 64 colors, as
//! the 64-color embedded grid for 128 and 256 colors.

mod embedding;
mod nc;

pub use embedding::{
    decode_palette_bytes, encode_embedded_palette, encode_palette, reconstruct_palette,
};
pub use nc::{decode_nc, decode_nc_samples, encode_nc, nc_colors, nc_part1_palette, NcPart};
