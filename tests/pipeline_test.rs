//! Library-level tests of the PNG to palette pipeline.

mod common;

use common::fixtures;
use jab_palette::{
    binarize, generate, ColorMode, DistanceMetric, DitherPolicy, Quantizer, Raster,
};
use jabcolor::rendering::{decode_indexed_png, decode_png, encode_indexed_png, encode_rgb_png};
use pretty_assertions::assert_eq;

#[test]
fn test_swatch_quantizes_to_identity_indices() {
    for mode in ColorMode::ALL {
        let palette = generate(mode);
        let png = fixtures::palette_swatch_png(&palette);
        let decoded = decode_png(&png).unwrap();

        for policy in [DitherPolicy::Never, DitherPolicy::Always] {
            let image = Quantizer::new(mode)
                .dither(policy)
                .quantize(&decoded.raster().unwrap());
            let expected: Vec<u8> = (0..palette.len()).map(|i| i as u8).collect();
            assert_eq!(
                image.indices(),
                expected.as_slice(),
                "{mode} colors with {policy:?}"
            );
        }
    }
}

#[test]
fn test_indexed_png_survives_round_trip() {
    let (w, h) = (33, 9);
    let data = fixtures::gradient_rgb(w, h);
    let raster = Raster::rgb(&data, w, h).unwrap();

    for mode in ColorMode::ALL {
        let image = Quantizer::new(mode)
            .metric(DistanceMetric::LumaWeighted)
            .quantize(&raster);
        let decoded = decode_indexed_png(&encode_indexed_png(&image).unwrap()).unwrap();
        common::assert_same_indices(&decoded, &image);
        assert_eq!(decoded.palette(), image.palette());
    }
}

#[test]
fn test_rgb_png_only_contains_palette_colors() {
    let (w, h) = (24, 24);
    let data = fixtures::gradient_rgb(w, h);
    let raster = Raster::rgb(&data, w, h).unwrap();
    let image = Quantizer::new(ColorMode::Colors128).quantize(&raster);

    let decoded = decode_png(&encode_rgb_png(&image).unwrap()).unwrap();
    common::assert_only_palette_colors(&decoded.data, &generate(ColorMode::Colors128));
}

#[test]
fn test_grayscale_input_binarizes() {
    let png = fixtures::gray_png(&[10, 200, 128, 127], 2, 2);
    let decoded = decode_png(&png).unwrap();
    let image = binarize(&decoded.raster().unwrap());
    assert_eq!(image.indices(), &[0, 1, 1, 0]);
}

#[test]
fn test_dithering_changes_gradient_output() {
    let (w, h) = (32, 8);
    let data = fixtures::gradient_rgb(w, h);
    let raster = Raster::rgb(&data, w, h).unwrap();

    let plain = Quantizer::new(ColorMode::Colors16)
        .dither(DitherPolicy::Never)
        .quantize(&raster);
    let dithered = Quantizer::new(ColorMode::Colors16)
        .dither(DitherPolicy::Always)
        .quantize(&raster);
    assert_ne!(plain.indices(), dithered.indices());
}
