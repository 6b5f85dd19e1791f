//! Assertion helpers for tests.

use jab_palette::{IndexImage, Palette, Rgb};
use pretty_assertions::assert_eq;

use super::app::CliOutput;

/// Assert the command exited successfully
pub fn assert_success(output: &CliOutput) {
    assert!(
        output.success,
        "Expected success. stdout: {}\nstderr: {}",
        output.stdout, output.stderr
    );
}

/// Assert the command failed and its stderr mentions `needle`
pub fn assert_failure_mentions(output: &CliOutput, needle: &str) {
    assert!(!output.success, "Expected failure. stdout: {}", output.stdout);
    assert!(
        output.stderr.contains(needle),
        "Expected stderr to mention {needle:?}, got: {}",
        output.stderr
    );
}

/// Assert bytes carry the PNG signature
pub fn assert_png(bytes: &[u8]) {
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert every RGB pixel is an entry of `palette`
pub fn assert_only_palette_colors(rgb: &[u8], palette: &Palette) {
    for (i, px) in rgb.chunks_exact(3).enumerate() {
        let color = Rgb::new(px[0], px[1], px[2]);
        assert!(
            palette.contains(color),
            "Pixel {i} is {color}, which is not in the {}-color palette",
            palette.len()
        );
    }
}

/// Assert two index images agree pixel for pixel
pub fn assert_same_indices(actual: &IndexImage, expected: &IndexImage) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "Image dimensions differ"
    );
    assert_eq!(actual.indices(), expected.indices());
}
