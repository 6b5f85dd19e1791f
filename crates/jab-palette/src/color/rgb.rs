//! 8-bit RGB color type
//!
//! JAB Code palettes are defined directly in 8-bit sRGB byte values, and the
//! index a module encodes depends on byte-exact agreement with those values.
//! All codec math therefore works on integer channels; no gamma decoding is
//! involved.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::{PaletteError, ParseColorError};

/// A color (or sampled pixel) with 8-bit red, green and blue channels.
///
/// The channel range `0..=255` is enforced by the type. Values coming from
/// wider integer arithmetic go through [`Rgb::try_from_channels`], which
/// rejects anything out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Black, `(0, 0, 0)`.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// White, `(255, 255, 255)`.
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from channel bytes.
    ///
    /// # Example
    /// ```
    /// use jab_palette::Rgb;
    /// let cyan = Rgb::new(0, 255, 255);
    /// assert_eq!(cyan.to_bytes(), [0, 255, 255]);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array [R, G, B].
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B].
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Create a color from wide integer channels, rejecting values outside
    /// `0..=255`.
    ///
    /// # Example
    /// ```
    /// use jab_palette::Rgb;
    /// assert!(Rgb::try_from_channels(10, 20, 30).is_ok());
    /// assert!(Rgb::try_from_channels(10, 256, 30).is_err());
    /// ```
    pub fn try_from_channels(r: i32, g: i32, b: i32) -> Result<Self, PaletteError> {
        Ok(Self::new(
            checked_channel("red", r)?,
            checked_channel("green", g)?,
            checked_channel("blue", b)?,
        ))
    }

    /// Rec. 601 luma, rounded to the nearest integer.
    ///
    /// `round(0.299 R + 0.587 G + 0.114 B)`, computed in fixed point so the
    /// result is identical on every platform.
    #[inline]
    pub fn luma(self) -> u8 {
        let weighted = 299 * self.r as u32 + 587 * self.g as u32 + 114 * self.b as u32;
        ((weighted + 500) / 1000) as u8
    }
}

fn checked_channel(channel: &'static str, value: i32) -> Result<u8, PaletteError> {
    u8::try_from(value).map_err(|_| PaletteError::OutOfRangeChannel { channel, value })
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Supports the following formats:
    /// - `#RRGGBB` - standard 6-digit hex with hash
    /// - `RRGGBB` - standard 6-digit hex without hash
    /// - `#RGB` - shorthand 3-digit hex with hash (expands to RRGGBB)
    /// - `RGB` - shorthand 3-digit hex without hash
    ///
    /// Parsing is case-insensitive. Leading and trailing whitespace is trimmed.
    ///
    /// # Examples
    ///
    /// ```
    /// use jab_palette::Rgb;
    ///
    /// let yellow: Rgb = "#FFFF00".parse().unwrap();
    /// assert_eq!(yellow, Rgb::new(255, 255, 0));
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        // Non-ASCII input would make the byte slicing below panic
        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        // from_str_radix accepts a leading sign
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            if matches!(s.len(), 3 | 6) {
                return Err(ParseColorError::InvalidDigit(c));
            }
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
