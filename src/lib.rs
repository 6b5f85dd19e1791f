//! jabcolor - JAB Code palette tool
//!
//! Generates the canonical JAB Code color palettes, classifies sampled
//! colors and reduces PNG images to a palette. The palette math lives in
//! the `jab-palette` crate; this library adds configuration, PNG I/O and
//! the report formats used by the command-line tool.

pub mod error;
pub mod models;
pub mod rendering;
