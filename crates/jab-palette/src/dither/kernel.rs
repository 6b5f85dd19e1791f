//! Error diffusion kernel definition.

/// An error diffusion kernel.
///
/// Each entry is an offset `(dx, dy)` from the current pixel and a weight.
/// A neighbor receives `error * weight / divisor`, computed in integers
/// with truncation toward zero.
///
/// `max_dy` is how many rows ahead the kernel reaches; the error buffer
/// keeps `max_dy + 1` rows.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (0 = current row, positive = below)
    /// - `weight`: numerator of the share, see `divisor`
    pub entries: &'static [(i32, i32, u8)],

    /// Denominator for every weight.
    pub divisor: u8,

    /// Maximum dy value in entries.
    pub max_dy: usize,
}

impl Kernel {
    /// Sum of all weights. Equals `divisor` for kernels that propagate the
    /// whole error.
    pub const fn total_weight(&self) -> u32 {
        let mut sum = 0u32;
        let mut i = 0;
        while i < self.entries.len() {
            sum += self.entries[i].2 as u32;
            i += 1;
        }
        sum
    }
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
    max_dy: 1,
};
