//! RGBA color and the normalized distance metric used by every color-aware selector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest possible Euclidean distance over four 0-255 channels (255 * sqrt(4)).
const MAX_DISTANCE: f64 = 255.0 * 2.0;

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, reported when no pixel could be sampled.
    pub const TRANSPARENT: Color = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from an `[r, g, b, a]` slice.
    #[inline]
    pub fn from_rgba(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    #[inline]
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Similarity distance between two colors on a 0-100 scale (0 = identical).
///
/// Two fully transparent colors are equal regardless of their RGB values.
/// A transparent color against an opaque-ish one is maximally distant, so it
/// only matches at tolerance 100. Otherwise this is the Euclidean distance
/// over all four channels, normalized by the largest possible distance.
pub fn color_distance(a: Color, b: Color) -> f64 {
    match (a.is_transparent(), b.is_transparent()) {
        (true, true) => return 0.0,
        (true, false) | (false, true) => return 100.0,
        _ => {}
    }

    let dr = a.r as f64 - b.r as f64;
    let dg = a.g as f64 - b.g as f64;
    let db = a.b as f64 - b.b as f64;
    let da = a.a as f64 - b.a as f64;

    let distance = (dr * dr + dg * dg + db * db + da * da).sqrt();
    (distance / MAX_DISTANCE * 100.0).min(100.0)
}

/// Whether `candidate` is within `tolerance` of `target`.
#[inline]
pub fn color_matches(candidate: Color, target: Color, tolerance: f64) -> bool {
    color_distance(candidate, target) <= tolerance
}

/// Per-channel mean of a set of colors, rounded to the nearest integer.
///
/// Returns `None` for an empty input.
pub fn average_color<I>(colors: I) -> Option<Color>
where
    I: IntoIterator<Item = Color>,
{
    let mut sum = [0u64; 4];
    let mut count = 0u64;
    for c in colors {
        sum[0] += c.r as u64;
        sum[1] += c.g as u64;
        sum[2] += c.b as u64;
        sum[3] += c.a as u64;
        count += 1;
    }
    if count == 0 {
        return None;
    }

    let mean = |s: u64| (s as f64 / count as f64).round().clamp(0.0, 255.0) as u8;
    Some(Color::new(mean(sum[0]), mean(sum[1]), mean(sum[2]), mean(sum[3])))
}
