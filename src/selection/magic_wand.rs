//! Magic wand selection using flood fill algorithm.
//!
//! Selects regions of similar color based on tolerance, either contiguous
//! (reachable by 4-directional adjacency from the seed) or global (every
//! matching pixel on the canvas).

use log::{debug, trace};
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::buffer::PixelBuffer;
use super::color::{color_matches, Color};
use super::mask::{Bounds, DenseMask, PixelSet, SelectionMask};

/// 4-directional neighborhood.
pub(crate) const NEIGHBORS_4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Magic wand tool settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MagicWandOptions {
    /// Color tolerance (0-100)
    pub tolerance: f64,
    /// If true, only selects connected pixels; if false, selects all matching pixels
    pub contiguous: bool,
    /// Reserved for sampling the merged image instead of the active layer. Unused.
    pub sample_all_layers: bool,
}

impl Default for MagicWandOptions {
    fn default() -> Self {
        Self {
            tolerance: 32.0,
            contiguous: true,
            sample_all_layers: false,
        }
    }
}

impl MagicWandOptions {
    /// Options with `tolerance` clamped to 0-100.
    pub fn new(tolerance: f64, contiguous: bool) -> Self {
        Self {
            tolerance: tolerance.clamp(0.0, 100.0),
            contiguous,
            sample_all_layers: false,
        }
    }
}

/// Magic wand selection result with metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct MagicWandResult {
    /// Selected pixels
    pub mask: SelectionMask,
    /// Bounds of selected region
    pub bounds: Option<Bounds>,
    /// Number of selected pixels
    pub pixel_count: usize,
    /// Color sampled at the seed (transparent black if the seed was off-canvas)
    pub target_color: Color,
}

impl MagicWandResult {
    fn empty() -> Self {
        Self {
            mask: SelectionMask::new(),
            bounds: None,
            pixel_count: 0,
            target_color: Color::TRANSPARENT,
        }
    }

    fn from_mask(mask: SelectionMask, target_color: Color) -> Self {
        let bounds = mask.bounds();
        let pixel_count = mask.len();
        Self {
            mask,
            bounds,
            pixel_count,
            target_color,
        }
    }
}

/// Perform magic wand selection.
///
/// # Arguments
/// * `buffer` - Source pixels
/// * `x`, `y` - Seed coordinate
/// * `options` - Tolerance and contiguity
///
/// # Returns
/// Mask, bounds, pixel count, and the sampled target color. An off-canvas
/// seed yields the empty result rather than an error.
pub fn magic_wand_select(
    buffer: &PixelBuffer<'_>,
    x: i32,
    y: i32,
    options: &MagicWandOptions,
) -> MagicWandResult {
    let Some(target) = buffer.get(x, y) else {
        trace!(
            "magic wand seed ({x}, {y}) outside {}x{} canvas",
            buffer.width(),
            buffer.height()
        );
        return MagicWandResult::empty();
    };

    let mask = if options.contiguous {
        flood_fill_select(buffer, x, y, target, options.tolerance)
    } else {
        global_select(buffer, target, options.tolerance)
    };

    debug!(
        "magic wand at ({x}, {y}) contiguous={} tolerance={} selected {} pixels",
        options.contiguous,
        options.tolerance,
        mask.len()
    );

    MagicWandResult::from_mask(mask, target)
}

/// Contiguous selection grown from (start_x, start_y).
///
/// Every candidate is compared to the fixed `target` color, not to the
/// neighbor that discovered it, so gradients do not leak. Rejected pixels stay
/// in the visited set and are never reconsidered.
pub fn flood_fill_select(
    buffer: &PixelBuffer<'_>,
    start_x: i32,
    start_y: i32,
    target: Color,
    tolerance: f64,
) -> SelectionMask {
    let mut mask = SelectionMask::new();
    if !buffer.contains(start_x, start_y) {
        return mask;
    }

    let mut visited = DenseMask::new(buffer.width(), buffer.height());
    let mut stack = vec![(start_x, start_y)];
    visited.insert(start_x, start_y);

    while let Some((x, y)) = stack.pop() {
        let color = buffer.pixel(x as usize, y as usize);
        if !color_matches(color, target, tolerance) {
            continue;
        }
        mask.insert(x, y);

        for (dx, dy) in NEIGHBORS_4 {
            let nx = x + dx;
            let ny = y + dy;
            // DenseMask::insert rejects off-canvas and already-visited pixels
            if visited.insert(nx, ny) {
                stack.push((nx, ny));
            }
        }
    }

    mask
}

/// Non-contiguous selection: every pixel within `tolerance` of `target`.
///
/// Rows are scanned in parallel and gathered in row order.
pub fn global_select(buffer: &PixelBuffer<'_>, target: Color, tolerance: f64) -> SelectionMask {
    let width = buffer.width();
    if width == 0 || buffer.height() == 0 {
        return SelectionMask::new();
    }

    let rows: Vec<Vec<(i32, i32)>> = buffer
        .data()
        .par_chunks(width * 4)
        .enumerate()
        .map(|(y, row)| {
            row.chunks_exact(4)
                .enumerate()
                .filter(|(_, px)| {
                    let color = Color::new(px[0], px[1], px[2], px[3]);
                    color_matches(color, target, tolerance)
                })
                .map(|(x, _)| (x as i32, y as i32))
                .collect()
        })
        .collect();

    rows.into_iter().flatten().collect()
}
