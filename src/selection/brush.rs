//! Brush offset templates for shaped expansion and freehand strokes.
//!
//! A brush is a list of (dx, dy) offsets relative to the stamp position.
//! Offsets are requested on every pointer move during a stroke, so they are
//! memoized per (size, shape) in a process-wide, insert-once cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::mask::SelectionMask;

pub const MIN_BRUSH_SIZE: u32 = 1;
pub const MAX_BRUSH_SIZE: u32 = 64;

/// Relative pixel offsets of one brush stamp.
pub type BrushOffsets = Arc<[(i32, i32)]>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrushShape {
    #[default]
    Square,
    Circle,
}

/// Offsets for an N x N square anchored at floor((N - 1) / 2).
///
/// Odd sizes center exactly; even sizes extend one further right and down.
fn square_offsets(size: i32) -> Vec<(i32, i32)> {
    let anchor = (size - 1) / 2;
    let mut offsets = Vec::with_capacity((size * size) as usize);
    for dy in -anchor..size - anchor {
        for dx in -anchor..size - anchor {
            offsets.push((dx, dy));
        }
    }
    offsets
}

/// Offsets within radius size / 2 of the anchor; (0, 0) is always present.
fn circle_offsets(size: i32) -> Vec<(i32, i32)> {
    let radius = size as f64 / 2.0;
    let reach = radius.ceil() as i32;
    let mut offsets = Vec::new();
    for dy in -reach..=reach {
        for dx in -reach..=reach {
            if ((dx * dx + dy * dy) as f64).sqrt() <= radius {
                offsets.push((dx, dy));
            }
        }
    }
    if !offsets.contains(&(0, 0)) {
        offsets.push((0, 0));
    }
    offsets
}

/// Compute offsets without touching the cache. `size` is clamped to 1-64.
pub fn generate_brush_offsets(size: u32, shape: BrushShape) -> Vec<(i32, i32)> {
    let size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE) as i32;
    match shape {
        BrushShape::Square => square_offsets(size),
        BrushShape::Circle => circle_offsets(size),
    }
}

/// Memo table of brush offsets keyed by (clamped size, shape).
///
/// Entries are computed on first request and never invalidated.
#[derive(Debug, Default)]
pub struct BrushCache {
    entries: Mutex<HashMap<(u32, BrushShape), BrushOffsets>>,
}

impl BrushCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offsets for a brush, computing and storing them on first use.
    pub fn get(&self, size: u32, shape: BrushShape) -> BrushOffsets {
        let size = size.clamp(MIN_BRUSH_SIZE, MAX_BRUSH_SIZE);
        // A poisoned lock still holds valid entries: they are written once, whole
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .entry((size, shape))
            .or_insert_with(|| {
                let offsets: BrushOffsets = generate_brush_offsets(size, shape).into();
                trace!("brush cache miss: {shape:?} size {size} -> {} offsets", offsets.len());
                offsets
            })
            .clone()
    }

    /// Number of cached brushes.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn global_cache() -> &'static BrushCache {
    static CACHE: OnceLock<BrushCache> = OnceLock::new();
    CACHE.get_or_init(BrushCache::new)
}

/// Cached offsets for a brush of `size` (clamped to 1-64) and `shape`.
pub fn brush_offsets(size: u32, shape: BrushShape) -> BrushOffsets {
    global_cache().get(size, shape)
}

/// Absolute pixels covered by one brush stamp at (x, y).
pub fn brush_stamp(x: i32, y: i32, size: u32, shape: BrushShape) -> SelectionMask {
    brush_offsets(size, shape)
        .iter()
        .map(|&(dx, dy)| (x + dx, y + dy))
        .collect()
}
